use crate::domain::card::CardRejection;
use crate::domain::token::TokenId;
use crate::domain::transaction::{TransactionId, TransactionStatus};
use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Coarse failure category, stable enough for callers to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Expired,
    Conflict,
    Internal,
}

#[derive(Error, Diagnostic, Debug)]
pub enum PaymentError {
    #[error("card validation failed: {0}")]
    #[diagnostic(code(payments::invalid_card))]
    InvalidCard(CardRejection),

    #[error("invalid amount: {0}")]
    #[diagnostic(code(payments::invalid_amount))]
    InvalidAmount(String),

    #[error("malformed request: {0}")]
    #[diagnostic(code(payments::malformed_request))]
    MalformedRequest(String),

    #[error("token {0} not found")]
    #[diagnostic(code(payments::token_not_found))]
    TokenNotFound(TokenId),

    #[error("token {token} expired at {expires_at}")]
    #[diagnostic(code(payments::token_expired))]
    TokenExpired {
        token: TokenId,
        expires_at: DateTime<Utc>,
    },

    #[error("transaction {0} not found")]
    #[diagnostic(code(payments::transaction_not_found))]
    TransactionNotFound(TransactionId),

    #[error("transaction {id} has status {status} and cannot be refunded")]
    #[diagnostic(
        code(payments::transaction_not_refundable),
        help("only transactions with status `success` can be refunded, and only once")
    )]
    TransactionNotRefundable {
        id: TransactionId,
        status: TransactionStatus,
    },

    #[error("internal error: {0}")]
    #[diagnostic(code(payments::internal_error))]
    InternalError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCard(_) | Self::InvalidAmount(_) | Self::MalformedRequest(_) => {
                ErrorKind::Validation
            }
            Self::TokenNotFound(_) | Self::TransactionNotFound(_) => ErrorKind::NotFound,
            Self::TokenExpired { .. } => ErrorKind::Expired,
            Self::TransactionNotRefundable { .. } => ErrorKind::Conflict,
            Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Machine-readable code; card failures report their first violated field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCard(rejection) => rejection.code(),
            Self::InvalidAmount(_) => "invalid_amount",
            Self::MalformedRequest(_) => "malformed_request",
            Self::TokenNotFound(_) => "token_not_found",
            Self::TokenExpired { .. } => "token_expired",
            Self::TransactionNotFound(_) => "transaction_not_found",
            Self::TransactionNotRefundable { .. } => "transaction_not_refundable",
            Self::InternalError(_) => "internal_error",
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(Box::new(std::io::Error::other(message.into())))
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
