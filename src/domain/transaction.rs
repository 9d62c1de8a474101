use super::card::CardNetwork;
use super::token::TokenId;
use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CURRENCY: &str = "USD";

/// A strictly positive monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidAmount(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    FailedInsufficientFunds,
    FailedDeclined,
    Pending,
    PendingManualReview,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::FailedInsufficientFunds => "failed_insufficient_funds",
            Self::FailedDeclined => "failed_declined",
            Self::Pending => "pending",
            Self::PendingManualReview => "pending_manual_review",
            Self::Refunded => "refunded",
        }
    }

    pub fn is_refundable(&self) -> bool {
        *self == Self::Success
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card details denormalized onto each transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub last_four: String,
    pub card_type: CardNetwork,
}

/// A ledger entry. Only `status`, `message` and `refunded_at` ever change,
/// and only through a refund.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub status: TransactionStatus,
    pub amount: Amount,
    pub currency: String,
    pub customer_id: String,
    pub token: TokenId,
    pub description: Option<String>,
    pub message: String,
    pub processed_at: DateTime<Utc>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub card_info: CardSummary,
}

impl Transaction {
    /// Applies the single permitted mutation, `success -> refunded`.
    pub fn refund(&mut self, at: DateTime<Utc>) -> Result<(), PaymentError> {
        if !self.status.is_refundable() {
            return Err(PaymentError::TransactionNotRefundable {
                id: self.transaction_id.clone(),
                status: self.status,
            });
        }
        self.status = TransactionStatus::Refunded;
        self.message = "Refund processed successfully".to_string();
        self.refunded_at = Some(at);
        Ok(())
    }
}

/// Input to the payment processor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRequest {
    pub token: TokenId,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    pub customer_id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PaymentRequest {
    pub fn currency_or_default(&self) -> String {
        match self.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_uppercase(),
            _ => DEFAULT_CURRENCY.to_string(),
        }
    }
}
