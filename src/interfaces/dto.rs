//! Request and response shapes of the caller-facing operations.

use crate::domain::card::{CardDetails, CardNetwork};
use crate::domain::customer::Customer;
use crate::domain::token::{TokenId, TokenRecord};
use crate::domain::transaction::{Amount, Transaction, TransactionId, TransactionStatus};
use crate::error::{ErrorKind, PaymentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizeRequest {
    pub card: CardDetails,
    pub customer: Customer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizeResponse {
    pub token: TokenId,
    pub last_four_digits: String,
    pub card_type: CardNetwork,
    pub expires_at: DateTime<Utc>,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&TokenRecord> for TokenizeResponse {
    fn from(record: &TokenRecord) -> Self {
        Self {
            token: record.token.clone(),
            last_four_digits: record.last_four_digits.clone(),
            card_type: record.card_type,
            expires_at: record.expires_at,
            customer_id: record.customer_id.clone(),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: TransactionId,
    pub status: TransactionStatus,
    pub amount: Amount,
    pub currency: String,
    pub token: TokenId,
    pub customer_id: String,
    pub message: String,
    pub processed_at: DateTime<Utc>,
}

impl From<&Transaction> for PaymentResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            transaction_id: tx.transaction_id.clone(),
            status: tx.status,
            amount: tx.amount,
            currency: tx.currency.clone(),
            token: tx.token.clone(),
            customer_id: tx.customer_id.clone(),
            message: tx.message.clone(),
            processed_at: tx.processed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTransactions {
    pub customer_id: String,
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

impl CustomerTransactions {
    pub fn new(customer_id: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            customer_id: customer_id.into(),
            transaction_count: transactions.len(),
            transactions,
        }
    }
}

/// Structured failure: a category, a stable code and a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl From<&PaymentError> for ErrorBody {
    fn from(err: &PaymentError) -> Self {
        Self {
            kind: err.kind(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}
