use super::token::{TokenId, TokenRecord};
use super::transaction::{Transaction, TransactionId};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Inserts a freshly issued token. Fails if the id is already taken.
    async fn put(&self, token: TokenRecord) -> Result<()>;
    async fn get(&self, token: &TokenId) -> Result<Option<TokenRecord>>;

    /// Resolves a token for use at `now`, distinguishing unknown from expired.
    async fn resolve(&self, token: &TokenId, now: DateTime<Utc>) -> Result<TokenRecord> {
        let record = self
            .get(token)
            .await?
            .ok_or_else(|| PaymentError::TokenNotFound(token.clone()))?;
        if record.is_expired(now) {
            return Err(PaymentError::TokenExpired {
                token: record.token,
                expires_at: record.expires_at,
            });
        }
        Ok(record)
    }
}

#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Appends a new transaction. Fails if the id is already taken.
    async fn put(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, tx_id: &TransactionId) -> Result<Option<Transaction>>;
    /// Transactions for one customer, oldest first.
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Transaction>>;
    /// Atomically moves a `success` transaction to `refunded`.
    async fn mark_refunded(&self, tx_id: &TransactionId, at: DateTime<Utc>) -> Result<Transaction>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

pub type TokenStoreRef = Arc<dyn TokenStore>;
pub type TransactionLedgerRef = Arc<dyn TransactionLedger>;
pub type ClockRef = Arc<dyn Clock>;
pub type RandomSourceRef = Arc<dyn RandomSource>;
