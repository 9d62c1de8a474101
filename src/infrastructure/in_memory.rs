use crate::domain::ports::{TokenStore, TransactionLedger};
use crate::domain::token::{TokenId, TokenRecord};
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// A thread-safe in-memory token store.
///
/// Backed by a sharded `DashMap`, so lookups on different tokens do not
/// contend on a single lock. Tokens are never removed; the store lives for
/// the lifetime of the process.
#[derive(Default, Clone)]
pub struct InMemoryTokenStore {
    tokens: Arc<DashMap<TokenId, TokenRecord>>,
}

impl InMemoryTokenStore {
    /// Creates a new, empty in-memory token store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn put(&self, token: TokenRecord) -> Result<()> {
        match self.tokens.entry(token.token.clone()) {
            Entry::Occupied(entry) => Err(PaymentError::internal(format!(
                "token id collision: {}",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(token);
                Ok(())
            }
        }
    }

    async fn get(&self, token: &TokenId) -> Result<Option<TokenRecord>> {
        Ok(self.tokens.get(token).map(|entry| entry.value().clone()))
    }
}

/// A thread-safe in-memory transaction ledger.
///
/// Records live in a sharded map keyed by transaction id; a second map keeps
/// each customer's transaction ids in insertion order. Refunds mutate a record
/// under its shard's write guard, so two concurrent refunds of the same
/// transaction cannot both succeed.
///
/// A customer's listing follows the order in which `put` calls completed,
/// which for concurrent payments need not match transaction id order.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLedger {
    transactions: Arc<DashMap<TransactionId, Transaction>>,
    by_customer: Arc<DashMap<String, Vec<TransactionId>>>,
}

impl InMemoryTransactionLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryTransactionLedger {
    async fn put(&self, tx: Transaction) -> Result<()> {
        let tx_id = tx.transaction_id.clone();
        let customer_id = tx.customer_id.clone();

        match self.transactions.entry(tx_id.clone()) {
            Entry::Occupied(_) => {
                return Err(PaymentError::internal(format!(
                    "transaction id collision: {tx_id}"
                )));
            }
            Entry::Vacant(entry) => {
                // Index while the record's shard is still write-locked, so a
                // `get` that sees the record also sees it in the listing.
                let _record = entry.insert(tx);
                self.by_customer.entry(customer_id).or_default().push(tx_id);
            }
        }
        Ok(())
    }

    async fn get(&self, tx_id: &TransactionId) -> Result<Option<Transaction>> {
        Ok(self.transactions.get(tx_id).map(|entry| entry.value().clone()))
    }

    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        // Copy the ids out first so no guard on `by_customer` is held while
        // reading `transactions`.
        let ids = match self.by_customer.get(customer_id) {
            Some(ids) => ids.value().clone(),
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.transactions.get(id).map(|entry| entry.value().clone()))
            .collect())
    }

    async fn mark_refunded(&self, tx_id: &TransactionId, at: DateTime<Utc>) -> Result<Transaction> {
        let mut entry = self
            .transactions
            .get_mut(tx_id)
            .ok_or_else(|| PaymentError::TransactionNotFound(tx_id.clone()))?;
        entry.refund(at)?;
        Ok(entry.value().clone())
    }
}
