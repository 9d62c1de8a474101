use crate::domain::token::TokenId;
use crate::domain::transaction::TransactionId;
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// `tok_` followed by 128 bits from the OS CSPRNG.
pub fn generate_token_id() -> TokenId {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    TokenId::new(format!("tok_{}", hex::encode(bytes)))
}

pub fn generate_customer_id() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("cust_{}", hex::encode(bytes))
}

/// Issues `txn_<YYYYMMDDHHMMSS>_<16 hex>` ids.
///
/// The upper half of the suffix is a process-wide sequence number, so ids
/// minted concurrently within the same second never collide; the lower half
/// is random.
#[derive(Debug, Default)]
pub struct TransactionIdGenerator {
    sequence: AtomicU64,
}

impl TransactionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> TransactionId {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) as u32;
        let random = rand::thread_rng().next_u32();
        TransactionId::new(format!(
            "txn_{}_{:08x}{:08x}",
            now.format("%Y%m%d%H%M%S"),
            sequence,
            random
        ))
    }
}
