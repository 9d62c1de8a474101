use super::card::CardNetwork;
use super::customer::Customer;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 24;

pub fn token_ttl() -> Duration {
    Duration::hours(TOKEN_TTL_HOURS)
}

/// Opaque identifier standing in for a tokenized card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tokenized card. Immutable once issued; expiry is derived from time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub token: TokenId,
    pub last_four_digits: String,
    pub card_type: CardNetwork,
    pub card_holder: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub customer_id: String,
    pub customer: Customer,
}

impl TokenRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Debug view of the token as of `now`.
    pub fn info(&self, now: DateTime<Utc>) -> TokenInfo {
        TokenInfo {
            token: self.token.clone(),
            last_four_digits: self.last_four_digits.clone(),
            card_type: self.card_type,
            customer_id: self.customer_id.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            is_valid: !self.is_expired(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub token: TokenId,
    pub last_four_digits: String,
    pub card_type: CardNetwork,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_valid: bool,
}
