use crate::domain::card::{CardDetails, validate_card};
use crate::domain::customer::Customer;
use crate::domain::ports::{ClockRef, TokenStoreRef};
use crate::domain::token::{TokenId, TokenInfo, TokenRecord, token_ttl};
use crate::error::{PaymentError, Result};
use crate::infrastructure::ids::{generate_customer_id, generate_token_id};
use tracing::{info, warn};

/// Exchanges validated card data for an opaque, expiring token.
pub struct Tokenizer {
    store: TokenStoreRef,
    clock: ClockRef,
}

impl Tokenizer {
    pub fn new(store: TokenStoreRef, clock: ClockRef) -> Self {
        Self { store, clock }
    }

    /// Validates `card`, issues a token for it and records it in the store.
    ///
    /// The raw card number and CVV are dropped here; only the last four digits
    /// and the detected network survive on the token.
    pub async fn tokenize(&self, card: CardDetails, customer: Customer) -> Result<TokenRecord> {
        let created_at = self.clock.now();

        let validated = validate_card(&card, created_at).map_err(|rejection| {
            warn!(code = rejection.code(), reason = %rejection, "card rejected");
            PaymentError::InvalidCard(rejection)
        })?;

        let customer_id = customer
            .customer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generate_customer_id);

        let record = TokenRecord {
            token: generate_token_id(),
            last_four_digits: validated.last_four,
            card_type: validated.network,
            card_holder: card.card_holder,
            created_at,
            expires_at: created_at + token_ttl(),
            customer_id: customer_id.clone(),
            customer: Customer {
                customer_id: Some(customer_id),
                ..customer
            },
        };

        self.store.put(record.clone()).await?;

        info!(
            token = %record.token,
            customer_id = %record.customer_id,
            card_type = %record.card_type,
            last_four = %record.last_four_digits,
            "card tokenized"
        );
        Ok(record)
    }

    /// Token metadata for debugging. Expired tokens are still reported.
    pub async fn token_info(&self, token: &TokenId) -> Result<TokenInfo> {
        let record = self
            .store
            .get(token)
            .await?
            .ok_or_else(|| PaymentError::TokenNotFound(token.clone()))?;
        Ok(record.info(self.clock.now()))
    }
}
