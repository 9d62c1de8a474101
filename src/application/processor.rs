use crate::domain::outcome::OutcomeEngine;
use crate::domain::ports::{ClockRef, RandomSourceRef, TokenStoreRef, TransactionLedgerRef};
use crate::domain::transaction::{Amount, CardSummary, PaymentRequest, Transaction};
use crate::error::Result;
use crate::infrastructure::ids::TransactionIdGenerator;
use tracing::{info, warn};

/// Charges a token and records the outcome in the ledger.
///
/// Declines are not errors: every call that gets past token and amount checks
/// appends exactly one transaction and returns it, whatever its status.
pub struct PaymentProcessor {
    tokens: TokenStoreRef,
    ledger: TransactionLedgerRef,
    outcomes: OutcomeEngine,
    clock: ClockRef,
    ids: TransactionIdGenerator,
}

impl PaymentProcessor {
    pub fn new(
        tokens: TokenStoreRef,
        ledger: TransactionLedgerRef,
        random: RandomSourceRef,
        clock: ClockRef,
    ) -> Self {
        Self {
            tokens,
            ledger,
            outcomes: OutcomeEngine::new(random),
            clock,
            ids: TransactionIdGenerator::new(),
        }
    }

    pub async fn process(&self, request: PaymentRequest) -> Result<Transaction> {
        let now = self.clock.now();

        let token = self.tokens.resolve(&request.token, now).await.inspect_err(|err| {
            warn!(token = %request.token, code = err.code(), "payment rejected");
        })?;
        let amount = Amount::new(request.amount).inspect_err(|err| {
            warn!(token = %request.token, amount = %request.amount, code = err.code(), "payment rejected");
        })?;

        if token.customer_id != request.customer_id {
            warn!(
                token = %token.token,
                token_customer = %token.customer_id,
                customer_id = %request.customer_id,
                "token charged for a different customer"
            );
        }

        let outcome = self.outcomes.decide(&amount);
        let currency = request.currency_or_default();

        let tx = Transaction {
            transaction_id: self.ids.next_id(now),
            status: outcome.status,
            amount,
            currency,
            customer_id: request.customer_id,
            token: token.token,
            description: request.description,
            message: outcome.message.to_string(),
            processed_at: now,
            refunded_at: None,
            card_info: CardSummary {
                last_four: token.last_four_digits,
                card_type: token.card_type,
            },
        };

        self.ledger.put(tx.clone()).await?;

        info!(
            transaction_id = %tx.transaction_id,
            customer_id = %tx.customer_id,
            amount = %tx.amount,
            currency = %tx.currency,
            status = %tx.status,
            "payment processed"
        );
        Ok(tx)
    }
}
