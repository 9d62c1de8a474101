use super::processor::PaymentProcessor;
use super::refund::RefundHandler;
use super::tokenizer::Tokenizer;
use crate::domain::card::CardDetails;
use crate::domain::customer::Customer;
use crate::domain::ports::{ClockRef, RandomSourceRef, TokenStoreRef, TransactionLedgerRef};
use crate::domain::token::{TokenId, TokenInfo, TokenRecord};
use crate::domain::transaction::{PaymentRequest, Transaction, TransactionId};
use crate::error::{PaymentError, Result};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::in_memory::{InMemoryTokenStore, InMemoryTransactionLedger};
use std::sync::Arc;

/// The main entry point of the mock payment backend.
///
/// `PaymentEngine` exposes the six caller-facing operations and wires the
/// tokenizer, processor and refund handler to shared stores. It is `Send +
/// Sync` and meant to be shared behind an `Arc` across concurrent requests.
pub struct PaymentEngine {
    tokenizer: Tokenizer,
    processor: PaymentProcessor,
    refunds: RefundHandler,
    ledger: TransactionLedgerRef,
}

impl PaymentEngine {
    /// Creates a new `PaymentEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The store for issued tokens.
    /// * `ledger` - The transaction ledger.
    /// * `clock` - Time source for token expiry and timestamps.
    /// * `random` - Draws for amounts with no fixed outcome.
    pub fn new(
        tokens: TokenStoreRef,
        ledger: TransactionLedgerRef,
        clock: ClockRef,
        random: RandomSourceRef,
    ) -> Self {
        Self {
            tokenizer: Tokenizer::new(tokens.clone(), clock.clone()),
            processor: PaymentProcessor::new(tokens, ledger.clone(), random, clock.clone()),
            refunds: RefundHandler::new(ledger.clone(), clock),
            ledger,
        }
    }

    /// In-memory stores on the system clock.
    pub fn in_memory(random: RandomSourceRef) -> Self {
        Self::new(
            Arc::new(InMemoryTokenStore::new()),
            Arc::new(InMemoryTransactionLedger::new()),
            Arc::new(SystemClock),
            random,
        )
    }

    pub async fn tokenize(&self, card: CardDetails, customer: Customer) -> Result<TokenRecord> {
        self.tokenizer.tokenize(card, customer).await
    }

    pub async fn process_payment(&self, request: PaymentRequest) -> Result<Transaction> {
        self.processor.process(request).await
    }

    pub async fn get_transaction(&self, tx_id: &TransactionId) -> Result<Transaction> {
        self.ledger
            .get(tx_id)
            .await?
            .ok_or_else(|| PaymentError::TransactionNotFound(tx_id.clone()))
    }

    /// Transactions for `customer_id`, oldest first. Unknown customers have none.
    pub async fn get_customer_transactions(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        self.ledger.list_by_customer(customer_id).await
    }

    pub async fn refund_transaction(&self, tx_id: &TransactionId) -> Result<Transaction> {
        self.refunds.refund(tx_id).await
    }

    pub async fn get_token_info(&self, token: &TokenId) -> Result<TokenInfo> {
        self.tokenizer.token_info(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::BillingAddress;
    use crate::domain::transaction::TransactionStatus;
    use crate::error::ErrorKind;
    use crate::infrastructure::random::FixedDraw;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn card() -> CardDetails {
        CardDetails {
            card_number: "4532015112830366".to_string(),
            card_holder: "Jane Doe".to_string(),
            expiry_month: 12,
            expiry_year: 2099,
            cvv: "123".to_string(),
        }
    }

    fn customer(id: &str) -> Customer {
        Customer {
            customer_id: Some(id.to_string()),
            email: "jane@example.com".to_string(),
            phone: Some("+1-555-0100".to_string()),
            billing_address: BillingAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "US".to_string(),
            },
        }
    }

    fn payment(token: &TokenId, customer_id: &str, amount: Decimal) -> PaymentRequest {
        PaymentRequest {
            token: token.clone(),
            amount,
            currency: None,
            customer_id: customer_id.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_tokenize_pay_refund_flow() {
        let engine = PaymentEngine::in_memory(Arc::new(FixedDraw(0.5)));

        let token = engine.tokenize(card(), customer("cust_1")).await.unwrap();
        let tx = engine
            .process_payment(payment(&token.token, "cust_1", dec!(42.00)))
            .await
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Success);

        let fetched = engine.get_transaction(&tx.transaction_id).await.unwrap();
        assert_eq!(fetched, tx);

        let refunded = engine.refund_transaction(&tx.transaction_id).await.unwrap();
        assert_eq!(refunded.status, TransactionStatus::Refunded);
        assert!(refunded.refunded_at.is_some());

        let again = engine.refund_transaction(&tx.transaction_id).await.unwrap_err();
        assert_eq!(again.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_refund_of_declined_transaction() {
        let engine = PaymentEngine::in_memory(Arc::new(FixedDraw(0.5)));
        let token = engine.tokenize(card(), customer("cust_1")).await.unwrap();
        let tx = engine
            .process_payment(payment(&token.token, "cust_1", dec!(0.02)))
            .await
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::FailedDeclined);

        let err = engine.refund_transaction(&tx.transaction_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "transaction_not_refundable");

        let unchanged = engine.get_transaction(&tx.transaction_id).await.unwrap();
        assert_eq!(unchanged.status, TransactionStatus::FailedDeclined);
    }

    #[tokio::test]
    async fn test_missing_lookups() {
        let engine = PaymentEngine::in_memory(Arc::new(FixedDraw(0.5)));
        let missing = TransactionId::from("txn_missing");

        let err = engine.get_transaction(&missing).await.unwrap_err();
        assert_eq!(err.code(), "transaction_not_found");
        let err = engine.refund_transaction(&missing).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = engine.get_token_info(&TokenId::from("tok_missing")).await.unwrap_err();
        assert_eq!(err.code(), "token_not_found");
        assert!(engine.get_customer_transactions("nobody").await.unwrap().is_empty());
    }
}
