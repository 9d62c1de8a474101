#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use mock_payments::application::engine::PaymentEngine;
use mock_payments::domain::card::CardDetails;
use mock_payments::domain::customer::{BillingAddress, Customer};
use mock_payments::domain::ports::RandomSourceRef;
use mock_payments::domain::token::TokenId;
use mock_payments::domain::transaction::PaymentRequest;
use mock_payments::infrastructure::clock::ManualClock;
use mock_payments::infrastructure::in_memory::{InMemoryTokenStore, InMemoryTransactionLedger};
use mock_payments::infrastructure::random::FixedDraw;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Draw that lands in the success branch.
pub const SUCCESS_DRAW: f64 = 0.25;
/// Draw that lands in the random-failure branch.
pub const FAILURE_DRAW: f64 = 0.95;

pub struct Harness {
    pub engine: Arc<PaymentEngine>,
    pub clock: Arc<ManualClock>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub fn harness_with(random: RandomSourceRef) -> Harness {
    let clock = Arc::new(ManualClock::new(start()));
    let engine = PaymentEngine::new(
        Arc::new(InMemoryTokenStore::new()),
        Arc::new(InMemoryTransactionLedger::new()),
        clock.clone(),
        random,
    );
    Harness {
        engine: Arc::new(engine),
        clock,
    }
}

pub fn harness(draw: f64) -> Harness {
    harness_with(Arc::new(FixedDraw(draw)))
}

pub fn card(number: &str) -> CardDetails {
    CardDetails {
        card_number: number.to_string(),
        card_holder: "Jane Doe".to_string(),
        expiry_month: 12,
        expiry_year: 2030,
        cvv: "123".to_string(),
    }
}

pub fn customer(id: &str) -> Customer {
    Customer {
        customer_id: Some(id.to_string()),
        email: format!("{id}@example.com"),
        phone: None,
        billing_address: BillingAddress {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
        },
    }
}

pub fn payment(token: &TokenId, customer_id: &str, amount: Decimal) -> PaymentRequest {
    PaymentRequest {
        token: token.clone(),
        amount,
        currency: None,
        customer_id: customer_id.to_string(),
        description: None,
    }
}

/// Tokenizes a Visa card for `customer_id` and returns the token id.
pub async fn issue_token(harness: &Harness, customer_id: &str) -> TokenId {
    harness
        .engine
        .tokenize(card("4532015112830366"), customer(customer_id))
        .await
        .expect("tokenize")
        .token
}
