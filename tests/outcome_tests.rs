use mock_payments::domain::transaction::TransactionStatus;
use mock_payments::infrastructure::random::{SeededRandom, ThreadRandom};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;

async fn statuses_for(amount: Decimal, runs: usize) -> Vec<TransactionStatus> {
    // The real random source: special amounts must not depend on it.
    let harness = common::harness_with(Arc::new(ThreadRandom));
    let token = common::issue_token(&harness, "cust_outcomes").await;

    let mut statuses = Vec::with_capacity(runs);
    for _ in 0..runs {
        let tx = harness
            .engine
            .process_payment(common::payment(&token, "cust_outcomes", amount))
            .await
            .unwrap();
        statuses.push(tx.status);
    }
    statuses
}

#[tokio::test]
async fn test_special_amounts_are_deterministic() {
    let cases = [
        (dec!(0.01), TransactionStatus::FailedInsufficientFunds),
        (dec!(0.02), TransactionStatus::FailedDeclined),
        (dec!(0.03), TransactionStatus::Pending),
        (dec!(15000.00), TransactionStatus::PendingManualReview),
        (dec!(10000.00), TransactionStatus::PendingManualReview),
    ];

    for (amount, expected) in cases {
        let statuses = statuses_for(amount, 100).await;
        assert!(
            statuses.iter().all(|status| *status == expected),
            "amount {amount} produced {statuses:?}"
        );
    }
}

#[tokio::test]
async fn test_pinned_draws_cover_both_branches() {
    let success = common::harness(common::SUCCESS_DRAW);
    let token = common::issue_token(&success, "cust_a").await;
    let tx = success
        .engine
        .process_payment(common::payment(&token, "cust_a", dec!(99.99)))
        .await
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Success);
    assert_eq!(tx.message, "Payment processed successfully");

    let failure = common::harness(common::FAILURE_DRAW);
    let token = common::issue_token(&failure, "cust_a").await;
    let tx = failure
        .engine
        .process_payment(common::payment(&token, "cust_a", dec!(99.99)))
        .await
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::FailedDeclined);
    assert_eq!(tx.message, "Card declined by issuer");
}

#[tokio::test]
async fn test_generic_amount_success_rate_converges() {
    const RUNS: usize = 10_000;

    let harness = common::harness_with(Arc::new(SeededRandom::new(2026)));
    let token = common::issue_token(&harness, "cust_stats").await;

    let mut successes = 0usize;
    for _ in 0..RUNS {
        let tx = harness
            .engine
            .process_payment(common::payment(&token, "cust_stats", dec!(99.99)))
            .await
            .unwrap();
        match tx.status {
            TransactionStatus::Success => successes += 1,
            TransactionStatus::FailedDeclined => {}
            other => panic!("unexpected status for a generic amount: {other}"),
        }
    }

    let rate = successes as f64 / RUNS as f64;
    assert!((0.87..=0.93).contains(&rate), "success rate {rate}");
}
