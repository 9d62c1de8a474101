use mock_payments::domain::transaction::{PaymentRequest, TransactionId};
use rust_decimal_macros::dec;
use std::collections::HashSet;

mod common;

#[tokio::test]
async fn test_customer_listing_is_ordered_and_scoped() {
    let harness = common::harness(common::SUCCESS_DRAW);
    let alice = common::issue_token(&harness, "cust_alice").await;
    let bob = common::issue_token(&harness, "cust_bob").await;

    let mut alice_ids = Vec::new();
    for (i, amount) in [dec!(1.00), dec!(0.01), dec!(2.50), dec!(12000)].into_iter().enumerate() {
        let tx = harness
            .engine
            .process_payment(common::payment(&alice, "cust_alice", amount))
            .await
            .unwrap();
        alice_ids.push(tx.transaction_id);

        if i % 2 == 0 {
            harness
                .engine
                .process_payment(common::payment(&bob, "cust_bob", dec!(3.00)))
                .await
                .unwrap();
        }
    }

    let listed: Vec<TransactionId> = harness
        .engine
        .get_customer_transactions("cust_alice")
        .await
        .unwrap()
        .into_iter()
        .map(|tx| tx.transaction_id)
        .collect();
    assert_eq!(listed, alice_ids);

    let bob_listed = harness.engine.get_customer_transactions("cust_bob").await.unwrap();
    assert_eq!(bob_listed.len(), 2);
    assert!(bob_listed.iter().all(|tx| tx.customer_id == "cust_bob"));
}

#[tokio::test]
async fn test_transaction_record_carries_card_summary_and_metadata() {
    let harness = common::harness(common::SUCCESS_DRAW);
    let record = harness
        .engine
        .tokenize(common::card("374245455400126"), common::customer("cust_meta"))
        .await
        .unwrap();

    let tx = harness
        .engine
        .process_payment(PaymentRequest {
            token: record.token.clone(),
            amount: dec!(19.99),
            currency: Some("eur".to_string()),
            customer_id: "cust_meta".to_string(),
            description: Some("Annual plan".to_string()),
        })
        .await
        .unwrap();

    let fetched = harness.engine.get_transaction(&tx.transaction_id).await.unwrap();
    assert_eq!(fetched.currency, "EUR");
    assert_eq!(fetched.description.as_deref(), Some("Annual plan"));
    assert_eq!(fetched.token, record.token);
    assert_eq!(fetched.processed_at, common::start());

    let json = serde_json::to_value(&fetched).unwrap();
    assert_eq!(json["card_info"]["last_four"], "0126");
    assert_eq!(json["card_info"]["card_type"], "American Express");
    assert_eq!(json["amount"], "19.99");
    assert!(
        json["transaction_id"]
            .as_str()
            .unwrap()
            .starts_with("txn_20260601120000_")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_payments_get_unique_ids() {
    let harness = common::harness(common::SUCCESS_DRAW);
    let token = common::issue_token(&harness, "cust_busy").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = harness.engine.clone();
            let token = token.clone();
            tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..50 {
                    let tx = engine
                        .process_payment(common::payment(&token, "cust_busy", dec!(4.20)))
                        .await
                        .unwrap();
                    ids.push(tx.transaction_id);
                }
                ids
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(seen.insert(id));
        }
    }
    assert_eq!(seen.len(), 400);

    let listed = harness.engine.get_customer_transactions("cust_busy").await.unwrap();
    assert_eq!(listed.len(), 400);
}
