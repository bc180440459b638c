use std::collections::HashSet;

use super::common::*;
use crate::receipts::domain::ReceiptId;
use crate::receipts::scoring::score;
use crate::receipts::service::ReceiptServiceError;
use crate::receipts::validation::ReceiptViolation;

#[test]
fn submit_stores_receipt_and_points_together() {
    let (service, store) = build_service();
    let receipt = target_receipt();

    let scored = service.submit(receipt.clone()).expect("submission succeeds");

    assert_eq!(scored.points, 28);
    assert_eq!(service.points(&scored.id).expect("points stored"), 28);
    assert_eq!(
        store.receipt(&scored.id).expect("store readable"),
        Some(receipt)
    );
}

#[test]
fn stored_points_match_direct_scoring() {
    let (service, _store) = build_service();
    let receipt = corner_market_receipt();
    let expected = score(&receipt);

    let scored = service.submit(receipt).expect("submission succeeds");
    for _ in 0..3 {
        assert_eq!(service.points(&scored.id).expect("points stored"), expected);
    }
}

#[test]
fn identical_receipts_receive_distinct_ids() {
    let (service, store) = build_service();

    let ids: HashSet<ReceiptId> = (0..20)
        .map(|_| service.submit(target_receipt()).expect("submission succeeds").id)
        .collect();

    assert_eq!(ids.len(), 20);
    assert_eq!(store.len(), 20);
}

#[test]
fn submit_rejects_invalid_receipts_without_storing() {
    let (service, store) = build_service();
    let mut receipt = target_receipt();
    receipt.total = "35.3".to_string();

    match service.submit(receipt) {
        Err(ReceiptServiceError::Invalid(ReceiptViolation::TotalFormat)) => {}
        other => panic!("expected invalid total, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[test]
fn points_for_unknown_id_is_not_found() {
    let (service, _store) = build_service();
    let missing = ReceiptId("never-issued".to_string());

    match service.points(&missing) {
        Err(ReceiptServiceError::NotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn malformed_item_price_is_accepted_and_scored_as_zero() {
    let (service, _store) = build_service();
    let mut receipt = target_receipt();
    // "Emils Cheese Pizza" normally earns 3 description points.
    receipt.items[1].price = "abc".to_string();

    let scored = service.submit(receipt).expect("submission succeeds");
    assert_eq!(scored.points, 25);
}
