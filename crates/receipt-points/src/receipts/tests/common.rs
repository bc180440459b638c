use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt};
use crate::receipts::store::InMemoryReceiptStore;
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            Item::new("Mountain Dew 12PK", "6.49"),
            Item::new("Emils Cheese Pizza", "12.25"),
            Item::new("Knorr Creamy Chicken", "1.26"),
            Item::new("Doritos Nacho Cheese", "3.35"),
            Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

pub(super) fn corner_market_receipt() -> Receipt {
    Receipt {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![Item::new("Gatorade", "2.25"); 4],
        total: "9.00".to_string(),
    }
}

pub(super) fn build_service() -> (ReceiptService<InMemoryReceiptStore>, Arc<InMemoryReceiptStore>) {
    let store = Arc::new(InMemoryReceiptStore::default());
    let service = ReceiptService::new(store.clone());
    (service, store)
}

pub(super) fn build_router() -> (axum::Router, Arc<InMemoryReceiptStore>) {
    let (service, store) = build_service();
    (receipt_router(Arc::new(service)), store)
}

pub(super) fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload = serde_json::from_slice(&body).expect("json");
    (status, payload)
}
