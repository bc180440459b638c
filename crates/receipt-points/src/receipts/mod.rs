//! Receipt intake, validation, points scoring, and lookup.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Receipt, ReceiptId, ScoredReceipt};
pub use router::receipt_router;
pub use scoring::{PointsBreakdown, PointsComponent, PointsRule};
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoreError};
pub use validation::ReceiptViolation;
