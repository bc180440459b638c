use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Receipt, ReceiptId, ScoredReceipt};
use super::scoring;
use super::store::{ReceiptStore, StoreError};
use super::validation::{self, ReceiptViolation};

/// Service composing validation, scoring, id generation, and the receipt store.
pub struct ReceiptService<S> {
    store: Arc<S>,
}

impl<S> ReceiptService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and score a receipt, then store it under a fresh identifier.
    ///
    /// Nothing is stored when validation fails.
    pub fn submit(&self, receipt: Receipt) -> Result<ScoredReceipt, ReceiptServiceError> {
        if let Err(violation) = validation::check(&receipt) {
            warn!(%violation, retailer = %receipt.retailer, "receipt rejected");
            return Err(violation.into());
        }

        let points = scoring::score(&receipt);
        let id = ReceiptId::generate();
        self.store.put(id.clone(), receipt, points)?;

        info!(receipt_id = %id, points, "receipt processed");
        Ok(ScoredReceipt { id, points })
    }

    /// Points previously computed for `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("invalid receipt: {0}")]
    Invalid(#[from] ReceiptViolation),
    #[error("no receipt stored for {0}")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
