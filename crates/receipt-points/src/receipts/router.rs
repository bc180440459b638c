use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, warn};

use super::domain::{Receipt, ReceiptId};
use super::service::{ReceiptService, ReceiptServiceError};
use super::store::ReceiptStore;

pub const INVALID_RECEIPT_DESCRIPTION: &str = "The receipt is invalid. Please verify input.";
pub const RECEIPT_NOT_FOUND_DESCRIPTION: &str = "No receipt found for that ID.";

#[derive(Debug, Serialize)]
struct ProcessReceiptResponse {
    id: ReceiptId,
}

#[derive(Debug, Serialize)]
struct PointsResponse {
    points: u64,
}

#[derive(Debug, Serialize)]
struct DescriptionResponse {
    description: &'static str,
}

/// Router exposing receipt submission and points lookup.
pub fn receipt_router<S>(service: Arc<ReceiptService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

// The body is decoded by hand so malformed JSON and a missing content type get the same
// 400 payload as a receipt that fails validation.
pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    body: Bytes,
) -> Response
where
    S: ReceiptStore + 'static,
{
    let receipt: Receipt = match serde_json::from_slice(&body) {
        Ok(receipt) => receipt,
        Err(err) => {
            warn!(error = %err, "receipt body could not be decoded");
            return describe(StatusCode::BAD_REQUEST, INVALID_RECEIPT_DESCRIPTION);
        }
    };

    match service.submit(receipt) {
        Ok(scored) => (
            StatusCode::OK,
            Json(ProcessReceiptResponse { id: scored.id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    match service.points(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ReceiptServiceError) -> Response {
    match err {
        ReceiptServiceError::Invalid(_) => {
            describe(StatusCode::BAD_REQUEST, INVALID_RECEIPT_DESCRIPTION)
        }
        ReceiptServiceError::NotFound(_) => {
            describe(StatusCode::NOT_FOUND, RECEIPT_NOT_FOUND_DESCRIPTION)
        }
        ReceiptServiceError::Store(err) => {
            error!(error = %err, "receipt store failure");
            describe(
                StatusCode::INTERNAL_SERVER_ERROR,
                "The receipt store is unavailable. Please retry later.",
            )
        }
    }
}

fn describe(status: StatusCode, description: &'static str) -> Response {
    (status, Json(DescriptionResponse { description })).into_response()
}
