//! Receipt validation, loyalty-points scoring, and the in-memory receipt store that backs the
//! HTTP service.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
