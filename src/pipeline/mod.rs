//! Ingestion pipeline stages.

/// Partial-record completion collaborators.
pub mod complete;
/// Batch ingestion and reporting.
pub mod ingest;
/// Duplicate-rejecting reconciliation gate.
pub mod reconcile;
