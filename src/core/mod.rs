//! In-memory record store and index helpers.

/// Secondary index aliases and helpers.
pub mod indices;
/// Id-ordered in-memory store.
pub mod store;
