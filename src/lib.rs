//! Animal-record ingestion with duplicate-free reconciliation and a
//! fixed-layout final-state snapshot.
//!
//! # Examples
//!
//! Ingesting a source into [`core::store::MemoryStore`]:
//! ```
//! use petlog::{
//!     core::store::MemoryStore,
//!     parse::RecordParser,
//!     persist::RecordStore,
//!     pipeline::{complete::DeclineAll, ingest::ingest_source},
//! };
//!
//! let source = "\
//! mascota.1=P001,Rex,Mammal,Canidae,Canis,lupus,Carnivore,5,30.2,friendly
//! mascota.2=P002,Spike
//! mascota.3=P001,Rex,Mammal,Canidae,Canis,lupus,Carnivore,5,30.2,friendly
//! ";
//! let mut store = MemoryStore::new();
//! let report = ingest_source(source, &RecordParser::default(), &mut store, &mut DeclineAll)
//!     .expect("ingest");
//! assert_eq!(report.counts.inserted, 1);
//! assert_eq!(report.counts.duplicate, 1);
//! assert_eq!(report.counts.abandoned, 1);
//! assert_eq!(store.len().expect("len"), 1);
//! ```
//!
//! Writing the final-state snapshot from a SQLite store:
//! ```no_run
//! use petlog::{codec::snapshot::save_snapshot, persist::sqlite::SqliteStore};
//!
//! let store = SqliteStore::open("data/pets.db").expect("open sqlite");
//! let written = save_snapshot("data/final_state.bin", &store).expect("snapshot");
//! println!("{written} records saved");
//! ```
#![deny(missing_docs)]

/// Snapshot and export encoders.
pub mod codec;
/// File locations and parser settings.
pub mod config;
/// In-memory store and index helpers.
pub mod core;
/// Source text parsing.
pub mod parse;
/// Store abstraction and SQLite implementation.
pub mod persist;
/// Completion, reconciliation, and batch ingestion.
pub mod pipeline;
/// Animal record and patch types.
pub mod record;
/// Shared primitive types and enums.
pub mod types;
/// Completeness predicate.
pub mod validate;
