//! Sequential batch ingestion: parse, complete, reconcile.

use std::{io, path::Path};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    parse::{LineOutcome, RecordParser, SkipReason},
    persist::{RecordStore, StoreError},
    validate::is_complete,
};

use super::{
    complete::{Completion, RecordCompleter},
    reconcile::{Reconciled, ReconciliationGate},
};

/// Failures that stop a batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source could not be read.
    #[error("reading source: {0}")]
    Io(#[from] io::Error),
    /// The store failed while reconciling the entry on `line`. Entries before
    /// it have already been applied.
    #[error("store failure at line {line}: {source}")]
    Store {
        /// 1-based source line.
        line: usize,
        /// Store error.
        #[source]
        source: StoreError,
    },
}

/// What happened to one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Stored. `completed` is true when the completer filled it in.
    Inserted {
        /// Went through the completer.
        completed: bool,
    },
    /// Dropped because the id was already stored.
    Duplicate {
        /// Went through the completer.
        completed: bool,
    },
    /// The completer gave up on the record.
    Abandoned,
    /// The completer returned a record that is still partial.
    Unresolved,
    /// No record could be built from the line.
    Skipped(SkipReason),
    /// The key does not carry the expected prefix.
    Ignored,
}

/// Per-line outcome with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// 1-based source line.
    pub line: usize,
    /// Entry key; empty for skipped lines.
    pub key: String,
    /// Record id; empty when no record was built.
    pub id: String,
    /// Outcome.
    pub outcome: EntryOutcome,
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestCounts {
    /// Lines that produced a candidate record.
    pub parsed: usize,
    /// Candidates completed by the completer and reconciled.
    pub completed: usize,
    /// Candidates the completer gave up on.
    pub abandoned: usize,
    /// Candidates still partial after completion.
    pub unresolved: usize,
    /// Records stored.
    pub inserted: usize,
    /// Records dropped as duplicates.
    pub duplicate: usize,
    /// Lines that produced no record.
    pub skipped: usize,
    /// Lines with a foreign key.
    pub ignored: usize,
}

/// Batch result: one entry per non-blank, non-comment source line, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Per-line outcomes.
    pub entries: Vec<EntryReport>,
    /// Totals.
    pub counts: IngestCounts,
}

impl IngestReport {
    fn push(&mut self, line: usize, key: String, id: String, outcome: EntryOutcome) {
        let c = &mut self.counts;
        match &outcome {
            EntryOutcome::Inserted { completed } => {
                c.inserted += 1;
                c.completed += usize::from(*completed);
            }
            EntryOutcome::Duplicate { completed } => {
                c.duplicate += 1;
                c.completed += usize::from(*completed);
            }
            EntryOutcome::Abandoned => c.abandoned += 1,
            EntryOutcome::Unresolved => c.unresolved += 1,
            EntryOutcome::Skipped(_) => c.skipped += 1,
            EntryOutcome::Ignored => c.ignored += 1,
        }
        self.entries.push(EntryReport {
            line,
            key,
            id,
            outcome,
        });
    }

    /// One-line summary of the counts.
    pub fn summary(&self) -> String {
        let c = &self.counts;
        format!(
            "parsed {}, completed {}, abandoned {}, unresolved {}, inserted {}, duplicate {}, skipped {}, ignored {}",
            c.parsed, c.completed, c.abandoned, c.unresolved, c.inserted, c.duplicate, c.skipped, c.ignored
        )
    }
}

/// Ingests `text` into `store`, one line at a time.
///
/// Partial records go to `completer`; only complete records reach the
/// reconciliation gate. A store failure stops the batch.
pub fn ingest_source<S, C>(
    text: &str,
    parser: &RecordParser,
    store: &mut S,
    completer: &mut C,
) -> Result<IngestReport, IngestError>
where
    S: RecordStore + ?Sized,
    C: RecordCompleter + ?Sized,
{
    let mut report = IngestReport::default();
    let mut gate = ReconciliationGate::new();

    for outcome in parser.parse_source(text) {
        let entry = match outcome {
            LineOutcome::Entry(entry) => entry,
            LineOutcome::Ignored { line, key } => {
                report.push(line, key, String::new(), EntryOutcome::Ignored);
                continue;
            }
            LineOutcome::Skipped { line, reason } => {
                report.push(line, String::new(), String::new(), EntryOutcome::Skipped(reason));
                continue;
            }
        };
        report.counts.parsed += 1;

        let line = entry.line;
        let (record, completed) = if is_complete(&entry.record) {
            (entry.record, false)
        } else {
            let id = entry.record.id.clone();
            match completer.complete(entry.record) {
                Completion::Abandoned => {
                    info!(line, %id, "completion abandoned");
                    report.push(line, entry.key, id, EntryOutcome::Abandoned);
                    continue;
                }
                Completion::Completed(rec) if rec.id.is_empty() => {
                    info!(line, %id, "completer cleared the id, abandoned");
                    report.push(line, entry.key, id, EntryOutcome::Abandoned);
                    continue;
                }
                Completion::Completed(rec) if !is_complete(&rec) => {
                    warn!(line, id = %rec.id, "record still incomplete after completion");
                    report.push(line, entry.key, rec.id, EntryOutcome::Unresolved);
                    continue;
                }
                Completion::Completed(rec) => (rec, true),
            }
        };

        let id = record.id.clone();
        let outcome = gate
            .reconcile(record, store)
            .map_err(|source| IngestError::Store { line, source })?;
        let outcome = match outcome {
            Reconciled::Inserted => EntryOutcome::Inserted { completed },
            Reconciled::Duplicate => EntryOutcome::Duplicate { completed },
        };
        report.push(line, entry.key, id, outcome);
    }

    info!(summary = %report.summary(), "ingestion finished");
    Ok(report)
}

/// Reads `path` and ingests it. A missing file is an empty batch.
pub fn ingest_file<S, C>(
    path: impl AsRef<Path>,
    parser: &RecordParser,
    store: &mut S,
    completer: &mut C,
) -> Result<IngestReport, IngestError>
where
    S: RecordStore + ?Sized,
    C: RecordCompleter + ?Sized,
{
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "source not found, nothing to ingest");
            return Ok(IngestReport::default());
        }
        Err(err) => return Err(err.into()),
    };
    ingest_source(&text, parser, store, completer)
}
