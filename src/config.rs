//! File locations and parser settings.

use std::path::PathBuf;

use crate::parse::{DEFAULT_KEY_PREFIX, RecordParser};

/// Settings shared by the CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetlogConfig {
    /// Key prefix marking record entries in the source.
    pub key_prefix: String,
    /// Properties-style source file.
    pub source_path: PathBuf,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Final-state snapshot file.
    pub snapshot_path: PathBuf,
    /// Diet-less export file.
    pub export_path: PathBuf,
}

impl Default for PetlogConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            source_path: PathBuf::from("data/pets.properties"),
            database_path: PathBuf::from("data/pets.db"),
            snapshot_path: PathBuf::from("data/final_state.bin"),
            export_path: PathBuf::from("data/export.json"),
        }
    }
}

impl PetlogConfig {
    /// Parser honoring [`PetlogConfig::key_prefix`].
    pub fn parser(&self) -> RecordParser {
        RecordParser::new(self.key_prefix.clone())
    }
}
