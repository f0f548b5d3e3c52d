//! CSV export for per-episode rollout records

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, rollout::EpisodeRecord};

/// One CSV row; the move list is flattened to a space-separated string so
/// the file stays a plain rectangular table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRow {
    pub episode: usize,
    pub policy: String,
    pub length: usize,
    pub total_weight: f64,
    pub total_return: f64,
    pub completed_tree: bool,
    pub moves: String,
}

impl From<&EpisodeRecord> for EpisodeRow {
    fn from(record: &EpisodeRecord) -> Self {
        let moves = record
            .moves
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        EpisodeRow {
            episode: record.episode,
            policy: record.policy.clone(),
            length: record.length,
            total_weight: record.total_weight,
            total_return: record.total_return,
            completed_tree: record.completed_tree,
            moves,
        }
    }
}

/// Exporter for episode record CSV files
pub struct EpisodeCsvExporter;

impl EpisodeCsvExporter {
    /// Write one row per episode record, headers included.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or a row cannot be
    /// serialized.
    pub fn write<P: AsRef<Path>>(path: P, records: &[EpisodeRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in records {
            writer.serialize(EpisodeRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read rows back from a CSV file written by [`EpisodeCsvExporter::write`].
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or a row fails to parse.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<EpisodeRow>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }
}
