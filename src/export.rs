//! Data export for downstream analysis

pub mod episode_csv;

pub use episode_csv::EpisodeCsvExporter;
