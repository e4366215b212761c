//! Error taxonomy for loading and joining the leaderboard tables

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// Expected column absent from an input table.
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    /// A metadata table holds the same join key twice.
    #[error("table '{table}' has duplicate key '{key}'")]
    DuplicateKey { table: &'static str, key: String },

    #[error("required input '{name}' not found")]
    MissingInput { name: &'static str },

    #[error("unknown intervention type '{0}'")]
    UnknownIntervention(String),
}

pub type Result<T> = std::result::Result<T, Error>;
