use std::path::PathBuf;

use thiserror::Error;

use crate::field::LogicalField;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error(
        "no column found for required field '{field}' (available columns: {}){}",
        .available.join(", "),
        .suggestion.as_deref().map(|s| format!("; did you mean '{s}'?")).unwrap_or_default()
    )]
    UnresolvedField {
        field: LogicalField,
        available: Vec<String>,
        suggestion: Option<String>,
    },

    #[error("failed to read alias file {path}: {source}")]
    AliasRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse alias file {path}: {source}")]
    AliasParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown field '{key}' in alias file (expected one of: {expected})")]
    UnknownAliasField { key: String, expected: String },
}

pub type Result<T> = std::result::Result<T, MappingError>;
