use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("unknown report kind '{0}' (expected sirs or puskesad)")]
    UnknownReportKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
