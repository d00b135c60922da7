use rekap_map::MappingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
