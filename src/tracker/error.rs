//! Tracker error types

use crate::store::StoreError;
use crate::tracker::types::TokenId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The change could not be written to the store
    #[error("Persistence failed: {0}")]
    Persist(#[from] StoreError),

    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
