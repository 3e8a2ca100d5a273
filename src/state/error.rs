//! UI state-specific error types.

use crate::store::StoreError;

/// Errors that can occur while turning user input into store changes.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The current list has no selected row
    #[error("Nothing selected")]
    NothingSelected,

    /// A form field could not be parsed
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// The store rejected the change
    #[error(transparent)]
    Store(#[from] StoreError),
}
