//! Catalog and build-request errors.

use crate::types::ComponentFamily;
use thiserror::Error;

/// Errors from catalog loading, id lookup, and build assembly.
///
/// Schema-version mismatches are deliberately absent: stale exchange
/// documents are upgraded, never rejected.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A referenced component id is not present in the catalog.
    #[error("no {family} component with id '{id}' in catalog")]
    UnknownComponent {
        /// Family the lookup ran against.
        family: ComponentFamily,
        /// The missing id.
        id: String,
    },

    /// A build request omitted a required component field.
    #[error("build request missing required field '{0}'")]
    InvalidConfig(&'static str),

    /// Catalog or build file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
