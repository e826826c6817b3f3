//! Unified error type for `PantryBuddy`.
//!
//! Every layer returns [`Result<T>`]. The entry service is the only place that turns store
//! outcomes into caller-facing failures; the API layer maps those to HTTP responses.

use std::fmt;
use thiserror::Error;

/// Request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Item name
    Name,
    /// Item quantity
    Quantity,
    /// Unit of measure
    Unit,
    /// Meaning of the package date
    DateLabelType,
}

impl InputField {
    /// Field name as it appears in request payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::Unit => "unit",
            Self::DateLabelType => "dateLabelType",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All failures surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No resolved caller identity
    #[error("Unauthorized")]
    Unauthorized,

    /// A request field failed validation
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Which field failed
        field: InputField,
        /// Short human-readable reason
        message: String,
    },

    /// Request body could not be read as the expected JSON shape
    #[error("Malformed request: {message}")]
    MalformedRequest {
        /// Decoder explanation
        message: String,
    },

    /// Entry does not exist, is not active, or belongs to someone else
    #[error("Pantry item not found")]
    NotFound {
        /// Requested entry id
        entry_id: i64,
    },

    /// Store-level invariant violation
    #[error("Validation error: {message}")]
    Validation {
        /// Which invariant was violated
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (listener bind, serve loop)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`].
    pub(crate) fn invalid(field: InputField, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
