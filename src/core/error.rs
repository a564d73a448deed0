//! Typed errors for the deals query crate
//!
//! The query path itself returns `anyhow::Result` so that store failures reach
//! the caller untouched. The types here cover the failures this crate raises on
//! its own: configuration loading, strict parameter parsing, and storage-level
//! conditions detected before or after the driver call.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration parsing and I/O
//! - [`ValidationError`]: strict parsing of sort parameters
//! - [`StorageError`]: queries a backend refuses, documents it cannot decode
//!
//! # Example
//!
//! ```rust,ignore
//! use deals::prelude::*;
//!
//! match "cheapest".parse::<SortField>() {
//!     Ok(field) => println!("sorting by {}", field),
//!     Err(DealsError::Validation(ValidationError::UnknownSortField { value })) => {
//!         println!("unsupported sort field {}", value);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type for the crate
#[derive(Debug)]
pub enum DealsError {
    /// Configuration errors
    Config(ConfigError),

    /// Parameter validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),
}

impl fmt::Display for DealsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealsError::Config(e) => write!(f, "{}", e),
            DealsError::Validation(e) => write!(f, "{}", e),
            DealsError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DealsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DealsError::Config(e) => Some(e),
            DealsError::Validation(e) => Some(e),
            DealsError::Storage(e) => Some(e),
        }
    }
}

impl DealsError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DealsError::Config(_) => "CONFIG_ERROR",
            DealsError::Validation(e) => e.error_code(),
            DealsError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    IoError {
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DealsError {
    fn from(err: ConfigError) -> Self {
        DealsError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised by strict parsing of sort parameters
#[derive(Debug)]
pub enum ValidationError {
    /// Sort field is not one of price, percent, name, date
    UnknownSortField {
        value: String,
    },

    /// Sort direction is not one of asc, desc
    UnknownSortDirection {
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownSortField { value } => {
                write!(
                    f,
                    "Unknown sort field '{}' (expected price, percent, name or date)",
                    value
                )
            }
            ValidationError::UnknownSortDirection { value } => {
                write!(f, "Unknown sort direction '{}' (expected asc or desc)", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownSortField { .. } => "UNKNOWN_SORT_FIELD",
            ValidationError::UnknownSortDirection { .. } => "UNKNOWN_SORT_DIRECTION",
        }
    }
}

impl From<ValidationError> for DealsError {
    fn from(err: ValidationError) -> Self {
        DealsError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// The backend refused to run the query
    QueryError {
        backend: String,
        message: String,
    },

    /// A stored record could not be decoded into a deal
    DecodeError {
        backend: String,
        message: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::DecodeError { backend, message } => {
                write!(f, "{} decode error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for DealsError {
    fn from(err: StorageError) -> Self {
        DealsError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for DealsError {
    fn from(err: std::io::Error) -> Self {
        DealsError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for DealsError {
    fn from(err: serde_yaml::Error) -> Self {
        DealsError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for fallible crate operations outside the query path
pub type DealsResult<T> = Result<T, DealsError>;
