//! Global error handling for srcbundle
//!
//! This module provides a centralized error type that can represent errors
//! from every stage of the bundling pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// Global error type for srcbundle operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// The language request was empty or named nothing recognizable
    #[error("At least one programming language or the word 'all' must be provided{}", detail(.0))]
    InvalidSelection(String),

    /// Creating or writing the archive failed
    #[error("Error creating zip file {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// A source file could not be read while annotating the bundle
    #[error("Failed to read source file {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Appending annotation text to the bundle failed
    #[error("Failed to append to bundle {}: {source}", .path.display())]
    Annotate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn detail(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" ({})", reason)
    }
}

/// Specialized Result type for srcbundle operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Creates a BundleError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::BundleError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
