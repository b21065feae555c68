//! Error types for kinkeeper.
//!
//! This module defines all error types used throughout the kinkeeper crate.
//! Every failure a user can trigger maps to one variant with a message fit
//! to show them directly.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kinkeeper operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// Another member already holds this name (case-insensitive).
    #[error("a family member named \"{name}\" already exists; choose a different name")]
    DuplicateName {
        /// The conflicting name as submitted.
        name: String,
    },

    /// No member matches the given id or name.
    #[error("no family member matches \"{key}\"")]
    NotFound {
        /// The id or name that was looked up.
        key: String,
    },

    /// A required field is missing or empty on submission.
    #[error("invalid member: {message}")]
    Validation {
        /// Which field(s) failed and why.
        message: String,
    },

    // === Capture Errors ===
    /// An audio input could not be acquired.
    #[error("cannot access {device}: {instructions}")]
    DeviceAccess {
        /// Name of the input that failed.
        device: String,
        /// What the user can do about it.
        instructions: String,
    },

    /// An embedded media payload could not be decoded.
    #[error("bad media payload: {message}")]
    MediaDecode {
        /// Description of what went wrong.
        message: String,
    },

    // === Import/Export Errors ===
    /// An import document was malformed; nothing was applied.
    #[error("cannot import: {message}")]
    ImportFormat {
        /// Description of the format problem.
        message: String,
    },

    // === Store Errors ===
    /// Failed to open or create the store database.
    #[error("failed to open store at {path}: {source}")]
    StoreOpen {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A store read or write failed.
    #[error("store operation failed: {0}")]
    StoreQuery(#[from] rusqlite::Error),

    /// Failed to migrate the store schema.
    #[error("store migration failed: {message}")]
    StoreMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for kinkeeper operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate-name error for the given name.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a not-found error for the given lookup key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a device-access error with remediation instructions.
    #[must_use]
    pub fn device_access(device: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self::DeviceAccess {
            device: device.into(),
            instructions: instructions.into(),
        }
    }

    /// Create an import-format error.
    #[must_use]
    pub fn import_format(message: impl Into<String>) -> Self {
        Self::ImportFormat {
            message: message.into(),
        }
    }

    /// Create a media-decode error.
    #[must_use]
    pub fn media_decode(message: impl Into<String>) -> Self {
        Self::MediaDecode {
            message: message.into(),
        }
    }

    /// Check if this error is a duplicate-name conflict.
    #[must_use]
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a device-access failure.
    #[must_use]
    pub fn is_device_access(&self) -> bool {
        matches!(self, Self::DeviceAccess { .. })
    }

    /// Check if this error came from the persistent store.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::StoreOpen { .. } | Self::StoreQuery(_))
    }
}
