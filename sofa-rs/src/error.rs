//! Error types for SOFA operations.
//!
//! This module provides the [`Error`] enum covering all failure modes when
//! reading and validating SOFA files, along with a convenient [`Result`]
//! type alias.
//!
//! Checks that answer "is this file of the kind I need?" return `bool` and
//! never surface these errors; accessors that read data do.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for SOFA operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or validating a SOFA file.
#[derive(Error, Debug)]
pub enum Error {
    /// The storage handle could not be opened.
    #[error("Failed to open SOFA file {path}: {reason}")]
    OpenFailed {
        /// Path to the file that could not be opened.
        path: PathBuf,
        /// Message reported by the storage backend.
        reason: String,
    },

    /// A named attribute, variable or dimension does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was looked up ("attribute", "variable", "dimension").
        kind: &'static str,
        /// Name that was requested.
        name: String,
    },

    /// A buffer or shape does not match the declared shape of a variable.
    #[error("Shape mismatch for '{name}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Variable being read.
        name: String,
        /// Declared shape (or required element count as a 1-element shape).
        expected: Vec<usize>,
        /// Shape or buffer length supplied by the caller.
        found: Vec<usize>,
    },

    /// A variable disagrees with the size of a governing dimension.
    #[error(
        "Dimension '{dimension}' of variable '{variable}' has size {found}, expected {expected}"
    )]
    DimensionMismatch {
        /// Symbolic dimension name (R, E, M, N, ...).
        dimension: String,
        /// Offending variable.
        variable: String,
        /// Size the dimension is governed by.
        expected: usize,
        /// Size the variable reports.
        found: usize,
    },

    /// A global attribute does not identify the expected convention.
    #[error("Convention mismatch on '{attribute}': expected '{expected}', found '{found}'")]
    ConventionMismatch {
        /// Attribute compared (e.g. "SOFAConventions").
        attribute: String,
        /// Expected value.
        expected: String,
        /// Value read from the file.
        found: String,
    },

    /// Required structure is absent or inconsistent.
    #[error("Invalid SOFA structure: {reason}")]
    Validation {
        /// Description of what is missing or inconsistent.
        reason: String,
    },

    /// A variable has a rank this layer cannot index.
    #[error("Variable '{name}' has unsupported rank {rank}")]
    InvalidRank {
        /// Variable name.
        name: String,
        /// Number of declared dimensions.
        rank: usize,
    },

    /// An attribute holds a value outside its vocabulary.
    #[error("Attribute '{name}' has unrecognised value '{value}'")]
    InvalidAttribute {
        /// Attribute name (e.g. "ReceiverPosition:Units").
        name: String,
        /// Value found.
        value: String,
    },

    /// The storage backend failed while reading.
    #[error("Read error: {message}")]
    ReadError {
        /// Description of the read error.
        message: String,
    },
}

impl Error {
    /// Create an OpenFailed error for the given path.
    pub fn open_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OpenFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error for a global or variable attribute.
    pub fn attribute_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "attribute",
            name: name.into(),
        }
    }

    /// Create a NotFound error for a variable.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "variable",
            name: name.into(),
        }
    }

    /// Create a NotFound error for a dimension.
    pub fn dimension_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "dimension",
            name: name.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        name: impl Into<String>,
        expected: impl Into<Vec<usize>>,
        found: impl Into<Vec<usize>>,
    ) -> Self {
        Self::ShapeMismatch {
            name: name.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a ConventionMismatch error.
    pub fn convention_mismatch(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ConventionMismatch {
            attribute: attribute.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a Validation error with the given reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create an InvalidAttribute error.
    pub fn invalid_attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a ReadError.
    pub fn read_error(message: impl Into<String>) -> Self {
        Self::ReadError {
            message: message.into(),
        }
    }

    /// True for the "missing attribute or variable" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
