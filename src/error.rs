// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.

use thiserror::Error;

/// Errors raised by the fallible theory primitives.
///
/// The pack builder and the transposer never surface these to their callers;
/// they degrade to empty results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("invalid note spelling '{0}'")]
    InvalidNote(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("cannot read a chord root from '{0}'")]
    UnparseableChord(String),
    #[error("mode index {0} out of range (0-6)")]
    InvalidMode(usize),
}

/// Result alias for theory operations
pub type Result<T> = std::result::Result<T, TheoryError>;
