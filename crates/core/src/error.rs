// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Error types for grind-core operations.

use thiserror::Error;

/// All possible errors that can occur in grind-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate session id: {0}")]
    DuplicateId(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("invalid amount: {0}\n  hint: amounts use at most two decimal places, e.g. 19.99")]
    InvalidAmount(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for grind-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
