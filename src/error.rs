// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy, from most local to most global.
//!
//! A field failing a comparison is not an error at all; the candidate is
//! just dropped for that field. A posting blob that decodes to nothing loses
//! that key's contribution and the request continues. Store failures split
//! into transient (propagate, caller retries) and permanent (record against
//! the AC, keep the rest of the request). Cancellation is flow control, not
//! failure, and never surfaces here.

use thiserror::Error;

/// A posting-list blob that conforms to none of the supported encodings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated varint at byte {offset}")]
    TruncatedVarint { offset: usize },
    #[error("varint exceeds maximum length at byte {offset}")]
    OversizedVarint { offset: usize },
    #[error("varint count {got} does not match companion count {expected}")]
    CountMismatch { got: usize, expected: usize },
}

/// Whether a store failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Timeouts, connection resets: the caller may retry the request.
    Transient,
    /// Unknown AC, missing table: retrying will not help.
    Permanent,
}

/// Failure reported by an index or row store implementation.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Transient,
            message: message.into(),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Permanent,
            message: message.into(),
        }
    }

    /// True when the caller should retry the whole request.
    pub fn is_retryable(&self) -> bool {
        self.kind == StoreErrorKind::Transient
    }
}

/// Request-level failure. Permanent per-AC store errors do not appear here;
/// they ride back inside the response as per-AC indicators.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A transient store failure; the request should be retried as a whole.
    #[error("store failure (retriable): {0}")]
    Store(#[from] StoreError),
}
