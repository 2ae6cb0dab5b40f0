// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route pattern compilation errors.

/// A route pattern that cannot be compiled.
///
/// Positions are byte offsets into the pattern string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// An optional group opened with `(` is never closed.
    #[error("optional group opened at byte {position} is never closed")]
    UnclosedGroup {
        /// Offset of the unmatched `(`.
        position: usize,
    },
    /// A `)` appears without a matching `(`.
    #[error("unexpected `)` at byte {position}")]
    UnexpectedClose {
        /// Offset of the unmatched `)`.
        position: usize,
    },
}

impl PatternError {
    /// Returns the byte offset the error points at.
    #[must_use]
    pub fn position(&self) -> usize {
        match *self {
            Self::UnclosedGroup { position } | Self::UnexpectedClose { position } => position,
        }
    }
}
