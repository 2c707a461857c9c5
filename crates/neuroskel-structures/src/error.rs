// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common error type for skeleton data operations.
///
/// Covers arena handle misuse and structural violations detected while
/// building or validating a section tree.
///
/// # Examples
/// ```
/// use neuroskel_structures::SkeletonError;
///
/// fn require_samples(count: usize) -> Result<(), SkeletonError> {
///     if count == 0 {
///         return Err(SkeletonError::BadParameters("Section needs >= 1 sample".into()));
///     }
///     Ok(())
/// }
///
/// assert!(require_samples(0).is_err());
/// assert!(require_samples(3).is_ok());
/// ```
#[derive(Debug)]
pub enum SkeletonError {
    /// A section handle does not refer to a live arena slot
    InvalidHandle(u32),
    /// A section was linked to a second parent
    AlreadyParented(u32),
    /// A traversal revisited a section (cycle in parent/child links)
    CyclicTree(u32),
    /// Invalid parameters provided to a function
    BadParameters(String),
    /// Internal error indicating a bug (please report)
    InternalError(String),
}

impl Display for SkeletonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SkeletonError::InvalidHandle(handle) => {
                write!(f, "Invalid section handle: {}", handle)
            }
            SkeletonError::AlreadyParented(handle) => {
                write!(f, "Section {} already has a parent", handle)
            }
            SkeletonError::CyclicTree(handle) => {
                write!(f, "Cycle detected in section tree at section {}", handle)
            }
            SkeletonError::BadParameters(msg) => write!(f, "Bad Parameters: {}", msg),
            SkeletonError::InternalError(msg) => write!(
                f,
                "Internal Error, please raise an issue on Github: {}",
                msg
            ),
        }
    }
}
impl Error for SkeletonError {}
