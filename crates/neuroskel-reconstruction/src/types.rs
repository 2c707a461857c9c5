// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for reconstruction operations.

Hard errors abort the pipeline for a file and surface as a typed result - no
partial morphology is ever returned, since a half-built tree is unsafe to
traverse. Soft conditions are collected into a [`Diagnostic`] list attached
to the successful result; the caller decides whether to log or ignore them.
*/

use std::fmt::Display;

use neuroskel_structures::{SampleType, SkeletonError};
use serde::{Deserialize, Serialize};

/// Result type for reconstruction operations
pub type ReconstructionResult<T> = Result<T, ReconstructionError>;

/// Errors raised while building the sample table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed line {line}: expected 7 whitespace-separated fields")]
    MalformedLine { line: usize },

    #[error("Bad numeric field '{field}' on line {line}")]
    BadField { line: usize, field: &'static str },

    #[error("Duplicate sample id {id} on line {line}")]
    DuplicateSampleId { id: u32, line: usize },
}

/// Errors raised while linking sections into trees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Section {section} matches more than one candidate parent")]
    MultipleParents { section: u32 },
}

/// Errors raised while assembling the final morphology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("Inconsistent tree at section {section}: {reason}")]
    InconsistentTree { section: u32, reason: String },
}

/// Top-level error for the reconstruction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconstructionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl From<SkeletonError> for ReconstructionError {
    fn from(err: SkeletonError) -> Self {
        match err {
            SkeletonError::AlreadyParented(section) => {
                ReconstructionError::Link(LinkError::MultipleParents { section })
            }
            SkeletonError::CyclicTree(section) => {
                ReconstructionError::Assembly(AssemblyError::InconsistentTree {
                    section,
                    reason: "cycle in parent/child links".to_string(),
                })
            }
            other => ReconstructionError::Assembly(AssemblyError::InconsistentTree {
                section: 0,
                reason: other.to_string(),
            }),
        }
    }
}

/// Soft warnings collected during a successful reconstruction.
///
/// None of these abort the pipeline; they flag degenerate input the
/// reconstruction tolerated by policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A sample declared an unrecognized type code and was normalized to
    /// basal dendrite
    UnrecognizedType { id: u32, raw_code: i32 },
    /// The soma has no profile points; its radius fell back to the centroid
    /// sample's declared radius (or 0 without one)
    SomaWithoutProfile,
    /// A section holding a single sample (degenerate stub at a branch)
    ShortSection { section: u32 },
    /// A root section's first sample points at a parent that is neither the
    /// no-parent sentinel nor a soma sample
    SuspiciousRootSentinel { id: u32, parent_id: i32 },
    /// A sample references a parent id absent from the table
    DanglingParent { id: u32, parent_id: i32 },
    /// An arbor's reconstructed sample count fell below the raw count of its
    /// type (samples were lost on the way into sections)
    SampleCountMismatch {
        sample_type: SampleType,
        minimum: u32,
        actual: u32,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedType { id, raw_code } => write!(
                f,
                "Sample {} declared unrecognized type code {}, normalized to basal dendrite",
                id, raw_code
            ),
            Diagnostic::SomaWithoutProfile => {
                write!(f, "Soma has no profile points, radius is a fallback value")
            }
            Diagnostic::ShortSection { section } => {
                write!(f, "Section {} holds a single sample", section)
            }
            Diagnostic::SuspiciousRootSentinel { id, parent_id } => write!(
                f,
                "Root sample {} points at parent {} which is not a soma sample",
                id, parent_id
            ),
            Diagnostic::DanglingParent { id, parent_id } => write!(
                f,
                "Sample {} references parent {} which is absent from the table",
                id, parent_id
            ),
            Diagnostic::SampleCountMismatch {
                sample_type,
                minimum,
                actual,
            } => write!(
                f,
                "{} sections hold {} samples, below the {} raw samples of that type",
                sample_type, actual, minimum
            ),
        }
    }
}
