// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Morphology samples - the per-point payload of a skeleton.

A sample is one point along a neuronal skeleton: a 3D position, a radius, a
morphological type tag and a back-pointer to its parent sample. Samples are
immutable once parsed; all tree structure is reconstructed later from the
parent back-pointers.
*/

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a sample within one morphology file.
///
/// Unique per file. Files may contain holes (unused ids); consumers index a
/// sparse table and must tolerate absent entries.
pub type SampleId = u32;

/// Sentinel parent value marking a sample with no parent (the soma anchor).
pub const NO_PARENT: i32 = -1;

/// Conventional id of the soma anchor sample in SWC files.
///
/// A neurite sample whose parent id equals this value emanates directly from
/// the soma profile and roots its arbor.
pub const SOMA_ANCHOR_ID: SampleId = 1;

/// Morphological type tag of a sample.
///
/// The first four variants map to SWC type codes 1-4. `ForkPoint`,
/// `EndPoint` and `Custom` cover the extended SWC vocabulary (codes 5-7);
/// they are kept for completeness of the type vocabulary but unrecognized
/// codes are normalized away during table construction, see
/// [`SampleType::from_raw_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleType {
    Soma,
    Axon,
    BasalDendrite,
    ApicalDendrite,
    Undefined,
    ForkPoint,
    EndPoint,
    Custom,
}

impl SampleType {
    /// Map a raw SWC type code to a `SampleType`, applying the fallback
    /// normalization policy.
    ///
    /// Codes 1-4 map to their SWC meaning. Code 0 with a defined parent, and
    /// every code outside the recognized range, normalize to
    /// `BasalDendrite`. Code 0 without a parent stays `Undefined` (it is a
    /// structural anchor, not a drawable segment).
    ///
    /// Returns the resolved type and whether normalization was applied, so
    /// the caller can surface a diagnostic instead of silently re-typing.
    pub fn from_raw_code(code: i32, has_parent: bool) -> (Self, bool) {
        match code {
            1 => (SampleType::Soma, false),
            2 => (SampleType::Axon, false),
            3 => (SampleType::BasalDendrite, false),
            4 => (SampleType::ApicalDendrite, false),
            0 if !has_parent => (SampleType::Undefined, false),
            _ => (SampleType::BasalDendrite, true),
        }
    }

    /// The SWC type code this variant writes back to, where one exists.
    pub fn swc_code(&self) -> Option<i32> {
        match self {
            SampleType::Soma => Some(1),
            SampleType::Axon => Some(2),
            SampleType::BasalDendrite => Some(3),
            SampleType::ApicalDendrite => Some(4),
            SampleType::Undefined => Some(0),
            SampleType::ForkPoint => Some(5),
            SampleType::EndPoint => Some(6),
            SampleType::Custom => Some(7),
        }
    }

    /// True for the three arbor-forming types (axon, basal, apical).
    pub fn is_neurite(&self) -> bool {
        matches!(
            self,
            SampleType::Axon | SampleType::BasalDendrite | SampleType::ApicalDendrite
        )
    }
}

impl Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SampleType::Soma => "Soma",
            SampleType::Axon => "Axon",
            SampleType::BasalDendrite => "Basal Dendrite",
            SampleType::ApicalDendrite => "Apical Dendrite",
            SampleType::Undefined => "Undefined",
            SampleType::ForkPoint => "Fork Point",
            SampleType::EndPoint => "End Point",
            SampleType::Custom => "Custom",
        };
        write!(f, "{}", name)
    }
}

/// One point of a neuronal skeleton.
///
/// `parent_id` keeps the raw back-pointer semantics of the source file:
/// [`NO_PARENT`] marks a sample with no parent. Position and radius are
/// opaque floating-point payloads at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub sample_type: SampleType,
    pub position: [f64; 3],
    pub radius: f64,
    pub parent_id: i32,
}

impl Sample {
    pub fn new(
        id: SampleId,
        sample_type: SampleType,
        position: [f64; 3],
        radius: f64,
        parent_id: i32,
    ) -> Self {
        Self {
            id,
            sample_type,
            position,
            radius,
            parent_id,
        }
    }

    /// True when this sample has no parent (the soma anchor of the file).
    pub fn is_root(&self) -> bool {
        self.parent_id == NO_PARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_codes() {
        assert_eq!(SampleType::from_raw_code(1, false), (SampleType::Soma, false));
        assert_eq!(SampleType::from_raw_code(2, true), (SampleType::Axon, false));
        assert_eq!(
            SampleType::from_raw_code(3, true),
            (SampleType::BasalDendrite, false)
        );
        assert_eq!(
            SampleType::from_raw_code(4, true),
            (SampleType::ApicalDendrite, false)
        );
    }

    #[test]
    fn test_unrecognized_code_normalizes_to_basal() {
        let (ty, normalized) = SampleType::from_raw_code(7, true);
        assert_eq!(ty, SampleType::BasalDendrite);
        assert!(normalized);

        let (ty, normalized) = SampleType::from_raw_code(12, true);
        assert_eq!(ty, SampleType::BasalDendrite);
        assert!(normalized);
    }

    #[test]
    fn test_zero_code_depends_on_parent() {
        // 0 with a defined parent falls back to basal dendrite
        let (ty, normalized) = SampleType::from_raw_code(0, true);
        assert_eq!(ty, SampleType::BasalDendrite);
        assert!(normalized);

        // 0 without a parent is a structural anchor and stays undefined
        let (ty, normalized) = SampleType::from_raw_code(0, false);
        assert_eq!(ty, SampleType::Undefined);
        assert!(!normalized);
    }

    #[test]
    fn test_sample_root() {
        let root = Sample::new(1, SampleType::Soma, [0.0, 0.0, 0.0], 5.0, NO_PARENT);
        assert!(root.is_root());

        let child = Sample::new(2, SampleType::Axon, [0.0, 0.0, 1.0], 1.0, 1);
        assert!(!child.is_root());
    }
}
