// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroskel Structures

The most core library of neuroskel: defines the skeleton data types shared
by the reconstruction pipeline and its consumers (renderers, analysis,
exporters).

- `Sample` / `SampleType` - the per-point payload parsed from SWC or HDF5
- `Section` / `SectionArena` - branch-free runs of samples, stored in a
  handle-indexed arena so parent/child links never form ownership cycles
- `Arbor` - a rooted tree of sections of one morphological type
- `Soma` - centroid, mean radius and profile points of the cell body
- `Morphology` - the immutable assembled skeleton with read-only accessors

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod skeleton;

pub use error::SkeletonError;
pub use skeleton::{
    Arbor, ArborStats, FileFormat, Morphology, Sample, SampleId, SampleType, Section,
    SectionArena, SectionHandle, Soma, NO_PARENT, SOMA_ANCHOR_ID,
};
