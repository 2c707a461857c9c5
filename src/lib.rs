// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroskel - Neuron Morphology Skeleton Reconstruction

Converts flat, per-sample morphology descriptions (SWC files or HDF5-style
point/structure arrays) into strongly-typed hierarchical skeletons: a soma
plus a forest of arbors (axon, basal dendrites, apical dendrite), each arbor
a tree of branch-free sections with explicit parent/child links.

## Quick Start

```toml
[dependencies]
neuroskel = "0.0.1-beta.1"
```

```rust
use neuroskel::{FileFormat, Reconstructor};

let lines = [
    "# simple Y-branch",
    "1 1 0.0 0.0 0.0 5.0 -1",
    "2 3 0.0 0.0 1.0 1.0 1",
    "3 3 0.0 1.0 2.0 1.0 2",
    "4 3 1.0 1.0 2.0 1.0 2",
];
let result = Reconstructor::new("demo", FileFormat::Swc)
    .reconstruct_swc_lines(lines)
    .expect("well-formed input");

let morphology = &result.morphology;
assert_eq!(morphology.basal_dendrites().len(), 1);
for arbor in morphology.arbors() {
    morphology.for_each_section(arbor, |section| {
        println!("{}: {} samples", section.handle(), section.samples().len());
    });
}
```

## Feature Flags

- **`parallel`**: batch reconstruction across independent morphologies on
  the rayon pool (`reconstruct_batch`)

## Crates

- `neuroskel-structures`: the skeleton data model (samples, sections,
  arbors, soma, morphology) with read-only accessors and DFS traversal
- `neuroskel-reconstruction`: the reconstruction pipeline and its error
  and diagnostic taxonomy

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use neuroskel_structures::{
    Arbor, ArborStats, FileFormat, Morphology, Sample, SampleId, SampleType, Section,
    SectionArena, SectionHandle, SkeletonError, Soma, NO_PARENT, SOMA_ANCHOR_ID,
};

pub use neuroskel_reconstruction::{
    reconstruct_batch, AssemblyError, Diagnostic, LinkError, ParseError, RawSample,
    Reconstructed, ReconstructionError, ReconstructionResult, Reconstructor, SampleTable,
    SwcInput,
};

/// Convenience prelude for consumers that want the whole surface.
pub mod prelude {
    pub use crate::{
        Arbor, ArborStats, Diagnostic, FileFormat, Morphology, RawSample, Reconstructed,
        ReconstructionError, ReconstructionResult, Reconstructor, Sample, SampleId, SampleTable,
        SampleType, Section, SectionArena, SectionHandle, Soma, SwcInput,
    };
}
