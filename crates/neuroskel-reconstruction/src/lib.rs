// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroskel Reconstruction

Turns a flat, per-sample morphology description (SWC lines or HDF5-style
raw records) into the strongly-typed skeleton defined by
`neuroskel-structures`: a soma plus a forest of arbors, each a tree of
branch-free sections.

## Pipeline

```text
raw lines / raw records
    -> SampleTable       (indexed store, holes explicit)
    -> PathSet           (maximal connected runs per type)
    -> SectionArena      (paths split at fork points)
    -> linked forest     (parent/child resolved by terminal adjacency)
    -> classified arbors (promotion policy for duplicate types)
    -> Morphology        (soma + arbors + metadata, immutable)
```

Hard errors (`ParseError`, `LinkError`, `AssemblyError`) abort the pipeline
for that file; soft conditions are returned as a [`Diagnostic`] list next to
the finished morphology. The pipeline holds no global state - independent
morphologies reconstruct fully in parallel via [`reconstruct_batch`].

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classifier;
pub mod linker;
pub mod paths;
pub mod reconstructor;
pub mod sample_table;
pub mod sections;
pub mod soma_builder;
pub mod types;

// Re-export commonly used types
pub use classifier::{classify, label_arbors, promote_primary, Classified, Promoted};
pub use linker::link_sections;
pub use paths::{build_paths, PathSet};
pub use reconstructor::{reconstruct_batch, Reconstructed, Reconstructor, SwcInput};
pub use sample_table::{RawSample, SampleTable};
pub use sections::split_paths;
pub use soma_builder::build_soma;
pub use types::{
    AssemblyError, Diagnostic, LinkError, ParseError, ReconstructionError, ReconstructionResult,
};
