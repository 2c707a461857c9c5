// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Reconstructor - the full sample-table-to-morphology pipeline.

Runs the stages in order: sample table, connected paths, section splitting,
tree linking, arbor classification, soma building, final assembly. The
pipeline is single-threaded and purely functional over owned data; it runs
to completion or returns a typed error, never a partial morphology.

Assembly is where the structural invariants are asserted: every arbor root
must be parentless, every tree must be cycle-free with consistent
back-pointers, and the per-type section sample counts must at least cover
the raw samples of that type (a sanity bound, not an equality - branch
samples are shared between sections).

Independent morphologies can be reconstructed fully in parallel; each
pipeline run owns all of its state, so [`reconstruct_batch`] simply maps
inputs to runs (with rayon when the `parallel` feature is enabled).
*/

use neuroskel_structures::{
    Arbor, FileFormat, Morphology, SampleType, SectionArena, SectionHandle,
};
use tracing::debug;

use crate::classifier::{classify, label_arbors, promote_primary};
use crate::linker::link_sections;
use crate::paths::build_paths;
use crate::sample_table::{RawSample, SampleTable};
use crate::sections::split_paths;
use crate::soma_builder::build_soma;
use crate::types::{AssemblyError, Diagnostic, ReconstructionResult};

/// The three arbor-forming types, in classification order.
const NEURITE_TYPES: [SampleType; 3] = [
    SampleType::Axon,
    SampleType::BasalDendrite,
    SampleType::ApicalDendrite,
];

/// A successfully reconstructed morphology plus the soft warnings collected
/// along the way.
#[derive(Debug, Clone)]
pub struct Reconstructed {
    pub morphology: Morphology,
    pub diagnostics: Vec<Diagnostic>,
}

/// One-shot pipeline runner for a single morphology file.
#[derive(Debug, Clone)]
pub struct Reconstructor {
    label: String,
    file_format: FileFormat,
}

impl Reconstructor {
    pub fn new(label: impl Into<String>, file_format: FileFormat) -> Self {
        Self {
            label: label.into(),
            file_format,
        }
    }

    /// Reconstruct from SWC lines (the line supplier is external; this takes
    /// anything iterating as string slices).
    pub fn reconstruct_swc_lines<I, S>(&self, lines: I) -> ReconstructionResult<Reconstructed>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (table, diagnostics) = SampleTable::parse_swc_lines(lines)?;
        self.reconstruct_table(table, diagnostics)
    }

    /// Reconstruct from pre-populated records (the HDF5 loader path).
    pub fn reconstruct_raw<I>(&self, records: I) -> ReconstructionResult<Reconstructed>
    where
        I: IntoIterator<Item = RawSample>,
    {
        let (table, diagnostics) = SampleTable::from_raw(records)?;
        self.reconstruct_table(table, diagnostics)
    }

    /// Run the pipeline stages over an already-built sample table.
    pub fn reconstruct_table(
        &self,
        table: SampleTable,
        mut diagnostics: Vec<Diagnostic>,
    ) -> ReconstructionResult<Reconstructed> {
        let mut arena = SectionArena::new();

        for sample_type in NEURITE_TYPES {
            let path_set = build_paths(&table, sample_type);
            split_paths(&table, &path_set, &mut arena, &mut diagnostics)?;
        }

        link_sections(&mut arena, &table, &mut diagnostics)?;

        let promoted = promote_primary(classify(&arena));
        let (axon, basal_dendrites, apical_dendrite) = label_arbors(&promoted, &arena);

        let ordered_roots: Vec<SectionHandle> = axon
            .iter()
            .chain(basal_dendrites.iter())
            .chain(apical_dendrite.iter())
            .map(Arbor::root)
            .collect();

        verify_assembly(&arena, &table, &ordered_roots, &mut diagnostics)?;

        let soma = build_soma(&table, &arena, &ordered_roots, &mut diagnostics);
        let sample_count = table.len() as u32;

        debug!(
            target: "neuroskel",
            "Reconstructed '{}': {} sections, {} stems, {} diagnostics",
            self.label,
            arena.len(),
            ordered_roots.len(),
            diagnostics.len()
        );

        let morphology = Morphology::new(
            soma,
            arena,
            axon,
            basal_dendrites,
            apical_dendrite,
            self.label.clone(),
            self.file_format,
            sample_count,
        );
        Ok(Reconstructed {
            morphology,
            diagnostics,
        })
    }
}

/// Assert the structural invariants on the linked forest.
fn verify_assembly(
    arena: &SectionArena,
    table: &SampleTable,
    roots: &[SectionHandle],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), AssemblyError> {
    for &root in roots {
        let section = arena
            .get(root)
            .ok_or_else(|| AssemblyError::InconsistentTree {
                section: root.0,
                reason: "stale root handle".to_string(),
            })?;
        if !section.is_root() {
            return Err(AssemblyError::InconsistentTree {
                section: root.0,
                reason: "classified arbor root has a parent".to_string(),
            });
        }
        arena
            .validate_tree(root)
            .map_err(|err| AssemblyError::InconsistentTree {
                section: root.0,
                reason: err.to_string(),
            })?;
    }

    // Sanity bound: sections of a type (plus one bridging sample per tree)
    // must cover at least the raw samples of that type
    for sample_type in NEURITE_TYPES {
        let raw = table.count_of_type(sample_type);
        if raw == 0 {
            continue;
        }
        let in_sections: u32 = arena
            .iter()
            .filter(|s| s.sample_type() == sample_type)
            .map(|s| s.samples().len() as u32)
            .sum();
        let trees = arena.roots_of_type(sample_type).len() as u32;
        if in_sections + trees < raw {
            diagnostics.push(Diagnostic::SampleCountMismatch {
                sample_type,
                minimum: raw,
                actual: in_sections + trees,
            });
        }
    }
    Ok(())
}

/// One morphology input for batch reconstruction.
#[derive(Debug, Clone)]
pub struct SwcInput {
    pub label: String,
    pub lines: Vec<String>,
}

/// Reconstruct many morphologies independently.
///
/// With the `parallel` feature each input runs on the rayon pool; pipeline
/// runs share no state, so no synchronization is involved either way.
#[cfg(feature = "parallel")]
pub fn reconstruct_batch(inputs: &[SwcInput]) -> Vec<ReconstructionResult<Reconstructed>> {
    use rayon::prelude::*;
    inputs
        .par_iter()
        .map(|input| {
            Reconstructor::new(input.label.clone(), FileFormat::Swc)
                .reconstruct_swc_lines(&input.lines)
        })
        .collect()
}

/// Reconstruct many morphologies independently (serial fallback).
#[cfg(not(feature = "parallel"))]
pub fn reconstruct_batch(inputs: &[SwcInput]) -> Vec<ReconstructionResult<Reconstructed>> {
    inputs
        .iter()
        .map(|input| {
            Reconstructor::new(input.label.clone(), FileFormat::Swc)
                .reconstruct_swc_lines(&input.lines)
        })
        .collect()
}
