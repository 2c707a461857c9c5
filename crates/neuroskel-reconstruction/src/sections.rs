// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Section Splitter - subdivide connected paths at fork points.

A path sample that is also the start of some other path is, by construction,
a branch point. The splitter collects those fork samples (always beginning
with the path's first element and ending with its last), and each
consecutive pair delimits exactly one section: the samples between the pair,
inclusive of both ends, walked in path order.

Two policies matter here:
- the injected head of a path delimits its first section but only becomes a
  section sample when it refers to a same-type sample (the shared branch
  point of a sibling path). A head referring to a soma sample is dropped, so
  root sections start at the first neurite sample.
- a section with only one sample is legal (degenerate stub at a branch) and
  must not be dropped - the tree linker relies on its presence to
  re-establish adjacency. It is flagged as a short section instead.
*/

use neuroskel_structures::{Sample, SectionArena, SectionHandle};
use tracing::trace;

use crate::paths::PathSet;
use crate::sample_table::SampleTable;
use crate::types::{Diagnostic, ReconstructionError};

/// Split every path of a [`PathSet`] into atomic sections inside `arena`.
///
/// Returns the handles of the created sections in creation (path) order.
pub fn split_paths(
    table: &SampleTable,
    path_set: &PathSet,
    arena: &mut SectionArena,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<SectionHandle>, ReconstructionError> {
    let mut handles = Vec::new();
    let sample_type = path_set.sample_type();

    for path in path_set.paths() {
        // Fork samples on this path, in path order; positions 0 and len-1
        // are terminal members by construction
        let fork_positions: Vec<usize> = (0..path.len())
            .filter(|&idx| path_set.terminals().contains(&path[idx]))
            .collect();

        for pair in fork_positions.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let mut samples: Vec<Sample> = Vec::with_capacity(end - start + 1);

            for idx in start..=end {
                let id = path[idx];
                match table.get(id) {
                    Some(sample) if sample.sample_type == sample_type => {
                        samples.push(sample.clone());
                    }
                    Some(_) => {
                        // Foreign-type bridge (soma anchor or a type
                        // transition): delimits the section, not a member
                    }
                    None => {
                        // Only the injected head can be absent; the sample
                        // it bridges into is the next path element
                        let child = path.get(idx + 1).copied().unwrap_or(id);
                        diagnostics.push(Diagnostic::DanglingParent {
                            id: child,
                            parent_id: id as i32,
                        });
                    }
                }
            }

            if samples.is_empty() {
                continue;
            }
            let single_sample = samples.len() == 1;
            let handle = arena.add_section(sample_type, samples)?;
            if single_sample {
                diagnostics.push(Diagnostic::ShortSection { section: handle.0 });
            }
            handles.push(handle);
        }
    }

    trace!(
        target: "neuroskel",
        "Split {} {} paths into {} sections",
        path_set.paths().len(),
        sample_type,
        handles.len()
    );
    Ok(handles)
}
