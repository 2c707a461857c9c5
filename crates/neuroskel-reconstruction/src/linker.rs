// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Tree Linker - match sections into parent/child trees.

Adjacency is "first sample of section == last sample of some other section
of the same type". The naive formulation is a double loop over sections,
O(n^2) per morphology; this implementation indexes sections by terminal
sample id in a hash map instead, which produces the identical parent/child
relation (including multiple-parent detection) in one pass.

A section matching no candidate parent is a root. Roots are expected to hang
off the soma: their first sample's parent id is either the no-parent
sentinel or names a soma sample (conventionally id 1). A root whose recorded
parent is neither is kept as a root but flagged with a soft warning - the
dual sentinel convention of SWC files is not trustworthy enough to guess at.

A section matching more than one candidate parent indicates malformed or
duplicated sample ids in the source file; that is detected and surfaced,
never silently overwritten.
*/

use ahash::AHashMap;
use neuroskel_structures::{SampleId, SampleType, SectionArena, SectionHandle, NO_PARENT};
use tracing::trace;

use crate::sample_table::SampleTable;
use crate::types::{Diagnostic, LinkError};

/// Resolve parent/child links between all sections in the arena.
///
/// # Errors
///
/// `LinkError::MultipleParents` if any section matches more than one
/// candidate parent.
pub fn link_sections(
    arena: &mut SectionArena,
    table: &SampleTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), LinkError> {
    // Index sections by their terminal (last) sample id
    let mut by_last_id: AHashMap<SampleId, Vec<SectionHandle>> = AHashMap::new();
    for section in arena.iter() {
        by_last_id
            .entry(section.last_sample_id())
            .or_default()
            .push(section.handle());
    }

    let mut links: Vec<(SectionHandle, SectionHandle)> = Vec::new();
    let mut roots = 0usize;

    for section in arena.iter() {
        let first = section.first_sample();
        let candidates: Vec<SectionHandle> = by_last_id
            .get(&first.id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&candidate| {
                candidate != section.handle()
                    && arena
                        .get(candidate)
                        .is_some_and(|c| c.sample_type() == section.sample_type())
            })
            .collect();

        match candidates.as_slice() {
            [] => {
                roots += 1;
                check_root_anchor(table, first.id, first.parent_id, diagnostics);
            }
            [parent] => links.push((*parent, section.handle())),
            _ => {
                return Err(LinkError::MultipleParents {
                    section: section.handle().0,
                })
            }
        }
    }

    for (parent, child) in links {
        arena
            .link(parent, child)
            .map_err(|_| LinkError::MultipleParents { section: child.0 })?;
    }

    trace!(
        target: "neuroskel",
        "Linked {} sections into {} trees",
        arena.len(),
        roots
    );
    Ok(())
}

/// Validate that a root section's recorded parent anchors it to the soma.
fn check_root_anchor(
    table: &SampleTable,
    id: SampleId,
    parent_id: i32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if parent_id == NO_PARENT {
        return;
    }
    match table.get(parent_id as SampleId) {
        Some(parent) if parent.sample_type == SampleType::Soma => {}
        Some(_) => {
            diagnostics.push(Diagnostic::SuspiciousRootSentinel { id, parent_id });
        }
        // Absent parents were already flagged as dangling by the splitter
        None => {}
    }
}
