// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Arbors - rooted trees of sections of a single morphological type.

An arbor is represented by its label and the handle of its root section;
the sections themselves live in the morphology's [`SectionArena`]. Traversal
helpers here walk the children links recursively (branching order, terminal
sections, sample counts).
*/

use serde::{Deserialize, Serialize};

use crate::skeleton::sample::SampleType;
use crate::skeleton::section::{SectionArena, SectionHandle};

/// A rooted tree of sections of one morphological type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arbor {
    label: String,
    root: SectionHandle,
    sample_type: SampleType,
}

impl Arbor {
    pub fn new(label: String, root: SectionHandle, sample_type: SampleType) -> Self {
        Self {
            label,
            root,
            sample_type,
        }
    }

    /// Human-readable label ("Axon", "Basal Dendrite 2", ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn root(&self) -> SectionHandle {
        self.root
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Aggregate statistics for this arbor's tree.
    pub fn stats(&self, arena: &SectionArena) -> ArborStats {
        let mut stats = ArborStats::default();
        collect_stats(arena, self.root, 1, &mut stats);
        stats
    }
}

/// Aggregate counts over one arbor's tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArborStats {
    /// Sections in the tree
    pub sections: u32,
    /// Samples summed over all sections (branch samples shared between a
    /// parent and its children are counted once per section holding them)
    pub samples: u32,
    /// Leaf sections
    pub terminals: u32,
    /// Deepest branching order, root section = order 1
    pub max_branching_order: u32,
}

fn collect_stats(arena: &SectionArena, handle: SectionHandle, order: u32, stats: &mut ArborStats) {
    let Some(section) = arena.get(handle) else {
        return;
    };
    stats.sections += 1;
    stats.samples += section.samples().len() as u32;
    if order > stats.max_branching_order {
        stats.max_branching_order = order;
    }
    if section.is_leaf() {
        stats.terminals += 1;
    }
    for &child in section.children() {
        collect_stats(arena, child, order + 1, stats);
    }
}
