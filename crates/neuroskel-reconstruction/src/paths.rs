// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Path Builder - maximal connected runs of samples.

Walks the sample table in ascending id order and groups samples of one type
into connected paths: runs where each sample's parent id equals the previous
sample's id. Continuity breaks (including branch points, which show up as a
later sample pointing back at an earlier, non-previous sample) close the
current path and start a new one.

Every closed path gets a synthetic first element: the parent id of its first
sample, injected so the section splitter can recover the bridging parent
reference. The first and last id of every path land in the terminal set the
splitter consumes verbatim.
*/

use ahash::AHashSet;
use neuroskel_structures::{SampleId, SampleType, NO_PARENT};
use tracing::trace;

use crate::sample_table::SampleTable;

/// Connected paths of one morphological type plus their terminal index set.
#[derive(Debug, Clone)]
pub struct PathSet {
    sample_type: SampleType,
    paths: Vec<Vec<SampleId>>,
    terminals: AHashSet<SampleId>,
}

impl PathSet {
    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Paths in discovery order. The first element of each path is the
    /// injected parent id, not itself part of any section of this path.
    pub fn paths(&self) -> &[Vec<SampleId>] {
        &self.paths
    }

    /// First and last sample id of every path; the splitter treats members
    /// found mid-path as fork points.
    pub fn terminals(&self) -> &AHashSet<SampleId> {
        &self.terminals
    }
}

/// Group the table's samples of `type_filter` into maximal connected paths.
///
/// Soma samples and samples whose parent is the no-parent sentinel are
/// skipped silently - both mark structural anchors, not drawable segments.
pub fn build_paths(table: &SampleTable, type_filter: SampleType) -> PathSet {
    let mut paths: Vec<Vec<SampleId>> = Vec::new();
    let mut current: Vec<SampleId> = Vec::new();

    for sample in table.iter() {
        if sample.sample_type != type_filter {
            continue;
        }
        // Structural anchors: never the start (or member) of a drawable path
        if sample.sample_type == SampleType::Soma || sample.parent_id == NO_PARENT {
            continue;
        }

        match current.last() {
            Some(&previous) if sample.parent_id == previous as i32 => {
                current.push(sample.id);
            }
            Some(_) => {
                close_path(table, std::mem::take(&mut current), &mut paths);
                current.push(sample.id);
            }
            None => {
                current.push(sample.id);
            }
        }
    }
    close_path(table, current, &mut paths);

    let mut terminals = AHashSet::with_capacity(paths.len() * 2);
    for path in &paths {
        terminals.insert(path[0]);
        terminals.insert(path[path.len() - 1]);
    }

    trace!(
        target: "neuroskel",
        "Built {} connected {} paths, {} terminals",
        paths.len(),
        type_filter,
        terminals.len()
    );

    PathSet {
        sample_type: type_filter,
        paths,
        terminals,
    }
}

/// Close the current path: prepend the bridging parent id and store it.
fn close_path(table: &SampleTable, path: Vec<SampleId>, paths: &mut Vec<Vec<SampleId>>) {
    let Some(&first) = path.first() else {
        return;
    };
    // Path members always carry a defined parent: samples with the no-parent
    // sentinel never enter a path, and ids come from the table walk itself.
    let Some(sample) = table.get(first) else {
        return;
    };

    let mut closed = Vec::with_capacity(path.len() + 1);
    closed.push(sample.parent_id as SampleId);
    closed.extend(path);
    paths.push(closed);
}
