// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Sections and the section arena.

A section is the unit of tree topology: a branch-free run of samples between
two terminal points of the skeleton. Parent/child relations are stored as
integer handles into a per-morphology arena rather than shared pointers, so
ownership stays unambiguous and cycle-freedom is checkable with a plain
visited-set walk.
*/

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::SkeletonError;
use crate::skeleton::sample::{Sample, SampleId, SampleType};

/// Handle of a section inside a [`SectionArena`].
///
/// Handles are dense indices assigned in creation order and are only
/// meaningful within the arena that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionHandle(pub u32);

impl SectionHandle {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for SectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A branch-free run of samples.
///
/// Invariants maintained by the arena:
/// - `samples` is never empty;
/// - a section with `parent == None` is the root of its arbor;
/// - otherwise `samples[0].id` equals the parent's last sample id (the first
///   sample is physically the same point as the parent's last sample, a
///   reconstructed adjacency shared between the two sections).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    handle: SectionHandle,
    sample_type: SampleType,
    samples: Vec<Sample>,
    parent: Option<SectionHandle>,
    children: Vec<SectionHandle>,
}

impl Section {
    pub fn handle(&self) -> SectionHandle {
        self.handle
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Ordered sample list, always at least one element.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn parent(&self) -> Option<SectionHandle> {
        self.parent
    }

    /// Children in insertion order from linking.
    pub fn children(&self) -> &[SectionHandle] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn first_sample(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn last_sample(&self) -> &Sample {
        self.samples.last().expect("section holds >= 1 sample")
    }

    pub fn first_sample_id(&self) -> SampleId {
        self.samples[0].id
    }

    pub fn last_sample_id(&self) -> SampleId {
        self.last_sample().id
    }
}

/// Per-morphology store of sections, indexed by [`SectionHandle`].
///
/// The arena owns every section of a morphology across all arbor types.
/// Handles are assigned in creation order, which downstream consumers rely
/// on as "path order" when picking canonical arbors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionArena {
    sections: Vec<Section>,
}

impl SectionArena {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sections: Vec::with_capacity(capacity),
        }
    }

    /// Number of sections in the arena.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Append a new unlinked section and return its handle.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::BadParameters` if `samples` is empty.
    pub fn add_section(
        &mut self,
        sample_type: SampleType,
        samples: Vec<Sample>,
    ) -> Result<SectionHandle, SkeletonError> {
        if samples.is_empty() {
            return Err(SkeletonError::BadParameters(
                "Section must hold at least one sample".into(),
            ));
        }
        let handle = SectionHandle(self.sections.len() as u32);
        self.sections.push(Section {
            handle,
            sample_type,
            samples,
            parent: None,
            children: Vec::new(),
        });
        Ok(handle)
    }

    pub fn get(&self, handle: SectionHandle) -> Option<&Section> {
        self.sections.get(handle.index())
    }

    /// Look up a section, failing on a stale handle.
    pub fn section(&self, handle: SectionHandle) -> Result<&Section, SkeletonError> {
        self.sections
            .get(handle.index())
            .ok_or(SkeletonError::InvalidHandle(handle.0))
    }

    /// Iterate all sections in handle (creation) order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Establish a parent/child link between two sections.
    ///
    /// The child is appended to the parent's child list; insertion order is
    /// preserved and later exposed verbatim by traversal.
    ///
    /// # Errors
    ///
    /// - `SkeletonError::InvalidHandle` if either handle is stale
    /// - `SkeletonError::AlreadyParented` if the child already has a parent;
    ///   ambiguous topology must be detected by the caller, never overwritten
    pub fn link(
        &mut self,
        parent: SectionHandle,
        child: SectionHandle,
    ) -> Result<(), SkeletonError> {
        if parent.index() >= self.sections.len() {
            return Err(SkeletonError::InvalidHandle(parent.0));
        }
        if child.index() >= self.sections.len() {
            return Err(SkeletonError::InvalidHandle(child.0));
        }
        if self.sections[child.index()].parent.is_some() {
            return Err(SkeletonError::AlreadyParented(child.0));
        }
        self.sections[child.index()].parent = Some(parent);
        self.sections[parent.index()].children.push(child);
        Ok(())
    }

    /// Roots (sections with no parent) of a given type, in handle order.
    pub fn roots_of_type(&self, sample_type: SampleType) -> Vec<SectionHandle> {
        self.sections
            .iter()
            .filter(|s| s.is_root() && s.sample_type == sample_type)
            .map(|s| s.handle)
            .collect()
    }

    /// Depth-first pre-order traversal from `root`: the visitor sees each
    /// parent before its children, children in insertion order.
    ///
    /// Stale handles reachable from `root` are skipped silently; the arena
    /// never hands them out, so hitting one indicates external corruption.
    pub fn for_each_section<F>(&self, root: SectionHandle, visitor: &mut F)
    where
        F: FnMut(&Section),
    {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(section) = self.get(handle) else {
                continue;
            };
            visitor(section);
            // Reversed push keeps children in insertion order on the stack
            for &child in section.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Verify that the tree under `root` is well-formed.
    ///
    /// Checks, with a visited-set DFS:
    /// - no section is reachable twice (no cycles, no shared children);
    /// - every child's `parent` back-pointer names the section it hangs off;
    /// - every handle reachable from `root` is live.
    pub fn validate_tree(&self, root: SectionHandle) -> Result<(), SkeletonError> {
        let root_section = self.section(root)?;
        if !root_section.is_root() {
            return Err(SkeletonError::BadParameters(format!(
                "Section {} is not a root",
                root
            )));
        }

        let mut visited = vec![false; self.sections.len()];
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let section = self.section(handle)?;
            if visited[handle.index()] {
                return Err(SkeletonError::CyclicTree(handle.0));
            }
            visited[handle.index()] = true;

            for &child in section.children() {
                let child_section = self.section(child)?;
                if child_section.parent() != Some(handle) {
                    return Err(SkeletonError::InternalError(format!(
                        "Section {} lists child {} whose parent pointer disagrees",
                        handle, child
                    )));
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: SampleId, parent_id: i32) -> Sample {
        Sample::new(
            id,
            SampleType::BasalDendrite,
            [id as f64, 0.0, 0.0],
            1.0,
            parent_id,
        )
    }

    #[test]
    fn test_add_and_get() {
        let mut arena = SectionArena::new();
        let h = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1)])
            .unwrap();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(h).unwrap().first_sample_id(), 2);
    }

    #[test]
    fn test_empty_section_rejected() {
        let mut arena = SectionArena::new();
        assert!(arena
            .add_section(SampleType::BasalDendrite, Vec::new())
            .is_err());
    }

    #[test]
    fn test_link_and_double_parent() {
        let mut arena = SectionArena::new();
        let parent = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1)])
            .unwrap();
        let child = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1), sample(3, 2)])
            .unwrap();
        let other = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1), sample(4, 2)])
            .unwrap();

        arena.link(parent, child).unwrap();
        assert_eq!(arena.get(child).unwrap().parent(), Some(parent));
        assert_eq!(arena.get(parent).unwrap().children(), &[child]);

        // Second parent for the same child must be rejected, not overwritten
        let result = arena.link(other, child);
        assert!(matches!(result, Err(SkeletonError::AlreadyParented(_))));
    }

    #[test]
    fn test_dfs_preorder_insertion_order() {
        let mut arena = SectionArena::new();
        let root = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1)])
            .unwrap();
        let a = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1), sample(3, 2)])
            .unwrap();
        let b = arena
            .add_section(SampleType::BasalDendrite, vec![sample(2, 1), sample(4, 2)])
            .unwrap();
        let a1 = arena
            .add_section(SampleType::BasalDendrite, vec![sample(3, 2), sample(5, 3)])
            .unwrap();
        arena.link(root, a).unwrap();
        arena.link(root, b).unwrap();
        arena.link(a, a1).unwrap();

        let mut order = Vec::new();
        arena.for_each_section(root, &mut |s| order.push(s.handle()));
        // Parent before children, children in insertion order
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn test_validate_tree_detects_cycle() {
        let mut arena = SectionArena::new();
        let root = arena
            .add_section(SampleType::Axon, vec![sample(2, 1)])
            .unwrap();
        let child = arena
            .add_section(SampleType::Axon, vec![sample(2, 1), sample(3, 2)])
            .unwrap();
        arena.link(root, child).unwrap();
        assert!(arena.validate_tree(root).is_ok());

        // Force a cycle by hand: child adopts root as its own child
        arena.sections[child.index()].children.push(root);
        arena.sections[root.index()].parent = Some(child);
        assert!(arena.validate_tree(root).is_err());
    }

    #[test]
    fn test_roots_of_type() {
        let mut arena = SectionArena::new();
        let axon_root = arena
            .add_section(SampleType::Axon, vec![sample(2, 1)])
            .unwrap();
        let basal_root = arena
            .add_section(SampleType::BasalDendrite, vec![sample(10, 1)])
            .unwrap();
        let child = arena
            .add_section(SampleType::Axon, vec![sample(2, 1), sample(3, 2)])
            .unwrap();
        arena.link(axon_root, child).unwrap();

        assert_eq!(arena.roots_of_type(SampleType::Axon), vec![axon_root]);
        assert_eq!(
            arena.roots_of_type(SampleType::BasalDendrite),
            vec![basal_root]
        );
    }
}
