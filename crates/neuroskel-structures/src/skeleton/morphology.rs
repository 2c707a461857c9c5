// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Morphology - the assembled, immutable skeleton.

Bundles the soma, the classified arbors and the section arena with metadata
(label, source format, stem/sample counts). Constructed once by the
reconstruction pipeline and read-only afterward; consumers borrow it through
the accessors here.
*/

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::skeleton::arbor::Arbor;
use crate::skeleton::section::{Section, SectionArena};
use crate::skeleton::soma::Soma;

/// Physical source format a morphology was reconstructed from.
///
/// Provenance only - both formats enter the pipeline through the same
/// sample-table API and produce identical skeletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    Swc,
    Hdf5,
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Swc => write!(f, "SWC"),
            FileFormat::Hdf5 => write!(f, "HDF5"),
        }
    }
}

/// An assembled neuronal skeleton: soma plus a forest of arbors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Morphology {
    soma: Soma,
    arena: SectionArena,
    axon: Option<Arbor>,
    basal_dendrites: Vec<Arbor>,
    apical_dendrite: Option<Arbor>,
    label: String,
    file_format: FileFormat,
    stem_count: u32,
    sample_count: u32,
}

impl Morphology {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        soma: Soma,
        arena: SectionArena,
        axon: Option<Arbor>,
        basal_dendrites: Vec<Arbor>,
        apical_dendrite: Option<Arbor>,
        label: String,
        file_format: FileFormat,
        sample_count: u32,
    ) -> Self {
        let stem_count = axon.iter().count() as u32
            + basal_dendrites.len() as u32
            + apical_dendrite.iter().count() as u32;
        Self {
            soma,
            arena,
            axon,
            basal_dendrites,
            apical_dendrite,
            label,
            file_format,
            stem_count,
            sample_count,
        }
    }

    pub fn soma(&self) -> &Soma {
        &self.soma
    }

    pub fn axon(&self) -> Option<&Arbor> {
        self.axon.as_ref()
    }

    pub fn basal_dendrites(&self) -> &[Arbor] {
        &self.basal_dendrites
    }

    pub fn apical_dendrite(&self) -> Option<&Arbor> {
        self.apical_dendrite.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file_format(&self) -> FileFormat {
        self.file_format
    }

    /// Number of arbor roots anchored to the soma.
    pub fn stem_count(&self) -> u32 {
        self.stem_count
    }

    /// Number of samples parsed from the source file.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// The section arena holding every section of this morphology.
    pub fn arena(&self) -> &SectionArena {
        &self.arena
    }

    /// All arbors in classification order: axon, basal dendrites, apical.
    pub fn arbors(&self) -> impl Iterator<Item = &Arbor> {
        self.axon
            .iter()
            .chain(self.basal_dendrites.iter())
            .chain(self.apical_dendrite.iter())
    }

    /// Walk one arbor depth-first pre-order: parent before children,
    /// children in the insertion order established by linking.
    pub fn for_each_section<F>(&self, arbor: &Arbor, mut visitor: F)
    where
        F: FnMut(&Section),
    {
        self.arena.for_each_section(arbor.root(), &mut visitor);
    }
}
