// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Arbor Classifier - group root sections into the three arbor categories.

Raw files may hold several disjoint trees of the same functional type (two
axons, say). The consistency policy is promotion: the first tree of a type,
in path order, becomes the canonical arbor of that type; every additional
axon or apical tree is relabeled and folded into the basal-dendrite list.
Basal trees are never promoted or demoted.

Labeling follows the same convention as the source ecosystem: a canonical
axon is "Axon", a canonical apical dendrite is "Apical Dendrite", and every
entry of the basal list gets a 1-based index suffix ("Basal Dendrite 1",
"Basal Dendrite 2", ...).
*/

use neuroskel_structures::{Arbor, SampleType, SectionArena, SectionHandle};
use tracing::debug;

/// Root sections grouped by raw morphological type, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub axon: Vec<SectionHandle>,
    pub basal: Vec<SectionHandle>,
    pub apical: Vec<SectionHandle>,
}

/// Root sections after promotion: one canonical axon and apical at most,
/// everything else in the basal list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Promoted {
    pub axon: Option<SectionHandle>,
    pub basal: Vec<SectionHandle>,
    pub apical: Option<SectionHandle>,
}

/// Collect the arena's root sections into per-type groups.
///
/// Handle order is creation order, which is path order - downstream
/// promotion relies on that to pick "the first tree found".
pub fn classify(arena: &SectionArena) -> Classified {
    Classified {
        axon: arena.roots_of_type(SampleType::Axon),
        basal: arena.roots_of_type(SampleType::BasalDendrite),
        apical: arena.roots_of_type(SampleType::ApicalDendrite),
    }
}

/// Apply the promotion policy to classified roots.
pub fn promote_primary(classified: Classified) -> Promoted {
    let Classified {
        mut axon,
        mut basal,
        mut apical,
    } = classified;

    let canonical_axon = if axon.is_empty() {
        None
    } else {
        Some(axon.remove(0))
    };
    let canonical_apical = if apical.is_empty() {
        None
    } else {
        Some(apical.remove(0))
    };

    if !axon.is_empty() || !apical.is_empty() {
        debug!(
            target: "neuroskel",
            "Folding {} extra axon and {} extra apical trees into the basal list",
            axon.len(),
            apical.len()
        );
    }
    basal.extend(axon);
    basal.extend(apical);

    Promoted {
        axon: canonical_axon,
        basal,
        apical: canonical_apical,
    }
}

/// Build labeled arbors from promoted roots.
///
/// Demoted trees keep the morphological type of their sections; only the
/// label places them in the basal list.
pub fn label_arbors(
    promoted: &Promoted,
    arena: &SectionArena,
) -> (Option<Arbor>, Vec<Arbor>, Option<Arbor>) {
    let type_of = |handle: SectionHandle| {
        arena
            .get(handle)
            .map(|s| s.sample_type())
            .unwrap_or(SampleType::Undefined)
    };

    let axon = promoted
        .axon
        .map(|root| Arbor::new("Axon".to_string(), root, type_of(root)));
    let apical = promoted.apical.map(|root| {
        Arbor::new("Apical Dendrite".to_string(), root, type_of(root))
    });
    let basal = promoted
        .basal
        .iter()
        .enumerate()
        .map(|(index, &root)| {
            Arbor::new(
                format!("Basal Dendrite {}", index + 1),
                root,
                type_of(root),
            )
        })
        .collect();

    (axon, basal, apical)
}
