// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Reconstruction Integration Tests

Runs the full pipeline over small SWC fixtures, covering:
- The canonical Y-branch scenario (soma + one branching basal arbor)
- Duplicate trees of one type and the promotion/relabeling policy
- Malformed input (hard errors, no partial morphology)
- Fallback type normalization surfacing downstream
- Soma centroid / mean radius derivation
- Traversal order and structural invariants on the finished morphology
*/

use neuroskel_reconstruction::{
    Diagnostic, ParseError, Reconstructed, ReconstructionError, Reconstructor,
};
use neuroskel_structures::{FileFormat, SampleType};

fn reconstruct(label: &str, lines: &[&str]) -> Reconstructed {
    Reconstructor::new(label, FileFormat::Swc)
        .reconstruct_swc_lines(lines.iter().copied())
        .expect("fixture must reconstruct")
}

#[test]
fn test_simple_y_branch_scenario() {
    let result = reconstruct(
        "y_branch",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 3 0.0 0.0 1.0 1.0 1",
            "3 3 0.0 1.0 2.0 1.0 2",
            "4 3 1.0 1.0 2.0 1.0 2",
        ],
    );
    let morphology = &result.morphology;

    // One soma with centroid (0,0,0)
    assert_eq!(morphology.soma().centroid(), [0.0, 0.0, 0.0]);

    // One basal-dendrite arbor, no axon, no apical
    assert!(morphology.axon().is_none());
    assert!(morphology.apical_dendrite().is_none());
    assert_eq!(morphology.basal_dendrites().len(), 1);
    assert_eq!(morphology.stem_count(), 1);

    // Root section holds sample 2 and has two children, one continuing to
    // sample 3 and one to sample 4 (each child starts at the shared branch
    // sample, per the adjacency invariant)
    let arbor = &morphology.basal_dendrites()[0];
    let arena = morphology.arena();
    let root = arena.get(arbor.root()).unwrap();
    let root_ids: Vec<u32> = root.samples().iter().map(|s| s.id).collect();
    assert_eq!(root_ids, vec![2]);
    assert_eq!(root.children().len(), 2);

    let mut tips: Vec<u32> = root
        .children()
        .iter()
        .map(|&child| arena.get(child).unwrap().last_sample_id())
        .collect();
    tips.sort_unstable();
    assert_eq!(tips, vec![3, 4]);

    for &child in root.children() {
        let child_section = arena.get(child).unwrap();
        assert_eq!(child_section.first_sample_id(), root.last_sample_id());
        assert_eq!(child_section.parent(), Some(arbor.root()));
    }
}

#[test]
fn test_duplicate_axon_trees_scenario() {
    let result = reconstruct(
        "two_axons",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 2 0.0 0.0 1.0 1.0 1",
            "3 2 0.0 0.0 2.0 1.0 2",
            "10 2 5.0 0.0 1.0 1.0 1",
            "11 2 5.0 0.0 2.0 1.0 10",
        ],
    );
    let morphology = &result.morphology;
    let arena = morphology.arena();

    // First tree in path order stays the canonical axon
    let axon = morphology.axon().expect("canonical axon");
    assert_eq!(axon.label(), "Axon");
    assert_eq!(
        arena.get(axon.root()).unwrap().first_sample_id(),
        2,
        "canonical axon must be the first tree produced by linking"
    );

    // Second tree lands in the basal list, relabeled, otherwise untouched
    assert_eq!(morphology.basal_dendrites().len(), 1);
    let demoted = &morphology.basal_dendrites()[0];
    assert_eq!(demoted.label(), "Basal Dendrite 1");
    assert_eq!(demoted.sample_type(), SampleType::Axon);
    let demoted_ids: Vec<u32> = arena
        .get(demoted.root())
        .unwrap()
        .samples()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(demoted_ids, vec![10, 11]);
}

#[test]
fn test_three_axon_trees_promote_first_only() {
    let result = reconstruct(
        "three_axons",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 2 0.0 0.0 1.0 1.0 1",
            "3 2 0.0 0.0 2.0 1.0 2",
            "10 2 5.0 0.0 1.0 1.0 1",
            "11 2 5.0 0.0 2.0 1.0 10",
            "20 2 9.0 0.0 1.0 1.0 1",
            "21 2 9.0 0.0 2.0 1.0 20",
        ],
    );
    let morphology = &result.morphology;
    let arena = morphology.arena();

    let axon = morphology.axon().unwrap();
    assert_eq!(arena.get(axon.root()).unwrap().first_sample_id(), 2);

    let demoted_firsts: Vec<u32> = morphology
        .basal_dendrites()
        .iter()
        .map(|arbor| arena.get(arbor.root()).unwrap().first_sample_id())
        .collect();
    assert_eq!(demoted_firsts, vec![10, 20]);

    let labels: Vec<&str> = morphology
        .basal_dendrites()
        .iter()
        .map(|arbor| arbor.label())
        .collect();
    assert_eq!(labels, vec!["Basal Dendrite 1", "Basal Dendrite 2"]);
}

#[test]
fn test_apical_promotion_mirrors_axon() {
    let result = reconstruct(
        "two_apicals",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 4 0.0 0.0 1.0 1.0 1",
            "3 4 0.0 0.0 2.0 1.0 2",
            "10 4 5.0 0.0 1.0 1.0 1",
            "11 4 5.0 0.0 2.0 1.0 10",
        ],
    );
    let morphology = &result.morphology;

    let apical = morphology.apical_dendrite().expect("canonical apical");
    assert_eq!(apical.label(), "Apical Dendrite");
    assert_eq!(morphology.basal_dendrites().len(), 1);
    assert_eq!(
        morphology.basal_dendrites()[0].sample_type(),
        SampleType::ApicalDendrite
    );
}

#[test]
fn test_malformed_line_aborts_without_morphology() {
    let outcome = Reconstructor::new("broken", FileFormat::Swc).reconstruct_swc_lines([
        "# header",
        "1 1 0.0 0.0 0.0 5.0 -1",
        "2 3 0.0 0.0 1.0 1.0", // six tokens
        "3 3 0.0 1.0 2.0 1.0 2",
    ]);
    match outcome {
        Err(ReconstructionError::Parse(ParseError::MalformedLine { line })) => {
            assert_eq!(line, 3, "line numbers are 1-based");
        }
        other => panic!("expected malformed-line parse error, got {:?}", other),
    }
}

#[test]
fn test_fallback_type_code_surfaces_as_basal() {
    let result = reconstruct(
        "fallback",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 7 0.0 0.0 1.0 1.0 1",
            "3 7 0.0 0.0 2.0 1.0 2",
        ],
    );
    let morphology = &result.morphology;

    // The raw code 7 never surfaces downstream: the samples reconstruct as
    // a regular basal-dendrite arbor
    assert!(morphology.axon().is_none());
    assert_eq!(morphology.basal_dendrites().len(), 1);
    let arbor = &morphology.basal_dendrites()[0];
    assert_eq!(arbor.sample_type(), SampleType::BasalDendrite);

    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnrecognizedType { id: 2, raw_code: 7 })));
}

#[test]
fn test_soma_mean_radius_exact() {
    let result = reconstruct(
        "soma_profile",
        &[
            "1 1 0.0 0.0 0.0 9.0 -1",
            "2 1 3.0 0.0 0.0 1.0 1",
            "3 1 0.0 4.0 0.0 1.0 1",
            "4 1 0.0 0.0 5.0 1.0 1",
            "5 3 0.0 0.0 1.0 1.0 1",
        ],
    );
    let soma = result.morphology.soma();
    assert_eq!(soma.profile_points().len(), 3);
    assert!((soma.mean_radius() - 4.0).abs() < 1e-9);
    // One basal stem anchored to the soma
    assert_eq!(soma.arbor_root_points(), &[[0.0, 0.0, 1.0]]);
}

#[test]
fn test_round_trip_sample_coverage() {
    let lines = [
        "1 1 0.0 0.0 0.0 5.0 -1",
        "2 3 0.0 0.0 1.0 1.0 1",
        "3 3 0.0 0.0 2.0 1.0 2",
        "4 3 0.0 1.0 2.0 1.0 3",
        "5 3 1.0 1.0 2.0 1.0 3",
        "6 3 1.0 2.0 2.0 1.0 5",
        "7 3 2.0 1.0 2.0 1.0 5",
    ];
    let result = reconstruct("coverage", &lines);
    let morphology = &result.morphology;

    // Every non-soma sample with a parent is owned by exactly one section;
    // bridge samples (the first sample of a linked child) are counted with
    // the parent section that owns them
    let mut owned = std::collections::HashMap::new();
    for arbor in morphology.arbors() {
        morphology.for_each_section(arbor, |section| {
            let samples = section.samples();
            let start = if section.parent().is_some() { 1 } else { 0 };
            for sample in &samples[start..] {
                *owned.entry(sample.id).or_insert(0u32) += 1;
            }
        });
    }

    for id in 2..=7u32 {
        assert_eq!(owned.get(&id), Some(&1), "sample {} owned exactly once", id);
    }
}

#[test]
fn test_tree_well_formedness_dfs() {
    let result = reconstruct(
        "well_formed",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 2 0.0 0.0 1.0 1.0 1",
            "3 2 0.0 0.0 2.0 1.0 2",
            "4 2 0.0 1.0 2.0 1.0 3",
            "5 2 1.0 1.0 2.0 1.0 3",
            "6 2 1.0 2.0 2.0 1.0 4",
            "7 2 2.0 2.0 2.0 1.0 4",
        ],
    );
    let morphology = &result.morphology;
    let arena = morphology.arena();

    let mut visited = std::collections::HashSet::new();
    for arbor in morphology.arbors() {
        morphology.for_each_section(arbor, |section| {
            assert!(
                visited.insert(section.handle()),
                "section visited twice: cycle or shared child"
            );
            if let Some(parent) = section.parent() {
                let parent_children = arena.get(parent).unwrap().children();
                let occurrences = parent_children
                    .iter()
                    .filter(|&&c| c == section.handle())
                    .count();
                assert_eq!(occurrences, 1, "parent/child links must be mutual");
            }
        });
    }
    // Every section belongs to exactly one arbor
    assert_eq!(visited.len(), arena.len());
}

#[test]
fn test_short_sections_flagged_not_dropped() {
    let result = reconstruct(
        "stub",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 3 0.0 0.0 1.0 1.0 1",
            "3 3 0.0 1.0 2.0 1.0 2",
            "4 3 1.0 1.0 2.0 1.0 2",
        ],
    );
    // The single-sample root stub survives and is flagged
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::ShortSection { .. })));
    let arena = result.morphology.arena();
    assert!(arena.iter().any(|s| s.samples().len() == 1));
}

#[test]
fn test_sample_and_stem_counts() {
    let result = reconstruct(
        "counts",
        &[
            "1 1 0.0 0.0 0.0 5.0 -1",
            "2 2 0.0 0.0 1.0 1.0 1",
            "3 3 0.0 1.0 0.0 1.0 1",
            "4 4 1.0 0.0 0.0 1.0 1",
        ],
    );
    let morphology = &result.morphology;
    assert_eq!(morphology.sample_count(), 4);
    assert_eq!(morphology.stem_count(), 3);
    assert_eq!(morphology.soma().arbor_root_points().len(), 3);
}
