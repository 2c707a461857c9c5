// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Soma Builder - derive the cell body from soma-typed samples.

The sample carrying the no-parent sentinel is the soma anchor: its position
becomes the centroid and its radius the fallback reading. Every other
soma-typed sample is a profile point. The mean radius is recomputed as the
mean distance from the centroid to the profile points; with no profile
points the soma is ill-defined and the fallback radius stands, flagged with
a soft warning instead of an error.
*/

use neuroskel_structures::{SampleType, SectionArena, SectionHandle, Soma};
use tracing::warn;

use crate::sample_table::SampleTable;
use crate::types::Diagnostic;

/// Build the soma from the table's soma samples and the classified arbor
/// roots (whose first-sample positions become the arbor root points).
pub fn build_soma(
    table: &SampleTable,
    arena: &SectionArena,
    arbor_roots: &[SectionHandle],
    diagnostics: &mut Vec<Diagnostic>,
) -> Soma {
    let mut anchor: Option<([f64; 3], f64)> = None;
    let mut profile_points: Vec<[f64; 3]> = Vec::new();

    for sample in table.iter() {
        if sample.sample_type != SampleType::Soma {
            continue;
        }
        if sample.is_root() {
            if anchor.is_none() {
                anchor = Some((sample.position, sample.radius));
            } else {
                warn!(
                    target: "neuroskel",
                    "Multiple no-parent soma samples, keeping the first as centroid (extra id {})",
                    sample.id
                );
            }
        } else {
            profile_points.push(sample.position);
        }
    }

    let (centroid, fallback_radius) = match anchor {
        Some(found) => found,
        None if !profile_points.is_empty() => {
            // No anchor sample: fall back to the profile's own centroid
            let n = profile_points.len() as f64;
            let mut mean = [0.0f64; 3];
            for point in &profile_points {
                mean[0] += point[0];
                mean[1] += point[1];
                mean[2] += point[2];
            }
            ([mean[0] / n, mean[1] / n, mean[2] / n], 0.0)
        }
        None => ([0.0; 3], 0.0),
    };

    if profile_points.is_empty() {
        diagnostics.push(Diagnostic::SomaWithoutProfile);
    }

    let arbor_root_points = arbor_roots
        .iter()
        .filter_map(|&root| arena.get(root))
        .map(|section| section.first_sample().position)
        .collect();

    Soma::new(centroid, fallback_radius, profile_points, arbor_root_points)
}
