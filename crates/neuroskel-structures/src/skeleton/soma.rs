// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Soma - the cell body of a reconstructed morphology.

Represented by a centroid, a mean radius and the set of profile points taken
from soma-typed samples. The mean radius is the arithmetic mean of the
distances from the centroid to each profile point; the radius declared on
the centroid sample itself is only a fallback for somata without a profile.
*/

use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// The cell body of a morphology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Soma {
    centroid: [f64; 3],
    mean_radius: f64,
    profile_points: Vec<[f64; 3]>,
    arbor_root_points: Vec<[f64; 3]>,
}

impl Soma {
    /// Build a soma from its centroid, profile points and the first-sample
    /// positions of the classified arbor roots.
    ///
    /// `mean_radius` is recomputed as the mean distance from the centroid to
    /// every profile point. With zero profile points it falls back to
    /// `fallback_radius` (the centroid sample's declared radius, or 0 when
    /// the soma is entirely absent from the input) - callers treat that case
    /// as "soma ill-defined" rather than an error.
    pub fn new(
        centroid: [f64; 3],
        fallback_radius: f64,
        profile_points: Vec<[f64; 3]>,
        arbor_root_points: Vec<[f64; 3]>,
    ) -> Self {
        let mean_radius = if profile_points.is_empty() {
            fallback_radius
        } else {
            profile_points
                .iter()
                .map(|p| distance(*p, centroid))
                .sum::<f64>()
                / profile_points.len() as f64
        };
        Self {
            centroid,
            mean_radius,
            profile_points,
            arbor_root_points,
        }
    }

    pub fn centroid(&self) -> [f64; 3] {
        self.centroid
    }

    pub fn mean_radius(&self) -> f64 {
        self.mean_radius
    }

    pub fn profile_points(&self) -> &[[f64; 3]] {
        &self.profile_points
    }

    /// First sample position of every classified arbor root.
    pub fn arbor_root_points(&self) -> &[[f64; 3]] {
        &self.arbor_root_points
    }
}
