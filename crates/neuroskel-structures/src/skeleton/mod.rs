// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Skeleton data model: samples, sections, arbors, soma and the assembled
morphology.
*/

pub mod arbor;
pub mod morphology;
pub mod sample;
pub mod section;
pub mod soma;

pub use arbor::{Arbor, ArborStats};
pub use morphology::{FileFormat, Morphology};
pub use sample::{Sample, SampleId, SampleType, NO_PARENT, SOMA_ANCHOR_ID};
pub use section::{Section, SectionArena, SectionHandle};
pub use soma::Soma;
