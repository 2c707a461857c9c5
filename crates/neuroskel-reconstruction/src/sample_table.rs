// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Sample Table - indexed store of parsed samples.

Built once per input file and used as the backbone for every later lookup.
The table is a dense vector sized to the maximum sample id seen, with holes
(unused ids) kept as explicit empty slots - absent entries are skippable by
every downstream consumer, never a lookup panic.

Construction accepts either an SWC line iterator or pre-populated raw
records (the HDF5 loader path); both feed the same insertion routine so the
rest of the pipeline stays format-agnostic.
*/

use neuroskel_structures::{Sample, SampleId, SampleType, NO_PARENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Diagnostic, ParseError};

/// One unparsed morphology record: the seven SWC fields as plain values.
///
/// This is the format-agnostic entry point - an HDF5 loader fills these from
/// its points/structure arrays, the SWC path fills them per line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub id: SampleId,
    pub type_code: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    pub parent_id: i32,
}

/// Indexed store of parsed samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleTable {
    /// Dense slot vector indexed by sample id; `None` marks a hole
    slots: Vec<Option<Sample>>,
    /// Number of occupied slots
    count: u32,
}

impl SampleTable {
    /// Parse SWC lines into a table.
    ///
    /// Each non-comment, non-blank line is tokenized on whitespace
    /// (collapsing repeated separators) into seven fields: index, type, x,
    /// y, z, radius, parent-index. Line numbers in errors are 1-based.
    ///
    /// # Errors
    ///
    /// - `ParseError::MalformedLine` if a line holds fewer than seven tokens
    /// - `ParseError::BadField` if a numeric field fails to parse
    /// - `ParseError::DuplicateSampleId` if an id is declared twice
    pub fn parse_swc_lines<I, S>(lines: I) -> Result<(Self, Vec<Diagnostic>), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        let mut diagnostics = Vec::new();

        for (line_index, line) in lines.into_iter().enumerate() {
            let line_no = line_index + 1;
            let text = line.as_ref().trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let raw = parse_swc_line(text, line_no)?;
            table.insert(raw, line_no, &mut diagnostics)?;
        }

        debug!(
            target: "neuroskel",
            "Parsed {} samples (max id {:?})",
            table.len(),
            table.max_id()
        );
        Ok((table, diagnostics))
    }

    /// Build a table from pre-populated records with the same semantic
    /// guarantees as the SWC path (normalization, duplicate detection).
    ///
    /// The record's position in the iterator stands in for the line number
    /// in errors (1-based).
    pub fn from_raw<I>(records: I) -> Result<(Self, Vec<Diagnostic>), ParseError>
    where
        I: IntoIterator<Item = RawSample>,
    {
        let mut table = Self::default();
        let mut diagnostics = Vec::new();
        for (index, raw) in records.into_iter().enumerate() {
            table.insert(raw, index + 1, &mut diagnostics)?;
        }
        Ok((table, diagnostics))
    }

    fn insert(
        &mut self,
        raw: RawSample,
        line: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), ParseError> {
        let has_parent = raw.parent_id != NO_PARENT;
        let (sample_type, normalized) = SampleType::from_raw_code(raw.type_code, has_parent);
        if normalized {
            diagnostics.push(Diagnostic::UnrecognizedType {
                id: raw.id,
                raw_code: raw.type_code,
            });
        }

        let slot = raw.id as usize;
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        if self.slots[slot].is_some() {
            return Err(ParseError::DuplicateSampleId { id: raw.id, line });
        }
        self.slots[slot] = Some(Sample::new(
            raw.id,
            sample_type,
            [raw.x, raw.y, raw.z],
            raw.radius,
            raw.parent_id,
        ));
        self.count += 1;
        Ok(())
    }

    /// Look up a sample by id; holes and out-of-range ids yield `None`.
    pub fn get(&self, id: SampleId) -> Option<&Sample> {
        self.slots.get(id as usize).and_then(|slot| slot.as_ref())
    }

    /// Largest id present in the table.
    pub fn max_id(&self) -> Option<SampleId> {
        self.slots
            .iter()
            .rposition(|slot| slot.is_some())
            .map(|index| index as SampleId)
    }

    /// Number of samples (occupied slots).
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate samples in ascending id order, skipping holes.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Number of samples carrying the given type.
    pub fn count_of_type(&self, sample_type: SampleType) -> u32 {
        self.iter().filter(|s| s.sample_type == sample_type).count() as u32
    }
}

fn parse_swc_line(text: &str, line: usize) -> Result<RawSample, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 7 {
        return Err(ParseError::MalformedLine { line });
    }

    let id = tokens[0]
        .parse::<SampleId>()
        .map_err(|_| ParseError::BadField { line, field: "index" })?;
    let type_code = tokens[1]
        .parse::<i32>()
        .map_err(|_| ParseError::BadField { line, field: "type" })?;
    let x = tokens[2]
        .parse::<f64>()
        .map_err(|_| ParseError::BadField { line, field: "x" })?;
    let y = tokens[3]
        .parse::<f64>()
        .map_err(|_| ParseError::BadField { line, field: "y" })?;
    let z = tokens[4]
        .parse::<f64>()
        .map_err(|_| ParseError::BadField { line, field: "z" })?;
    let radius = tokens[5]
        .parse::<f64>()
        .map_err(|_| ParseError::BadField { line, field: "radius" })?;
    let parent_id = tokens[6]
        .parse::<i32>()
        .map_err(|_| ParseError::BadField { line, field: "parent" })?;

    Ok(RawSample {
        id,
        type_code,
        x,
        y,
        z,
        radius,
        parent_id,
    })
}
