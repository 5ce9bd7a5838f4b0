//! Canonical ordering of training numbers and range slicing.
//!
//! The canonical list is the ten zero-padded numbers `00`..`09` followed by
//! the plain numbers `0`..`99`. A range is resolved by locating both
//! endpoints in that list and taking everything between them, so `"08"` to
//! `"2"` yields `08, 09, 0, 1, 2`.

use serde::{Deserialize, Serialize};

use crate::error::{MajorError, Result};
use crate::major_number::{MajorNumber, MAX_PADDED_VALUE, MAX_VALUE};

const PADDED_COUNT: usize = (MAX_PADDED_VALUE + 1) as usize;
pub const CANONICAL_LEN: usize = PADDED_COUNT + (MAX_VALUE + 1) as usize;

/// Number at position `idx` of the canonical list
fn canonical_number(idx: usize) -> MajorNumber {
    debug_assert!(idx < CANONICAL_LEN);
    if idx < PADDED_COUNT {
        MajorNumber::from_parts(idx as u8, true)
    } else {
        MajorNumber::from_parts((idx - PADDED_COUNT) as u8, false)
    }
}

/// Position of `number` in the canonical list
pub fn canonical_index(number: MajorNumber) -> usize {
    if number.is_zero_padded() {
        number.value() as usize
    } else {
        PADDED_COUNT + number.value() as usize
    }
}

/// Iterate the full canonical list
pub fn canonical_order() -> Iter {
    Iter {
        next: 0,
        end: CANONICAL_LEN,
    }
}

/// Parse one range endpoint as typed by the user
pub fn parse_range_value(text: &str) -> Result<MajorNumber> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MajorError::InvalidArgument(
            "range value cannot be empty".to_string(),
        ));
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| MajorError::InvalidArgument(format!("invalid numeric value: {trimmed}")))?;

    if !(0..=MAX_VALUE as i64).contains(&value) {
        return Err(MajorError::Range(format!(
            "value must be between 0 and {MAX_VALUE}: {value}"
        )));
    }

    let is_zero_padded =
        trimmed.len() == 2 && trimmed.starts_with('0') && value <= MAX_PADDED_VALUE as i64;

    MajorNumber::new(value as i32, is_zero_padded)
}

/// A contiguous slice of the canonical list.
///
/// Holds only the slice bounds; every iteration walks the slice afresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSequence {
    start: usize,
    end: usize,
}

impl NumberSequence {
    pub fn first(&self) -> MajorNumber {
        canonical_number(self.start)
    }

    pub fn last(&self) -> MajorNumber {
        canonical_number(self.end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: a resolved range includes at least its start
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> Iter {
        Iter {
            next: self.start,
            end: self.end + 1,
        }
    }

    pub fn to_vec(&self) -> Vec<MajorNumber> {
        self.iter().collect()
    }
}

impl IntoIterator for NumberSequence {
    type Item = MajorNumber;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl IntoIterator for &NumberSequence {
    type Item = MajorNumber;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Iter {
    next: usize,
    end: usize,
}

impl Iterator for Iter {
    type Item = MajorNumber;

    fn next(&mut self) -> Option<MajorNumber> {
        if self.next >= self.end {
            return None;
        }
        let n = canonical_number(self.next);
        self.next += 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter {}

/// Resolve a range typed as text, e.g. `("00", "09")` or `("08", "2")`
pub fn generate_sequence(range_start: &str, range_end: &str) -> Result<NumberSequence> {
    let start = parse_range_value(range_start)?;
    let end = parse_range_value(range_end)?;
    generate_between(start, end)
}

/// Resolve a range from already parsed endpoints
pub fn generate_between(start: MajorNumber, end: MajorNumber) -> Result<NumberSequence> {
    let start_idx = canonical_index(start);
    let end_idx = canonical_index(end);

    if start_idx > end_idx {
        return Err(MajorError::InvalidArgument(format!(
            "start number {start} must come before end number {end} in sequence"
        )));
    }

    Ok(NumberSequence {
        start: start_idx,
        end: end_idx,
    })
}

/// How numbers are shown to the user
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// leading zeros everywhere: 00, 01, .., 99
    #[default]
    Padded,
    /// no leading zeros except for the padded bucket: 0, 1, .., 99
    Natural,
}

pub fn format_number(number: MajorNumber, format: NumberFormat) -> String {
    match format {
        NumberFormat::Natural if number.is_zero_padded() => format!("0{}", number.value()),
        NumberFormat::Natural => number.value().to_string(),
        NumberFormat::Padded => format!("{:02}", number.value()),
    }
}

/// Training order for a range under a display format.
///
/// In padded format a range with both ends in the padded bucket stays inside
/// it, so `00`..`05` never spills into the plain numbers.
pub fn generate_training_sequence(
    range_start: &str,
    range_end: &str,
    format: NumberFormat,
) -> Result<Vec<MajorNumber>> {
    let start = parse_range_value(range_start)?;
    let end = parse_range_value(range_end)?;

    if format == NumberFormat::Padded && start.is_zero_padded() && end.is_zero_padded() {
        if start.value() > end.value() {
            return Err(MajorError::InvalidArgument(format!(
                "start number {start} must come before end number {end} in sequence"
            )));
        }
        return Ok((start.value()..=end.value())
            .map(|v| MajorNumber::from_parts(v, true))
            .collect());
    }

    Ok(generate_between(start, end)?.to_vec())
}
