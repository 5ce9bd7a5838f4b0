use std::cmp::Ordering;
use std::fmt;

use crate::error::{MajorError, Result};

pub const MAX_VALUE: i32 = 99;
pub const MAX_PADDED_VALUE: i32 = 9;

/// A two-digit training unit of the Major System.
///
/// Zero-padded numbers (`00`..`09`) are a separate bucket from the plain
/// `0`..`9`, so the padding flag takes part in equality but not in ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MajorNumber {
    value: u8,
    is_zero_padded: bool,
}

impl MajorNumber {
    pub fn new(value: i32, is_zero_padded: bool) -> Result<Self> {
        if !(0..=MAX_VALUE).contains(&value) {
            return Err(MajorError::Range(format!(
                "value must be between 0 and {MAX_VALUE}, got {value}"
            )));
        }

        if is_zero_padded && value > MAX_PADDED_VALUE {
            return Err(MajorError::InvalidArgument(format!(
                "zero-padded numbers can only be 0-{MAX_PADDED_VALUE}, got {value}"
            )));
        }

        Ok(Self {
            value: value as u8,
            is_zero_padded,
        })
    }

    /// Caller guarantees the invariants (value <= 99, padded only for 0-9)
    pub(crate) const fn from_parts(value: u8, is_zero_padded: bool) -> Self {
        Self {
            value,
            is_zero_padded,
        }
    }

    pub fn from_value(value: i32) -> Result<Self> {
        Self::new(value, false)
    }

    pub fn from_zero_padded(value: i32) -> Result<Self> {
        Self::new(value, true)
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_zero_padded(&self) -> bool {
        self.is_zero_padded
    }

    pub fn display(&self) -> String {
        if self.is_zero_padded {
            format!("{:02}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

impl fmt::Display for MajorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<MajorNumber> for u8 {
    fn from(n: MajorNumber) -> Self {
        n.value
    }
}

impl From<MajorNumber> for i32 {
    fn from(n: MajorNumber) -> Self {
        n.value as i32
    }
}

/// Orders by value. Padded and plain numbers with the same value (`05` and
/// `5`) are unequal, so padding breaks that tie with the padded one first;
/// without it `Ord` would disagree with `Eq`. Callers that want a pure value
/// comparison should compare `value()` instead.
impl Ord for MajorNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| other.is_zero_padded.cmp(&self.is_zero_padded))
    }
}

impl PartialOrd for MajorNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
