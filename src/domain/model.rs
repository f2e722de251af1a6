use serde::Deserialize;
use std::fmt;

use crate::utils::error::{EtlError, Result};

/// Institutional student identifier: `A0` followed by seven digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentId(String);

impl StudentId {
    pub const LEN: usize = 9;

    /// Returns `None` unless `raw` is exactly `A0` plus seven ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == Self::LEN
            && bytes.starts_with(b"A0")
            && bytes[2..].iter().all(u8::is_ascii_digit);
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Points earned over points possible for one learning outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePair {
    pub numerator: f64,
    pub denominator: f64,
}

impl ScorePair {
    pub fn new(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// One validated data line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub student_id: StudentId,
    pub scores: Vec<ScorePair>,
    /// 1-based source line, for diagnostics.
    pub line: usize,
    /// Score values as they appeared in the input, comma-joined.
    pub raw_scores: String,
}

/// Minimum passing ratio, kept within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT_PERCENT: u32 = 70;

    pub fn from_percent(percent: u32) -> Result<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn new(ratio: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(EtlError::InvalidConfigValueError {
                field: "threshold".to_string(),
                value: ratio.to_string(),
                reason: "Threshold must be between 0 and 1".to_string(),
            });
        }
        Ok(Self(ratio))
    }

    pub fn ratio(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(f64::from(Self::DEFAULT_PERCENT) / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeFlag {
    Met,
    NotMet,
}

impl OutcomeFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeFlag::Met => "1",
            OutcomeFlag::NotMet => "0",
        }
    }
}

impl fmt::Display for OutcomeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub student_id: StudentId,
    pub flags: Vec<OutcomeFlag>,
}

impl OutputRow {
    pub fn to_fields(&self) -> Vec<&str> {
        std::iter::once(self.student_id.as_str())
            .chain(self.flags.iter().map(|flag| flag.as_str()))
            .collect()
    }
}

/// Result of a full pass over the input: header plus rows in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub header: Vec<String>,
    pub rows: Vec<OutputRow>,
    pub skipped_lines: usize,
}

/// Which D2L line convention the input uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `#A01234567,10,20,30,40,#` free-text lines
    #[default]
    Marker,
    /// CSV rows with a `#A01234567` first cell and a lone `#` last cell
    Tabular,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Marker => f.write_str("marker"),
            InputFormat::Tabular => f.write_str("tabular"),
        }
    }
}
