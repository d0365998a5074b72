//! The discrete portion bucket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discrete serving-size key used to look up ingredient quantities and
/// base timer values. All quantity scaling resolves to one of these
/// three buckets; finer-grained adjustment happens through the
/// continuous timer scale factor instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum Portion {
    One,
    #[default]
    Two,
    Four,
}

impl Portion {
    /// Maps a raw unit/people count to its bucket: 1 -> One, 2-3 -> Two,
    /// 4+ -> Four. Zero is treated as a single portion.
    pub fn from_count(count: u32) -> Self {
        if count <= 1 {
            Portion::One
        } else if count <= 3 {
            Portion::Two
        } else {
            Portion::Four
        }
    }

    /// Numeric value of the bucket.
    pub fn as_u8(self) -> u8 {
        match self {
            Portion::One => 1,
            Portion::Two => 2,
            Portion::Four => 4,
        }
    }
}

impl From<Portion> for u8 {
    fn from(portion: Portion) -> Self {
        portion.as_u8()
    }
}

impl TryFrom<u8> for Portion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Portion::One),
            2 => Ok(Portion::Two),
            4 => Ok(Portion::Four),
            other => Err(format!("Invalid portion bucket: {other}")),
        }
    }
}

impl FromStr for Portion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid portion bucket: {s}"))?;
        Portion::try_from(value)
    }
}

impl fmt::Display for Portion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
