//! Funding amount buckets and display helpers.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Half-open `[min, max)` interval in whole currency units. A missing bound
/// is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountInterval {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Mutually exclusive funding amount bucket selectable in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmountRange {
    #[default]
    Any,
    Under100k,
    From100kTo500k,
    From500kTo1m,
    Over1m,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amount range token: {0:?}")]
pub struct AmountRangeParseError(pub String);

impl AmountRange {
    pub const ALL: [AmountRange; 5] = [
        AmountRange::Any,
        AmountRange::Under100k,
        AmountRange::From100kTo500k,
        AmountRange::From500kTo1m,
        AmountRange::Over1m,
    ];

    pub fn interval(self) -> AmountInterval {
        let (min, max) = match self {
            AmountRange::Any => (None, None),
            AmountRange::Under100k => (None, Some(100_000)),
            AmountRange::From100kTo500k => (Some(100_000), Some(500_000)),
            AmountRange::From500kTo1m => (Some(500_000), Some(1_000_000)),
            AmountRange::Over1m => (Some(1_000_000), None),
        };
        AmountInterval { min, max }
    }

    pub fn label(self) -> &'static str {
        match self {
            AmountRange::Any => "Any Amount",
            AmountRange::Under100k => "Under $100K",
            AmountRange::From100kTo500k => "$100K - $500K",
            AmountRange::From500kTo1m => "$500K - $1M",
            AmountRange::Over1m => "Over $1M",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            AmountRange::Any => "any",
            AmountRange::Under100k => "0-100k",
            AmountRange::From100kTo500k => "100k-500k",
            AmountRange::From500kTo1m => "500k-1m",
            AmountRange::Over1m => "1m+",
        }
    }

    /// Like `from_str`, but an unknown token selects no range at all.
    pub fn from_token_lenient(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl Display for AmountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for AmountRange {
    type Err = AmountRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(AmountRange::Any),
            "0-100k" | "under-100k" => Ok(AmountRange::Under100k),
            "100k-500k" => Ok(AmountRange::From100kTo500k),
            "500k-1m" => Ok(AmountRange::From500kTo1m),
            // "1m-+" is what older links carry
            "1m+" | "1m-+" | "over-1m" => Ok(AmountRange::Over1m),
            _ => Err(AmountRangeParseError(s.to_string())),
        }
    }
}

/// Short money label used on opportunity cards: `$1.5M`, `$250K`, `N/A`.
pub fn format_amount(amount: Option<u64>) -> String {
    match amount {
        None | Some(0) => "N/A".to_string(),
        Some(a) if a >= 1_000_000 => format!("${:.1}M", a as f64 / 1_000_000.0),
        Some(a) => format!("${:.0}K", a as f64 / 1_000.0),
    }
}
