//! Historical trend windows and per-pollutant summary statistics.
//!
//! Samples are hourly and ordered oldest first; a [`TimeRange`] selects the
//! most recent `N` of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pollutant::{PollutantKind, PollutantReadings};
use crate::types::Timestamp;

pub const RANGE_6H: &str = "6h";
pub const RANGE_12H: &str = "12h";
pub const RANGE_24H: &str = "24h";
pub const RANGE_7D: &str = "7d";

/// All valid range strings.
pub const VALID_TIME_RANGES: &[&str] = &[RANGE_6H, RANGE_12H, RANGE_24H, RANGE_7D];

/// One hourly sample of the pollutant and weather history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSample {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub pollutants: PollutantReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

/// How far back the trend view looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "24h")]
    TwentyFourHours,
    #[serde(rename = "7d")]
    SevenDays,
}

impl TimeRange {
    /// Every range, shortest first.
    pub const ALL: [TimeRange; 4] = [
        TimeRange::SixHours,
        TimeRange::TwelveHours,
        TimeRange::TwentyFourHours,
        TimeRange::SevenDays,
    ];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            RANGE_6H => Ok(Self::SixHours),
            RANGE_12H => Ok(Self::TwelveHours),
            RANGE_24H => Ok(Self::TwentyFourHours),
            RANGE_7D => Ok(Self::SevenDays),
            _ => Err(format!(
                "Invalid time range '{s}'. Must be one of: {}",
                VALID_TIME_RANGES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SixHours => RANGE_6H,
            Self::TwelveHours => RANGE_12H,
            Self::TwentyFourHours => RANGE_24H,
            Self::SevenDays => RANGE_7D,
        }
    }

    /// Number of hourly samples covered by the range.
    pub fn sample_count(&self) -> usize {
        match self {
            Self::SixHours => 6,
            Self::TwelveHours => 12,
            Self::TwentyFourHours => 24,
            Self::SevenDays => 168,
        }
    }
}

/// The most recent samples covered by `range`, or all of them if there are
/// fewer.
pub fn window(samples: &[HistoricalSample], range: TimeRange) -> &[HistoricalSample] {
    let start = samples.len().saturating_sub(range.sample_count());
    &samples[start..]
}

/// Average, minimum and maximum of one pollutant over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl PollutantStats {
    /// Statistics over the finite values in `values`. `None` when there are
    /// none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| Self {
            avg: sum / count as f64,
            min,
            max,
        })
    }
}

/// Statistics for `kind` over `samples`.
pub fn pollutant_stats(samples: &[HistoricalSample], kind: PollutantKind) -> Option<PollutantStats> {
    PollutantStats::from_values(samples.iter().map(|s| s.pollutants.get(kind)))
}

/// Statistics for every pollutant over `samples`. Empty when `samples` is.
pub fn summarize(samples: &[HistoricalSample]) -> BTreeMap<PollutantKind, PollutantStats> {
    PollutantKind::ALL
        .iter()
        .filter_map(|&kind| pollutant_stats(samples, kind).map(|stats| (kind, stats)))
        .collect()
}

/// Summary statistics for one trend window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub range: TimeRange,
    /// Samples actually in the window; fewer than the range covers when the
    /// history is short.
    pub samples: usize,
    pub stats: BTreeMap<PollutantKind, PollutantStats>,
}

impl WindowSummary {
    /// `None` when there are no samples at all.
    pub fn compute(samples: &[HistoricalSample], range: TimeRange) -> Option<Self> {
        let w = window(samples, range);
        if w.is_empty() {
            return None;
        }
        Some(Self {
            range,
            samples: w.len(),
            stats: summarize(w),
        })
    }
}
