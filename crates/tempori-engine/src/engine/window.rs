//! Delta threshold and the running timestamp window of a partial occurrence.

use std::str::FromStr;

use tempori_core::Timestamp;

use super::error::DeltaError;

/// Maximum allowed spread between the earliest and latest edge of one occurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    /// Every window is admissible.
    #[default]
    Unbounded,
    Bounded(u64),
}

impl Delta {
    #[inline]
    pub fn admits(self, window: TimeWindow) -> bool {
        match self {
            Delta::Unbounded => true,
            Delta::Bounded(limit) => window.span() <= limit,
        }
    }

    /// Latest timestamp still admissible for a window starting at `min`.
    #[inline]
    pub(crate) fn upper_bound(self, min: Timestamp) -> Option<Timestamp> {
        match self {
            Delta::Unbounded => None,
            Delta::Bounded(limit) => Some(min.saturating_add_unsigned(limit)),
        }
    }
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delta::Unbounded => f.write_str("unbounded"),
            Delta::Bounded(limit) => write!(f, "{limit}"),
        }
    }
}

impl FromStr for Delta {
    type Err = DeltaError;

    /// Accepts a non-negative integer, or `inf` / `unbounded`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if matches!(s, "inf" | "unbounded") {
            return Ok(Delta::Unbounded);
        }
        s.parse()
            .map(Delta::Bounded)
            .map_err(|_| DeltaError::Invalid(s.to_owned()))
    }
}

/// Inclusive `[min, max]` range over the timestamps of the edges bound so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimeWindow {
    pub min: Timestamp,
    pub max: Timestamp,
}

impl TimeWindow {
    pub fn at(time: Timestamp) -> Self {
        Self {
            min: time,
            max: time,
        }
    }

    /// The window after admitting one more timestamp.
    #[inline]
    pub fn widen(self, time: Timestamp) -> Self {
        Self {
            min: self.min.min(time),
            max: self.max.max(time),
        }
    }

    #[inline]
    pub fn span(self) -> u64 {
        self.max.abs_diff(self.min)
    }
}

/// Widen an optional window; an empty window starts at `time`.
#[inline]
pub(crate) fn widen(window: Option<TimeWindow>, time: Timestamp) -> TimeWindow {
    match window {
        Some(w) => w.widen(time),
        None => TimeWindow::at(time),
    }
}
