//! ANSI color codes for terminal output.
//!
//! Used by the search tracer and the CLI report:
//! - Blue: node ids and positions
//! - Green: labels and accepted occurrences
//! - Red: rejections
//! - Dim: timestamps, edge ids, structure

/// ANSI color palette for CLI output.
///
/// Only standard 16-color ANSI codes, so output reads on light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}
