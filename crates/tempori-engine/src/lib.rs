#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Matching engine for temporal motifs.
//!
//! Finds every embedding of a small labeled temporal query graph in a large
//! target graph such that all matched edge timestamps fit inside a window of
//! width `delta`.

pub mod engine;

#[cfg(test)]
mod test_utils;

// Re-export commonly used items at crate root
pub use engine::{
    Collect, Delta, DeltaError, Discard, Limit, Mapping, MatchError, MatchOutcome, MatchResult,
    Matcher, MatcherBuilder, MatchingOrder, NoopTracer, Occurrence, OccurrenceRecord,
    OccurrenceSink, OrderStrategy, PrintTracer, Rejection, TimeWindow, Tracer, Verbosity,
    debug_verify_occurrence,
};
