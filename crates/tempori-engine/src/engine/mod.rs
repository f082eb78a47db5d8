//! Temporal motif search.
//!
//! `MatchingOrder` plans the visiting order once per query; `Matcher` runs the
//! backtracking search and streams each `Occurrence` to an `OccurrenceSink`.

pub mod error;
pub mod matcher;
pub mod occurrence;
pub mod order;
pub mod sink;
pub mod state;
pub mod trace;
pub mod verify;
pub mod window;

#[cfg(test)]
mod trace_tests;

pub use error::{DeltaError, MatchError, MatchResult};
pub use matcher::{MatchOutcome, Matcher, MatcherBuilder};
pub use occurrence::{EdgeRecord, NodeRecord, Occurrence, OccurrenceDisplay, OccurrenceRecord};
pub use order::{MatchingOrder, OrderStrategy, Requirement, Step};
pub use sink::{Collect, Discard, Limit, Mapping, OccurrenceSink};
pub use state::{EdgeBinding, MatchState};
pub use trace::{NoopTracer, PrintTracer, Rejection, Tracer, Verbosity};
pub use verify::debug_verify_occurrence;
pub use window::{Delta, TimeWindow};
