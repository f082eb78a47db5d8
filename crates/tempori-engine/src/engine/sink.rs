//! Occurrence consumers.

use std::num::NonZeroU64;
use std::ops::ControlFlow;

use tempori_core::{EdgeId, NodeId};

use super::occurrence::Occurrence;

/// Receives every occurrence as soon as the search completes it.
///
/// Returning `ControlFlow::Break` stops the search after this occurrence.
pub trait OccurrenceSink {
    fn accept(&mut self, occurrence: &Occurrence<'_>) -> ControlFlow<()>;
}

impl<F> OccurrenceSink for F
where
    F: FnMut(&Occurrence<'_>) -> ControlFlow<()>,
{
    fn accept(&mut self, occurrence: &Occurrence<'_>) -> ControlFlow<()> {
        self(occurrence)
    }
}

/// Pins a closure to the `OccurrenceSink` signature so it can be passed to `Matcher::run`.
pub fn from_fn<F>(f: F) -> F
where
    F: FnMut(&Occurrence<'_>) -> ControlFlow<()>,
{
    f
}

/// Accepts everything. The engine keeps the count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl OccurrenceSink for Discard {
    #[inline(always)]
    fn accept(&mut self, _occurrence: &Occurrence<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Id-level snapshot of one occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mapping {
    /// `(query node, target node)`, ascending query node id.
    pub nodes: Vec<(NodeId, NodeId)>,
    /// `(query edge, target edge)`, ascending query edge id.
    pub edges: Vec<(EdgeId, EdgeId)>,
}

impl Mapping {
    pub fn of(occurrence: &Occurrence<'_>) -> Self {
        Self {
            nodes: occurrence.node_pairs().collect(),
            edges: occurrence.edge_pairs().map(|(q, t)| (q.id, t.id)).collect(),
        }
    }
}

/// Keeps every occurrence as a `Mapping`, in emission order.
#[derive(Clone, Debug, Default)]
pub struct Collect {
    pub mappings: Vec<Mapping>,
}

impl Collect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OccurrenceSink for Collect {
    fn accept(&mut self, occurrence: &Occurrence<'_>) -> ControlFlow<()> {
        self.mappings.push(Mapping::of(occurrence));
        ControlFlow::Continue(())
    }
}

/// Forwards to `inner` and stops the search after `limit` occurrences.
///
/// The stop is requested on the `limit`-th occurrence without looking ahead,
/// so a search with exactly `limit` occurrences also ends with
/// `completed == false`.
#[derive(Debug)]
pub struct Limit<S> {
    inner: S,
    remaining: u64,
}

impl<S> Limit<S> {
    pub fn new(inner: S, limit: NonZeroU64) -> Self {
        Self {
            inner,
            remaining: limit.get(),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: OccurrenceSink> OccurrenceSink for Limit<S> {
    fn accept(&mut self, occurrence: &Occurrence<'_>) -> ControlFlow<()> {
        self.remaining = self.remaining.saturating_sub(1);
        let flow = self.inner.accept(occurrence);
        if self.remaining == 0 {
            return ControlFlow::Break(());
        }
        flow
    }
}
