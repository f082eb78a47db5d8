//! Backtracking matcher.
//!
//! Query nodes are bound in the planned order. At each position the matcher
//! tries every structural candidate, then for each candidate every
//! combination of target edge instances realizing the query edges to earlier
//! positions. Instances are pruned one at a time against the delta window, so
//! a combination is abandoned as soon as its window grows too wide.

use std::ops::ControlFlow;

use tempori_core::{Edge, NodeId, TemporalGraph};

use super::error::{MatchError, MatchResult, directedness};
use super::occurrence::Occurrence;
use super::order::{MatchingOrder, OrderStrategy, Step};
use super::sink::OccurrenceSink;
use super::state::MatchState;
use super::trace::{NoopTracer, Rejection, Tracer};
use super::verify::debug_verify_occurrence;
use super::window::{self, Delta};

/// Result of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub occurrences: u64,
    /// False when the sink stopped the search, even if nothing was left to find.
    pub completed: bool,
}

/// Builder for `Matcher`.
pub struct MatcherBuilder<'g> {
    query: &'g TemporalGraph,
    target: &'g TemporalGraph,
    delta: Delta,
    ordered: bool,
    strategy: OrderStrategy,
}

impl<'g> MatcherBuilder<'g> {
    /// Maximum timestamp spread of one occurrence (default: unbounded).
    pub fn delta(mut self, delta: Delta) -> Self {
        self.delta = delta;
        self
    }

    /// Require target edges to keep the relative time order of the query edges.
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn strategy(mut self, strategy: OrderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(self) -> MatchResult<Matcher<'g>> {
        if self.query.is_directed() != self.target.is_directed() {
            return Err(MatchError::DirectionMismatch {
                query: directedness(self.query.is_directed()),
                target: directedness(self.target.is_directed()),
            });
        }
        Ok(Matcher {
            query: self.query,
            target: self.target,
            order: MatchingOrder::plan(self.query, self.strategy),
            delta: self.delta,
            ordered: self.ordered,
        })
    }
}

/// Enumerates the occurrences of a query graph in a target graph.
///
/// The matcher is immutable; each `run` owns a fresh `MatchState`.
#[derive(Debug)]
pub struct Matcher<'g> {
    query: &'g TemporalGraph,
    target: &'g TemporalGraph,
    order: MatchingOrder,
    delta: Delta,
    ordered: bool,
}

impl<'g> Matcher<'g> {
    pub fn builder(query: &'g TemporalGraph, target: &'g TemporalGraph) -> MatcherBuilder<'g> {
        MatcherBuilder {
            query,
            target,
            delta: Delta::Unbounded,
            ordered: false,
            strategy: OrderStrategy::default(),
        }
    }

    /// Count all occurrences.
    pub fn count(&self) -> u64 {
        self.run(&mut super::sink::Discard).occurrences
    }

    pub fn run<S: OccurrenceSink>(&self, sink: &mut S) -> MatchOutcome {
        self.run_with(sink, &mut NoopTracer)
    }

    pub fn run_with<S: OccurrenceSink, T: Tracer>(
        &self,
        sink: &mut S,
        tracer: &mut T,
    ) -> MatchOutcome {
        if self.order.is_empty() {
            return MatchOutcome {
                occurrences: 0,
                completed: true,
            };
        }
        let mut search = Search {
            matcher: self,
            state: MatchState::new(self.order.len(), self.query.edge_count()),
            sink,
            tracer,
            occurrences: 0,
        };
        let flow = search.visit(0);
        MatchOutcome {
            occurrences: search.occurrences,
            completed: flow.is_continue(),
        }
    }
}

struct Search<'m, 'g, S, T> {
    matcher: &'m Matcher<'g>,
    state: MatchState,
    sink: &'m mut S,
    tracer: &'m mut T,
    occurrences: u64,
}

impl<'m, S: OccurrenceSink, T: Tracer> Search<'m, '_, S, T> {
    fn visit(&mut self, position: usize) -> ControlFlow<()> {
        let matcher = self.matcher;
        let Some(step) = matcher.order.step(position) else {
            return self.emit();
        };

        for candidate in self.candidates(step) {
            self.tracer.trace_candidate(position, step.node, candidate);
            self.state.assign(position, candidate);
            let flow = self.bind(position, step, candidate, 0);
            self.state.unassign(position);
            self.tracer.trace_backtrack(position, candidate);
            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }

    /// Unused target nodes with the step's label, adjacent to every bound parent.
    ///
    /// Walks the smallest parent neighbor set and checks the others, so the
    /// result is in ascending target id.
    fn candidates(&self, step: &Step) -> Vec<NodeId> {
        let target = self.matcher.target;
        let state = &self.state;
        let keep = |node: &NodeId| target.label_of(*node) == Some(step.label) && !state.is_used(*node);

        let mut sets: Vec<_> = step
            .lookups()
            .filter_map(|(parent, direction)| {
                let anchor = state.target_of(parent)?;
                Some(target.neighbors(anchor, direction))
            })
            .collect();

        if sets.is_empty() {
            return target
                .nodes_with_label(step.label)
                .iter()
                .copied()
                .filter(|n| !state.is_used(*n))
                .collect();
        }

        sets.sort_by_key(|set| set.len());
        let (smallest, rest) = sets.split_at(1);
        smallest[0]
            .iter()
            .copied()
            .filter(keep)
            .filter(|n| rest.iter().all(|set| set.contains(n)))
            .collect()
    }

    /// Bind target edges for the step's requirements from `index` on, then descend.
    fn bind(
        &mut self,
        position: usize,
        step: &'m Step,
        candidate: NodeId,
        index: usize,
    ) -> ControlFlow<()> {
        let Some(requirement) = step.requirements.get(index) else {
            return self.visit(position + 1);
        };
        let matcher = self.matcher;
        let (Some(anchor), Some(query_edge)) = (
            self.state.target_of(requirement.parent),
            matcher.query.edge(requirement.query_edge),
        ) else {
            return ControlFlow::Continue(());
        };
        let upper = self
            .state
            .window()
            .and_then(|w| matcher.delta.upper_bound(w.min));

        for edge in matcher
            .target
            .edges_between(anchor, candidate, requirement.direction)
        {
            // Instances come in time order; nothing later can fit either.
            if upper.is_some_and(|limit| edge.time > limit) {
                let span = window::widen(self.state.window(), edge.time).span();
                self.tracer
                    .trace_edge_rejected(query_edge, edge, Rejection::Window(span));
                break;
            }
            if let Some(reason) = self.reject(query_edge, edge) {
                self.tracer.trace_edge_rejected(query_edge, edge, reason);
                continue;
            }

            self.state.push_edge(query_edge.id, edge.id, edge.time);
            if let Some(w) = self.state.window() {
                self.tracer.trace_edge_bound(query_edge, edge, w);
            }
            let flow = self.bind(position, step, candidate, index + 1);
            self.state.pop_edge();
            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }

    fn reject(&self, query_edge: &Edge, edge: &Edge) -> Option<Rejection> {
        if edge.label != query_edge.label {
            return Some(Rejection::Label);
        }
        if self.state.is_edge_bound(edge.id) {
            return Some(Rejection::Reused);
        }
        let widened = window::widen(self.state.window(), edge.time);
        if !self.matcher.delta.admits(widened) {
            return Some(Rejection::Window(widened.span()));
        }
        if self.matcher.ordered && !self.keeps_order(query_edge, edge) {
            return Some(Rejection::Order);
        }
        None
    }

    /// Whether `edge` compares to every bound target edge the way `query_edge`
    /// compares to the query edge it realizes.
    fn keeps_order(&self, query_edge: &Edge, edge: &Edge) -> bool {
        let query = self.matcher.query;
        self.state.bindings().iter().all(|binding| {
            query.edge(binding.query_edge).is_some_and(|bound| {
                query_edge.time.cmp(&bound.time) == edge.time.cmp(&binding.time)
            })
        })
    }

    fn emit(&mut self) -> ControlFlow<()> {
        let matcher = self.matcher;
        let occurrence = Occurrence::new(matcher.query, matcher.target, &matcher.order, &self.state);
        debug_verify_occurrence(&occurrence, matcher.delta);
        self.occurrences += 1;
        self.tracer.trace_occurrence(self.occurrences, &occurrence);
        self.sink.accept(&occurrence)
    }
}
