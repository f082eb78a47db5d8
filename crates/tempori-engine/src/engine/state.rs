//! Mutable search state.
//!
//! Every mutation is undone in reverse order on backtrack. Edge bindings are a
//! stack: each entry remembers the window in effect before it was pushed, so
//! popping restores the window without rescanning the bound edges.

use std::collections::HashSet;

use tempori_core::{EdgeId, NodeId, Timestamp};

use super::window::{self, TimeWindow};

/// One query edge bound to a target edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeBinding {
    pub query_edge: EdgeId,
    pub target_edge: EdgeId,
    pub time: Timestamp,
    /// Window before this binding was pushed.
    previous: Option<TimeWindow>,
}

#[derive(Debug)]
pub struct MatchState {
    /// Target node per matching-order position.
    assignment: Vec<Option<NodeId>>,
    used: HashSet<NodeId>,
    bindings: Vec<EdgeBinding>,
    /// Target edge per query edge id.
    by_query_edge: Vec<Option<EdgeId>>,
    window: Option<TimeWindow>,
}

impl MatchState {
    pub fn new(positions: usize, query_edges: usize) -> Self {
        Self {
            assignment: vec![None; positions],
            used: HashSet::new(),
            bindings: Vec::with_capacity(query_edges),
            by_query_edge: vec![None; query_edges],
            window: None,
        }
    }

    pub fn assign(&mut self, position: usize, target: NodeId) {
        debug_assert!(self.assignment[position].is_none());
        self.assignment[position] = Some(target);
        self.used.insert(target);
    }

    pub fn unassign(&mut self, position: usize) {
        if let Some(target) = self.assignment[position].take() {
            self.used.remove(&target);
        }
    }

    #[inline]
    pub fn target_of(&self, position: usize) -> Option<NodeId> {
        self.assignment.get(position).copied().flatten()
    }

    #[inline]
    pub fn is_used(&self, target: NodeId) -> bool {
        self.used.contains(&target)
    }

    /// Whether a target edge already realizes some query edge.
    #[inline]
    pub fn is_edge_bound(&self, target_edge: EdgeId) -> bool {
        self.bindings.iter().any(|b| b.target_edge == target_edge)
    }

    pub fn push_edge(&mut self, query_edge: EdgeId, target_edge: EdgeId, time: Timestamp) {
        let previous = self.window;
        self.window = Some(window::widen(previous, time));
        self.by_query_edge[query_edge as usize] = Some(target_edge);
        self.bindings.push(EdgeBinding {
            query_edge,
            target_edge,
            time,
            previous,
        });
    }

    pub fn pop_edge(&mut self) {
        if let Some(binding) = self.bindings.pop() {
            self.window = binding.previous;
            self.by_query_edge[binding.query_edge as usize] = None;
        }
    }

    #[inline]
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    #[inline]
    pub fn bindings(&self) -> &[EdgeBinding] {
        &self.bindings
    }

    #[inline]
    pub fn target_edge_of(&self, query_edge: EdgeId) -> Option<EdgeId> {
        self.by_query_edge.get(query_edge as usize).copied().flatten()
    }
}
