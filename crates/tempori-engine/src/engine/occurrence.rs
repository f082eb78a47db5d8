//! Completed embeddings.
//!
//! An `Occurrence` borrows the search state at the moment all query nodes are
//! bound. It lives only for the duration of one sink call; sinks that need to
//! keep it take an owned `OccurrenceRecord`.

use std::fmt;

use serde::Serialize;
use tempori_core::{Edge, EdgeId, LabelTable, NodeId, TemporalGraph, Timestamp};

use super::order::MatchingOrder;
use super::state::MatchState;
use super::window::TimeWindow;

/// A complete query-to-target mapping, valid during one sink call.
#[derive(Clone, Copy)]
pub struct Occurrence<'a> {
    query: &'a TemporalGraph,
    target: &'a TemporalGraph,
    order: &'a MatchingOrder,
    state: &'a MatchState,
}

impl<'a> Occurrence<'a> {
    pub(crate) fn new(
        query: &'a TemporalGraph,
        target: &'a TemporalGraph,
        order: &'a MatchingOrder,
        state: &'a MatchState,
    ) -> Self {
        Self {
            query,
            target,
            order,
            state,
        }
    }

    pub fn query(&self) -> &'a TemporalGraph {
        self.query
    }

    pub fn target(&self) -> &'a TemporalGraph {
        self.target
    }

    /// Target node bound to `query_node`.
    pub fn target_node(&self, query_node: NodeId) -> Option<NodeId> {
        self.state.target_of(self.order.position_of(query_node)?)
    }

    /// `(query node, target node)` in ascending query node id.
    pub fn node_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + 'a {
        let state = self.state;
        self.order
            .positions()
            .filter_map(move |(node, position)| Some((node, state.target_of(position)?)))
    }

    /// Target edge realizing `query_edge`.
    pub fn target_edge(&self, query_edge: EdgeId) -> Option<&'a Edge> {
        self.target.edge(self.state.target_edge_of(query_edge)?)
    }

    /// `(query edge, target edge)` in query edge id order.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (&'a Edge, &'a Edge)> + 'a {
        let (state, target) = (self.state, self.target);
        self.query.edges().iter().filter_map(move |q| {
            let t = target.edge(state.target_edge_of(q.id)?)?;
            Some((q, t))
        })
    }

    /// Timestamp range covered by the bound edges; `None` for edgeless queries.
    pub fn window(&self) -> Option<TimeWindow> {
        self.state.window()
    }

    /// Owned snapshot with label strings resolved.
    pub fn to_record(&self, labels: &LabelTable) -> OccurrenceRecord {
        let nodes = self
            .node_pairs()
            .map(|(query, target)| NodeRecord {
                query,
                target,
                label: self
                    .target
                    .label_of(target)
                    .map(|l| labels.node_name(l))
                    .unwrap_or_default(),
            })
            .collect();
        let edges = self
            .edge_pairs()
            .map(|(q, t)| EdgeRecord {
                query_edge: q.id,
                src: t.src,
                dst: t.dst,
                time: t.time,
                label: labels.edge_name(t.label),
            })
            .collect();
        OccurrenceRecord { nodes, edges }
    }

    /// Line formatter: `(node:label),…` then a tab then `(src,dst,time:label),…`.
    pub fn display<'d>(&self, labels: &'d LabelTable) -> OccurrenceDisplay<'d>
    where
        'a: 'd,
    {
        OccurrenceDisplay {
            occurrence: *self,
            labels,
        }
    }
}

impl fmt::Debug for Occurrence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Occurrence")
            .field("nodes", &self.node_pairs().collect::<Vec<_>>())
            .field(
                "edges",
                &self
                    .edge_pairs()
                    .map(|(q, t)| (q.id, t.id))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

pub struct OccurrenceDisplay<'a> {
    occurrence: Occurrence<'a>,
    labels: &'a LabelTable,
}

impl fmt::Display for OccurrenceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.occurrence.target;
        for (i, (_, node)) in self.occurrence.node_pairs().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            let label = target
                .label_of(node)
                .map(|l| self.labels.node_name(l))
                .unwrap_or_default();
            write!(f, "({node}:{label})")?;
        }
        f.write_str("\t")?;
        for (i, (_, edge)) in self.occurrence.edge_pairs().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(
                f,
                "({},{},{}:{})",
                edge.src,
                edge.dst,
                edge.time,
                self.labels.edge_name(edge.label)
            )?;
        }
        Ok(())
    }
}

/// Owned, serializable copy of an occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OccurrenceRecord {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub query: NodeId,
    pub target: NodeId,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub query_edge: EdgeId,
    pub src: NodeId,
    pub dst: NodeId,
    pub time: Timestamp,
    pub label: String,
}
