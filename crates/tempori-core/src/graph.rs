//! Read-only temporal adjacency index.
//!
//! Every node keeps its incident edges in an ordered map keyed by timestamp,
//! one map per direction. Directed graphs keep an outgoing, an incoming and a
//! reciprocal (both directions merged) view; undirected graphs only keep the
//! reciprocal view and answer every direction from it.
//!
//! Parallel edges between the same pair of nodes are additionally indexed by
//! node pair, sorted by `(timestamp, edge id)`, so that `edges_between` is a
//! hash lookup followed by a slice walk.
//!
//! The index is built once by `GraphBuilder::build` and never mutated.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::RangeInclusive;

use crate::interner::Label;

/// Node id as written in the graph file.
pub type NodeId = u32;

/// Dense edge id, assigned in insertion order.
pub type EdgeId = u32;

/// Edge timestamp.
pub type Timestamp = i64;

/// Lookup direction relative to the node being asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edges leaving the node.
    Out,
    /// Edges entering the node.
    In,
    /// Both directions merged.
    Either,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub src: NodeId,
    pub dst: NodeId,
    pub time: Timestamp,
    pub label: Label,
}

/// One neighbor entry of a node's temporal adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Incidence {
    pub neighbor: NodeId,
    pub edge: EdgeId,
}

/// Timestamp-ordered incidences of one node in one direction.
pub type TemporalAdjacency = BTreeMap<Timestamp, Vec<Incidence>>;

static NO_NEIGHBORS: BTreeSet<NodeId> = BTreeSet::new();
static NO_INCIDENCES: TemporalAdjacency = BTreeMap::new();

/// Errors raised while assembling a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    #[error("edge endpoint {0} is not a declared node")]
    UnknownNode(NodeId),

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),
}

#[derive(Debug, Clone, Default)]
struct View {
    adjacency: TemporalAdjacency,
    neighbors: BTreeSet<NodeId>,
}

impl View {
    fn insert(&mut self, time: Timestamp, neighbor: NodeId, edge: EdgeId) {
        self.adjacency
            .entry(time)
            .or_default()
            .push(Incidence { neighbor, edge });
        self.neighbors.insert(neighbor);
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    label: Label,
    degree: usize,
    out: View,
    inc: View,
    recip: View,
}

impl NodeEntry {
    fn new(label: Label) -> Self {
        Self {
            label,
            degree: 0,
            out: View::default(),
            inc: View::default(),
            recip: View::default(),
        }
    }
}

/// Incremental graph construction. Validation happens here, never in the index.
///
/// A node pair holds at most one edge per timestamp. Adding another edge
/// between the same pair at the same timestamp overwrites the earlier one in
/// place (last insertion wins); undirected graphs treat both orientations as
/// the same pair.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    directed: bool,
    nodes: BTreeMap<NodeId, Label>,
    edges: Vec<Edge>,
    events: HashMap<((NodeId, NodeId), Timestamp), EdgeId>,
}

impl GraphBuilder {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            events: HashMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn add_node(&mut self, id: NodeId, label: Label) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(id, label);
        Ok(())
    }

    /// Add a time-stamped edge, returning its id.
    ///
    /// Returns the id of the overwritten edge when the pair already has an
    /// edge at `time`.
    pub fn add_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        time: Timestamp,
        label: Label,
    ) -> Result<EdgeId, GraphError> {
        if src == dst {
            return Err(GraphError::SelfLoop(src));
        }
        for endpoint in [src, dst] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        let key = (pair_key(self.directed, src, dst), time);
        if let Some(&id) = self.events.get(&key) {
            self.edges[id as usize] = Edge {
                id,
                src,
                dst,
                time,
                label,
            };
            return Ok(id);
        }
        let id = self.edges.len() as EdgeId;
        self.events.insert(key, id);
        self.edges.push(Edge {
            id,
            src,
            dst,
            time,
            label,
        });
        Ok(id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Freeze the graph into its read-only index.
    pub fn build(self) -> TemporalGraph {
        let mut nodes: BTreeMap<NodeId, NodeEntry> = self
            .nodes
            .iter()
            .map(|(&id, &label)| (id, NodeEntry::new(label)))
            .collect();
        let mut pairs: HashMap<(NodeId, NodeId), Vec<EdgeId>> = HashMap::new();

        for edge in &self.edges {
            let key = pair_key(self.directed, edge.src, edge.dst);
            pairs.entry(key).or_default().push(edge.id);

            // Endpoints were validated in add_edge.
            if let Some(src) = nodes.get_mut(&edge.src) {
                src.degree += 1;
                src.recip.insert(edge.time, edge.dst, edge.id);
                if self.directed {
                    src.out.insert(edge.time, edge.dst, edge.id);
                }
            }
            if let Some(dst) = nodes.get_mut(&edge.dst) {
                dst.degree += 1;
                dst.recip.insert(edge.time, edge.src, edge.id);
                if self.directed {
                    dst.inc.insert(edge.time, edge.src, edge.id);
                }
            }
        }

        for ids in pairs.values_mut() {
            ids.sort_by_key(|&id| (self.edges[id as usize].time, id));
        }

        let mut by_label: HashMap<Label, Vec<NodeId>> = HashMap::new();
        for (&id, entry) in &nodes {
            by_label.entry(entry.label).or_default().push(id);
        }

        TemporalGraph {
            directed: self.directed,
            nodes,
            edges: self.edges,
            pairs,
            by_label,
        }
    }
}

fn pair_key(directed: bool, src: NodeId, dst: NodeId) -> (NodeId, NodeId) {
    if directed || src < dst {
        (src, dst)
    } else {
        (dst, src)
    }
}

/// Immutable temporal graph index.
#[derive(Debug, Clone)]
pub struct TemporalGraph {
    directed: bool,
    nodes: BTreeMap<NodeId, NodeEntry>,
    edges: Vec<Edge>,
    pairs: HashMap<(NodeId, NodeId), Vec<EdgeId>>,
    by_label: HashMap<Label, Vec<NodeId>>,
}

impl TemporalGraph {
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(&id).map(|entry| Node {
            id,
            label: entry.label,
        })
    }

    pub fn label_of(&self, id: NodeId) -> Option<Label> {
        self.nodes.get(&id).map(|entry| entry.label)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().map(|(&id, entry)| Node {
            id,
            label: entry.label,
        })
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize)
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Nodes carrying `label`, ascending by id.
    pub fn nodes_with_label(&self, label: Label) -> &[NodeId] {
        self.by_label.get(&label).map_or(&[][..], Vec::as_slice)
    }

    /// Distinct node labels present in the graph.
    pub fn node_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.by_label.keys().copied()
    }

    /// Distinct edge labels present in the graph.
    pub fn edge_labels(&self) -> BTreeSet<Label> {
        self.edges.iter().map(|e| e.label).collect()
    }

    /// Out-degree plus in-degree, counting parallel edges.
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes.get(&id).map_or(0, |entry| entry.degree)
    }

    /// Undirected graphs answer every direction from the reciprocal view.
    #[inline]
    fn effective(&self, direction: Direction) -> Direction {
        if self.directed {
            direction
        } else {
            Direction::Either
        }
    }

    fn view(&self, id: NodeId, direction: Direction) -> Option<&View> {
        let entry = self.nodes.get(&id)?;
        Some(match self.effective(direction) {
            Direction::Out => &entry.out,
            Direction::In => &entry.inc,
            Direction::Either => &entry.recip,
        })
    }

    /// Neighbors of `id` in `direction`, ascending by id.
    pub fn neighbors(&self, id: NodeId, direction: Direction) -> &BTreeSet<NodeId> {
        self.view(id, direction)
            .map_or(&NO_NEIGHBORS, |view| &view.neighbors)
    }

    /// Timestamp-ordered adjacency of `id` in `direction`.
    pub fn adjacency(&self, id: NodeId, direction: Direction) -> &TemporalAdjacency {
        self.view(id, direction)
            .map_or(&NO_INCIDENCES, |view| &view.adjacency)
    }

    /// Incidences of `id` whose timestamp falls inside `window`, in timestamp order.
    pub fn edges_in_window(
        &self,
        id: NodeId,
        direction: Direction,
        window: RangeInclusive<Timestamp>,
    ) -> impl Iterator<Item = (Timestamp, Incidence)> + '_ {
        self.adjacency(id, direction)
            .range(window)
            .flat_map(|(&time, incidences)| incidences.iter().map(move |&inc| (time, inc)))
    }

    /// All parallel edges between `u` and `v`, ordered by `(timestamp, id)`.
    ///
    /// `direction` is relative to `u`: `Out` yields edges `u → v`, `In` yields
    /// edges `v → u`, `Either` merges both. Undirected graphs ignore it.
    pub fn edges_between(&self, u: NodeId, v: NodeId, direction: Direction) -> EdgesBetween<'_> {
        let lookup = |src, dst| {
            self.pairs
                .get(&pair_key(self.directed, src, dst))
                .map_or(&[][..], Vec::as_slice)
        };
        let (first, second) = match self.effective(direction) {
            Direction::Out => (lookup(u, v), &[][..]),
            Direction::In => (lookup(v, u), &[][..]),
            Direction::Either if self.directed => (lookup(u, v), lookup(v, u)),
            Direction::Either => (lookup(u, v), &[][..]),
        };
        EdgesBetween {
            edges: &self.edges,
            first,
            second,
        }
    }

    /// Node pairs that carry at least one edge, with their edges in time order.
    ///
    /// Pairs come out sorted by `(src, dst)`; undirected pairs are normalized
    /// so that `src < dst`.
    pub fn pairs(&self) -> Vec<((NodeId, NodeId), &[EdgeId])> {
        let mut pairs: Vec<_> = self
            .pairs
            .iter()
            .map(|(&key, ids)| (key, ids.as_slice()))
            .collect();
        pairs.sort_by_key(|(key, _)| *key);
        pairs
    }
}

/// Merge of up to two time-sorted edge id slices.
#[derive(Clone, Debug)]
pub struct EdgesBetween<'g> {
    edges: &'g [Edge],
    first: &'g [EdgeId],
    second: &'g [EdgeId],
}

impl EdgesBetween<'_> {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }
}

impl<'g> Iterator for EdgesBetween<'g> {
    type Item = &'g Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let take_first = match (self.first.first(), self.second.first()) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(&a), Some(&b)) => {
                let (a, b) = (&self.edges[a as usize], &self.edges[b as usize]);
                (a.time, a.id) <= (b.time, b.id)
            }
        };
        let slice = if take_first {
            &mut self.first
        } else {
            &mut self.second
        };
        let current: &'g [EdgeId] = *slice;
        let (&id, rest) = current.split_first()?;
        *slice = rest;
        Some(&self.edges[id as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}
