//! Matching order planning.
//!
//! The planner fixes, once per query, the sequence in which query nodes get
//! bound during the search. A good order places each node right after as many
//! of its neighbors as possible, so the structural and temporal constraints
//! of a node are checkable the moment it is placed.
//!
//! For each position the plan also records the *parents*: earlier positions
//! adjacent to the node, with every query edge between them and the lookup
//! direction as seen from the parent.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tempori_core::{Direction, EdgeId, Label, NodeId, TemporalGraph};

/// How the planner picks the next query node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderStrategy {
    /// Most connections to already-ordered nodes first, then higher degree,
    /// then lower id. The first node is the one with the highest degree.
    #[default]
    Connectivity,
    /// Ascending query node id.
    Declared,
}

/// One query edge that must be realized when a step is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    /// Position of the parent whose target node anchors the lookup.
    pub parent: usize,
    pub query_edge: EdgeId,
    /// Direction from the parent towards the step's node.
    pub direction: Direction,
}

/// A query node at its position in the order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub node: NodeId,
    pub label: Label,
    /// Positions of already-ordered neighbors, ascending and deduplicated.
    pub parents: Vec<usize>,
    /// Query edges to already-ordered neighbors, grouped by parent, by edge id within a parent.
    pub requirements: Vec<Requirement>,
}

impl Step {
    /// Distinct `(parent position, direction)` pairs, for candidate generation.
    pub fn lookups(&self) -> impl Iterator<Item = (usize, Direction)> + '_ {
        let mut seen = HashSet::new();
        self.requirements
            .iter()
            .map(|r| (r.parent, r.direction))
            .filter(move |&lookup| seen.insert(lookup))
    }
}

/// Deterministic visiting order over the query nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchingOrder {
    steps: Vec<Step>,
    /// Query node id → position, iterated in ascending node id.
    positions: BTreeMap<NodeId, usize>,
}

impl MatchingOrder {
    pub fn plan(query: &TemporalGraph, strategy: OrderStrategy) -> Self {
        let sequence = match strategy {
            OrderStrategy::Connectivity => connectivity_sequence(query),
            OrderStrategy::Declared => query.nodes().map(|n| n.id).collect(),
        };

        let positions: BTreeMap<NodeId, usize> = sequence
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect();

        let steps = sequence
            .iter()
            .enumerate()
            .map(|(position, &node)| make_step(query, &positions, position, node))
            .collect();

        Self { steps, positions }
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub fn step(&self, position: usize) -> Option<&Step> {
        self.steps.get(position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Query nodes in visiting order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().map(|s| s.node)
    }

    pub fn position_of(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    /// `(query node, position)` pairs in ascending query node id.
    pub fn positions(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.positions.iter().map(|(&node, &position)| (node, position))
    }
}

fn connectivity_sequence(query: &TemporalGraph) -> Vec<NodeId> {
    let mut unordered: BTreeSet<NodeId> = query.nodes().map(|n| n.id).collect();
    let mut links: HashMap<NodeId, usize> = HashMap::new();
    let mut sequence = Vec::with_capacity(unordered.len());

    // Ascending iteration plus strict `>` keeps the lowest id on ties.
    let pick = |unordered: &BTreeSet<NodeId>, links: &HashMap<NodeId, usize>| {
        let mut best: Option<(usize, usize, NodeId)> = None;
        for &node in unordered {
            let rank = (
                links.get(&node).copied().unwrap_or(0),
                query.degree(node),
                node,
            );
            if best.is_none_or(|(l, d, _)| (rank.0, rank.1) > (l, d)) {
                best = Some(rank);
            }
        }
        best.map(|(_, _, node)| node)
    };

    while let Some(node) = pick(&unordered, &links) {
        unordered.remove(&node);
        sequence.push(node);
        for incidences in query.adjacency(node, Direction::Either).values() {
            for inc in incidences {
                if unordered.contains(&inc.neighbor) {
                    *links.entry(inc.neighbor).or_default() += 1;
                }
            }
        }
    }
    sequence
}

fn make_step(
    query: &TemporalGraph,
    positions: &BTreeMap<NodeId, usize>,
    position: usize,
    node: NodeId,
) -> Step {
    let mut requirements = Vec::new();
    for incidences in query.adjacency(node, Direction::Either).values() {
        for inc in incidences {
            let Some(&parent) = positions.get(&inc.neighbor) else {
                continue;
            };
            if parent >= position {
                continue;
            }
            let Some(edge) = query.edge(inc.edge) else {
                continue;
            };
            let direction = if !query.is_directed() {
                Direction::Either
            } else if edge.src == inc.neighbor {
                Direction::Out
            } else {
                Direction::In
            };
            requirements.push(Requirement {
                parent,
                query_edge: edge.id,
                direction,
            });
        }
    }
    requirements.sort_by_key(|r| (r.parent, r.query_edge));

    let mut parents: Vec<usize> = requirements.iter().map(|r| r.parent).collect();
    parents.dedup();

    Step {
        node,
        label: query.label_of(node).unwrap_or(Label::from_raw(u32::MAX)),
        parents,
        requirements,
    }
}
