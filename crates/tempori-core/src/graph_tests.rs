use crate::{Direction, GraphBuilder, GraphError, Label, TemporalGraph};

const A: Label = Label::from_raw(0);
const B: Label = Label::from_raw(1);
const X: Label = Label::from_raw(0);
const Y: Label = Label::from_raw(1);

/// 0 → 1 at t=5 and t=2, 1 → 0 at t=3, 1 → 2 at t=7.
fn sample(directed: bool) -> TemporalGraph {
    let mut g = GraphBuilder::new(directed);
    g.add_node(0, A).unwrap();
    g.add_node(1, B).unwrap();
    g.add_node(2, A).unwrap();
    g.add_edge(0, 1, 5, X).unwrap();
    g.add_edge(0, 1, 2, Y).unwrap();
    g.add_edge(1, 0, 3, X).unwrap();
    g.add_edge(1, 2, 7, X).unwrap();
    g.build()
}

fn times(graph: &TemporalGraph, u: u32, v: u32, direction: Direction) -> Vec<(i64, u32)> {
    graph
        .edges_between(u, v, direction)
        .map(|e| (e.time, e.id))
        .collect()
}

#[test]
fn builder_rejects_self_loops() {
    let mut g = GraphBuilder::directed();
    g.add_node(4, A).unwrap();
    assert_eq!(g.add_edge(4, 4, 0, X), Err(GraphError::SelfLoop(4)));
}

#[test]
fn builder_rejects_unknown_endpoints() {
    let mut g = GraphBuilder::directed();
    g.add_node(0, A).unwrap();
    assert_eq!(g.add_edge(0, 9, 0, X), Err(GraphError::UnknownNode(9)));
}

#[test]
fn builder_rejects_duplicate_nodes() {
    let mut g = GraphBuilder::directed();
    g.add_node(0, A).unwrap();
    assert_eq!(g.add_node(0, B), Err(GraphError::DuplicateNode(0)));
}

#[test]
fn edge_ids_are_dense_in_insertion_order() {
    let g = sample(true);
    let ids: Vec<_> = g.edges().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(g.edge(3).map(|e| (e.src, e.dst)), Some((1, 2)));
    assert_eq!(g.edge(4), None);
}

#[test]
fn directed_neighbors_per_direction() {
    let g = sample(true);

    let out: Vec<_> = g.neighbors(1, Direction::Out).iter().copied().collect();
    let inc: Vec<_> = g.neighbors(1, Direction::In).iter().copied().collect();
    let either: Vec<_> = g.neighbors(1, Direction::Either).iter().copied().collect();

    assert_eq!(out, vec![0, 2]);
    assert_eq!(inc, vec![0]);
    assert_eq!(either, vec![0, 2]);
    assert!(g.neighbors(2, Direction::Out).is_empty());
    assert!(g.neighbors(42, Direction::Out).is_empty());
}

#[test]
fn directed_edges_between_is_time_ordered() {
    let g = sample(true);

    assert_eq!(times(&g, 0, 1, Direction::Out), vec![(2, 1), (5, 0)]);
    assert_eq!(times(&g, 0, 1, Direction::In), vec![(3, 2)]);
    assert_eq!(times(&g, 1, 0, Direction::Out), vec![(3, 2)]);
    assert_eq!(
        times(&g, 0, 1, Direction::Either),
        vec![(2, 1), (3, 2), (5, 0)]
    );
    assert!(g.edges_between(0, 2, Direction::Either).is_empty());
}

#[test]
fn undirected_graph_answers_both_orientations() {
    let g = sample(false);

    let expected = vec![(2, 1), (3, 2), (5, 0)];
    assert_eq!(times(&g, 0, 1, Direction::Out), expected);
    assert_eq!(times(&g, 1, 0, Direction::In), expected);
    assert_eq!(times(&g, 1, 0, Direction::Either), expected);

    let of_two: Vec<_> = g.neighbors(2, Direction::Out).iter().copied().collect();
    assert_eq!(of_two, vec![1]);
}

#[test]
fn reciprocal_view_shares_edge_ids() {
    let g = sample(false);

    let at_zero: Vec<_> = g
        .edges_in_window(0, Direction::Either, 0..=10)
        .map(|(t, inc)| (t, inc.neighbor, inc.edge))
        .collect();
    let at_one: Vec<_> = g
        .edges_in_window(1, Direction::Either, 0..=4)
        .map(|(t, inc)| (t, inc.neighbor, inc.edge))
        .collect();

    assert_eq!(at_zero, vec![(2, 1, 1), (3, 1, 2), (5, 1, 0)]);
    assert_eq!(at_one, vec![(2, 0, 1), (3, 0, 2)]);
}

#[test]
fn window_query_is_inclusive() {
    let g = sample(true);
    let hits: Vec<_> = g
        .edges_in_window(0, Direction::Out, 2..=2)
        .map(|(t, inc)| (t, inc.edge))
        .collect();
    assert_eq!(hits, vec![(2, 1)]);
}

#[test]
fn degree_counts_parallel_edges() {
    let g = sample(true);
    assert_eq!(g.degree(0), 3);
    assert_eq!(g.degree(1), 4);
    assert_eq!(g.degree(2), 1);
    assert_eq!(g.degree(99), 0);
}

#[test]
fn nodes_by_label_are_ascending() {
    let g = sample(true);
    assert_eq!(g.nodes_with_label(A), &[0, 2]);
    assert_eq!(g.nodes_with_label(B), &[1]);
    assert!(g.nodes_with_label(Label::from_raw(9)).is_empty());
}

#[test]
fn pairs_are_sorted_and_normalized() {
    let directed = sample(true);
    let keys: Vec<_> = directed.pairs().into_iter().map(|(k, ids)| (k, ids.to_vec())).collect();
    assert_eq!(
        keys,
        vec![((0, 1), vec![1, 0]), ((1, 0), vec![2]), ((1, 2), vec![3])]
    );

    let undirected = sample(false);
    let keys: Vec<_> = undirected
        .pairs()
        .into_iter()
        .map(|(k, ids)| (k, ids.to_vec()))
        .collect();
    assert_eq!(keys, vec![((0, 1), vec![1, 2, 0]), ((1, 2), vec![3])]);
}

#[test]
fn same_timestamp_edge_overwrites_earlier_one() {
    let mut g = GraphBuilder::directed();
    g.add_node(0, A).unwrap();
    g.add_node(1, B).unwrap();
    assert_eq!(g.add_edge(0, 1, 5, X), Ok(0));
    assert_eq!(g.add_edge(0, 1, 5, Y), Ok(0));
    assert_eq!(g.add_edge(1, 0, 5, X), Ok(1));
    let g = g.build();

    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edge(0).map(|e| e.label), Some(Y));
    assert_eq!(times(&g, 0, 1, Direction::Out), vec![(5, 0)]);
    assert_eq!(g.adjacency(0, Direction::Out)[&5].len(), 1);
    assert_eq!(g.degree(0), 2);
}

#[test]
fn undirected_same_timestamp_collapses_both_orientations() {
    let mut g = GraphBuilder::undirected();
    g.add_node(0, A).unwrap();
    g.add_node(1, B).unwrap();
    g.add_edge(0, 1, 5, X).unwrap();
    assert_eq!(g.add_edge(1, 0, 5, X), Ok(0));
    let g = g.build();

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge(0).map(|e| (e.src, e.dst)), Some((1, 0)));
    assert_eq!(times(&g, 0, 1, Direction::Either), vec![(5, 0)]);
    assert_eq!(g.adjacency(1, Direction::Either)[&5].len(), 1);
}
