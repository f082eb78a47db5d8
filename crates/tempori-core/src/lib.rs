#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for tempori.
//!
//! - **Graph index** (`TemporalGraph`): read-only temporal adjacency over
//!   labeled nodes and time-stamped labeled edges
//! - **Labels** (`LabelTable`): string ↔ integer label dictionaries
//! - **Text format** (`format`): loader and writer for graph files

pub mod colors;
pub mod format;
pub mod graph;
pub mod interner;

#[cfg(test)]
mod graph_tests;
#[cfg(test)]
mod interner_tests;

pub use colors::Colors;
pub use graph::{
    Direction, Edge, EdgeId, EdgesBetween, GraphBuilder, GraphError, Incidence, Node, NodeId,
    TemporalAdjacency, TemporalGraph, Timestamp,
};
pub use interner::{Dictionary, Label, LabelTable};
