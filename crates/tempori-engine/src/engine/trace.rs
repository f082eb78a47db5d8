//! Search tracing.
//!
//! The matcher is generic over a `Tracer`. With `NoopTracer` every hook is an
//! empty `#[inline(always)]` function and compiles away; nothing trace-related
//! lives in `MatchState`.
//!
//! `PrintTracer` keeps its own display state (the current position for
//! indentation) and produces one line per event. Lines are either collected
//! or, when streaming, written to stderr as they happen.

use std::fmt;

use tempori_core::{Colors, Edge, LabelTable, NodeId, TemporalGraph};

use super::occurrence::Occurrence;
use super::window::TimeWindow;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Candidates and occurrences.
    #[default]
    Default,
    /// Verbose (-vv): also edge bindings and backtracks.
    Verbose,
    /// Very verbose (-vvv): also rejected edge instances.
    VeryVerbose,
}

/// Why a target edge instance was not bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Label,
    /// Already realizes another query edge.
    Reused,
    /// Binding it would stretch the window to this span.
    Window(u64),
    /// Breaks the temporal order of the query edges.
    Order,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Label => f.write_str("label mismatch"),
            Rejection::Reused => f.write_str("edge already bound"),
            Rejection::Window(span) => write!(f, "window span {span} exceeds delta"),
            Rejection::Order => f.write_str("temporal order differs"),
        }
    }
}

/// Hooks called by the matcher at fixed points of the search.
///
/// - `trace_candidate`: a target node is tried for the node at `position`
/// - `trace_edge_bound`: a target edge realizes a query edge
/// - `trace_edge_rejected`: a target edge instance failed a check
/// - `trace_backtrack`: the candidate at `position` is released
/// - `trace_occurrence`: a complete occurrence goes to the sink
pub trait Tracer {
    fn trace_candidate(&mut self, position: usize, query_node: NodeId, target_node: NodeId);

    fn trace_edge_bound(&mut self, query_edge: &Edge, target_edge: &Edge, window: TimeWindow);

    fn trace_edge_rejected(&mut self, query_edge: &Edge, target_edge: &Edge, reason: Rejection);

    fn trace_backtrack(&mut self, position: usize, target_node: NodeId);

    /// `ordinal` is 1-based.
    fn trace_occurrence(&mut self, ordinal: u64, occurrence: &Occurrence<'_>);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_candidate(&mut self, _position: usize, _query_node: NodeId, _target_node: NodeId) {}

    #[inline(always)]
    fn trace_edge_bound(&mut self, _query_edge: &Edge, _target_edge: &Edge, _window: TimeWindow) {
    }

    #[inline(always)]
    fn trace_edge_rejected(&mut self, _query_edge: &Edge, _target_edge: &Edge, _reason: Rejection) {
    }

    #[inline(always)]
    fn trace_backtrack(&mut self, _position: usize, _target_node: NodeId) {}

    #[inline(always)]
    fn trace_occurrence(&mut self, _ordinal: u64, _occurrence: &Occurrence<'_>) {}
}

/// Tracer that produces a readable search log.
pub struct PrintTracer<'l> {
    labels: &'l LabelTable,
    target: &'l TemporalGraph,
    verbosity: Verbosity,
    colors: Colors,
    stream: bool,
    /// Collected lines; stays empty when streaming.
    lines: Vec<String>,
    /// Position of the most recent candidate, for indenting edge lines.
    position: usize,
}

impl<'l> PrintTracer<'l> {
    pub fn new(labels: &'l LabelTable, target: &'l TemporalGraph) -> Self {
        Self {
            labels,
            target,
            verbosity: Verbosity::Default,
            colors: Colors::OFF,
            stream: false,
            lines: Vec::new(),
            position: 0,
        }
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    /// Write each line to stderr when it is produced instead of collecting it.
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String) {
        if self.stream {
            eprintln!("{line}");
        } else {
            self.lines.push(line);
        }
    }

    fn indent(position: usize) -> String {
        "  ".repeat(position)
    }

    fn edge_text(&self, edge: &Edge) -> String {
        let c = self.colors;
        format!(
            "{}({},{},{}:{}){}",
            c.dim,
            edge.src,
            edge.dst,
            edge.time,
            self.labels.edge_name(edge.label),
            c.reset
        )
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_candidate(&mut self, position: usize, query_node: NodeId, target_node: NodeId) {
        self.position = position;
        let c = self.colors;
        let label = self
            .target
            .label_of(target_node)
            .map(|l| self.labels.node_name(l))
            .unwrap_or_default();
        self.push(format!(
            "{}[{position}] {}{query_node} -> {target_node}{} {}{label}{}",
            Self::indent(position),
            c.blue,
            c.reset,
            c.green,
            c.reset,
        ));
    }

    fn trace_edge_bound(&mut self, query_edge: &Edge, target_edge: &Edge, window: TimeWindow) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let line = format!(
            "{}    bind e{} = {} window [{}, {}]",
            Self::indent(self.position),
            query_edge.id,
            self.edge_text(target_edge),
            window.min,
            window.max,
        );
        self.push(line);
    }

    fn trace_edge_rejected(&mut self, query_edge: &Edge, target_edge: &Edge, reason: Rejection) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let line = format!(
            "{}    skip e{} = {}: {}{reason}{}",
            Self::indent(self.position),
            query_edge.id,
            self.edge_text(target_edge),
            c.red,
            c.reset,
        );
        self.push(line);
    }

    fn trace_backtrack(&mut self, position: usize, target_node: NodeId) {
        // Edge lines after a backtrack belong to the enclosing position.
        self.position = position.saturating_sub(1);
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        self.push(format!(
            "{}[{position}] undo {target_node}",
            Self::indent(position)
        ));
    }

    fn trace_occurrence(&mut self, ordinal: u64, occurrence: &Occurrence<'_>) {
        let c = self.colors;
        self.push(format!(
            "{}occurrence #{ordinal}{}: {}",
            c.green,
            c.reset,
            occurrence.display(self.labels)
        ));
    }
}
