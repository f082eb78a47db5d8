//! Line-oriented temporal graph format.
//!
//! ```text
//! <numNodes>
//! <nodeId>\t<nodeLabel>                               (numNodes lines)
//! <srcId>\t<dstId>\t<ts1>:<label1>,<ts2>:<label2>,...  (one line per node pair)
//! ```
//!
//! Blank lines are ignored. Self-loop lines are skipped without being parsed.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;
use std::ops::Range;

use crate::graph::{GraphBuilder, GraphError, NodeId, TemporalGraph, Timestamp};
use crate::interner::{Label, LabelTable};

use super::error::{LoadError, LoadErrorKind, LoadResult};

/// Labels a target graph is restricted to when loaded against a known query.
///
/// Nodes and edges whose label never occurs in the query cannot take part in
/// any occurrence, so the loader drops them to keep the index small.
#[derive(Debug, Clone, Default)]
pub struct LabelFilter {
    nodes: HashSet<Label>,
    edges: HashSet<Label>,
}

impl LabelFilter {
    pub fn from_query(query: &TemporalGraph) -> Self {
        Self {
            nodes: query.node_labels().collect(),
            edges: query.edge_labels().into_iter().collect(),
        }
    }

    pub fn keeps_node(&self, label: Label) -> bool {
        self.nodes.contains(&label)
    }

    pub fn keeps_edge(&self, label: Label) -> bool {
        self.edges.contains(&label)
    }
}

/// Builds a `TemporalGraph` from the text format, interning labels on the way.
pub struct GraphLoader<'l> {
    labels: &'l mut LabelTable,
    directed: bool,
    filter: Option<LabelFilter>,
}

impl<'l> GraphLoader<'l> {
    /// Loader for a directed graph without label filtering.
    pub fn new(labels: &'l mut LabelTable) -> Self {
        Self {
            labels,
            directed: true,
            filter: None,
        }
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Drop nodes and edges whose labels are not kept by `filter`.
    pub fn filter(mut self, filter: LabelFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn load(self, source: &str) -> LoadResult<TemporalGraph> {
        let mut parser = Parser {
            labels: self.labels,
            filter: self.filter.as_ref(),
            builder: GraphBuilder::new(self.directed),
            dropped: BTreeSet::new(),
        };
        parser.parse(source)?;
        Ok(parser.builder.build())
    }
}

struct Line<'s> {
    number: usize,
    text: &'s str,
    offset: usize,
}

impl<'s> Line<'s> {
    fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Span of `part`, which must be a subslice of this line.
    fn span_of(&self, part: &str) -> Range<usize> {
        let start = self.offset + (part.as_ptr() as usize - self.text.as_ptr() as usize);
        start..start + part.len()
    }

    fn error(&self, kind: impl Into<LoadErrorKind>) -> LoadError {
        LoadError::new(kind, self.number, self.span())
    }

    fn error_at(&self, kind: impl Into<LoadErrorKind>, part: &str) -> LoadError {
        LoadError::new(kind, self.number, self.span_of(part))
    }

    fn node_id(&self, token: &'s str) -> LoadResult<NodeId> {
        let trimmed = token.trim();
        trimmed
            .parse()
            .map_err(|_| self.error_at(LoadErrorKind::InvalidNodeId(trimmed.to_owned()), token))
    }
}

fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(i, raw)| {
            let line = Line {
                number: i + 1,
                text: raw.trim_end_matches(['\n', '\r']),
                offset,
            };
            offset += raw.len();
            line
        })
        .filter(|line| !line.text.trim().is_empty())
}

struct Parser<'a> {
    labels: &'a mut LabelTable,
    filter: Option<&'a LabelFilter>,
    builder: GraphBuilder,
    /// Nodes removed by the label filter; edges touching them are skipped.
    dropped: BTreeSet<NodeId>,
}

impl Parser<'_> {
    fn parse(&mut self, source: &str) -> LoadResult<()> {
        let mut lines = lines(source);
        let eof = |kind: LoadErrorKind| {
            let line = source.lines().count().max(1);
            LoadError::new(kind, line, source.len()..source.len())
        };

        let header = lines.next().ok_or_else(|| eof(LoadErrorKind::MissingNodeCount))?;
        let count = header.text.trim();
        let count: usize = count
            .parse()
            .map_err(|_| header.error(LoadErrorKind::InvalidNodeCount(count.to_owned())))?;

        for found in 0..count {
            let line = lines.next().ok_or_else(|| {
                eof(LoadErrorKind::MissingNodes {
                    expected: count,
                    found,
                })
            })?;
            self.node_line(&line)?;
        }

        for line in lines {
            self.edge_line(&line)?;
        }
        Ok(())
    }

    fn node_line(&mut self, line: &Line<'_>) -> LoadResult<()> {
        let mut fields = line.text.split('\t');
        let (Some(id), Some(label)) = (fields.next(), fields.next()) else {
            return Err(line.error(LoadErrorKind::InvalidNodeLine));
        };
        let id = line.node_id(id)?;
        let label = self.labels.nodes.intern(label.trim());

        if self.dropped.contains(&id) || self.builder.contains_node(id) {
            return Err(line.error(GraphError::DuplicateNode(id)));
        }
        if self.filter.is_some_and(|f| !f.keeps_node(label)) {
            self.dropped.insert(id);
            return Ok(());
        }
        self.builder
            .add_node(id, label)
            .map_err(|e| line.error(e))
    }

    fn edge_line(&mut self, line: &Line<'_>) -> LoadResult<()> {
        let mut fields = line.text.split('\t');
        let (Some(src_token), Some(dst_token), Some(events)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(line.error(LoadErrorKind::InvalidEdgeLine));
        };
        let src = line.node_id(src_token)?;
        let dst = line.node_id(dst_token)?;

        if src == dst {
            return Ok(());
        }
        if self.dropped.contains(&src) || self.dropped.contains(&dst) {
            return Ok(());
        }

        for event in events.split(',') {
            let (time, label) = parse_event(line, event)?;
            let label = self.labels.edges.intern(label);
            if self.filter.is_some_and(|f| !f.keeps_edge(label)) {
                continue;
            }
            self.builder
                .add_edge(src, dst, time, label)
                .map_err(|e| match e {
                    GraphError::UnknownNode(id) if id == src => {
                        line.error_at(e, src_token)
                    }
                    GraphError::UnknownNode(_) => line.error_at(e, dst_token),
                    _ => line.error(e),
                })?;
        }
        Ok(())
    }
}

fn parse_event<'s>(line: &Line<'s>, event: &'s str) -> LoadResult<(Timestamp, &'s str)> {
    let Some((time, label)) = event.split_once(':') else {
        return Err(line.error_at(
            LoadErrorKind::InvalidEdgeToken(event.trim().to_owned()),
            event,
        ));
    };
    let trimmed = time.trim();
    let time = trimmed
        .parse()
        .map_err(|_| line.error_at(LoadErrorKind::InvalidTimestamp(trimmed.to_owned()), time))?;
    Ok((time, label.trim()))
}

/// Serialize a graph back into the text format.
///
/// Nodes come out by ascending id, edge lines by ascending `(src, dst)` with
/// the events of each pair in time order.
pub fn write_graph(graph: &TemporalGraph, labels: &LabelTable) -> String {
    let mut out = String::new();
    write_graph_to(&mut out, graph, labels).expect("String write never fails");
    out
}

pub fn write_graph_to(
    w: &mut impl Write,
    graph: &TemporalGraph,
    labels: &LabelTable,
) -> std::fmt::Result {
    writeln!(w, "{}", graph.node_count())?;
    for node in graph.nodes() {
        writeln!(w, "{}\t{}", node.id, labels.node_name(node.label))?;
    }
    for ((src, dst), ids) in graph.pairs() {
        write!(w, "{src}\t{dst}\t")?;
        for (i, edge) in ids.iter().filter_map(|&id| graph.edge(id)).enumerate() {
            if i > 0 {
                w.write_char(',')?;
            }
            write!(w, "{}:{}", edge.time, labels.edge_name(edge.label))?;
        }
        w.write_char('\n')?;
    }
    Ok(())
}
