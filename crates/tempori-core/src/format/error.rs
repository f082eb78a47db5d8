//! Load errors with source positions.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::graph::GraphError;

/// What went wrong while reading a graph file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadErrorKind {
    #[error("expected the node count on the first line")]
    MissingNodeCount,

    #[error("invalid node count `{0}`")]
    InvalidNodeCount(String),

    #[error("expected {expected} node lines, found {found}")]
    MissingNodes { expected: usize, found: usize },

    #[error("expected `<nodeId>\\t<label>`")]
    InvalidNodeLine,

    #[error("invalid node id `{0}`")]
    InvalidNodeId(String),

    #[error("expected `<srcId>\\t<dstId>\\t<timestamp>:<label>,...`")]
    InvalidEdgeLine,

    #[error("expected `<timestamp>:<label>`, found `{0}`")]
    InvalidEdgeToken(String),

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// A malformed graph file. Fatal: no partial graph is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// Byte range of the offending text in the source.
    pub span: Range<usize>,
}

impl LoadError {
    pub(crate) fn new(kind: impl Into<LoadErrorKind>, line: usize, span: Range<usize>) -> Self {
        Self {
            kind: kind.into(),
            line,
            span,
        }
    }

    /// Render the error against the file it came from.
    pub fn render(&self, source: &str, path: Option<&str>, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.kind.to_string();
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(adjust_range(self.span.clone(), source.len()))
                .label(&message),
        );
        if let Some(p) = path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
