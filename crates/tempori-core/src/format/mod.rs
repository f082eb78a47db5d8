//! Text format for temporal graphs.
//!
//! Loading interns labels into a caller-owned `LabelTable`, so the query and
//! target graphs of one run agree on label ids.

mod error;
mod text;


pub use error::{LoadError, LoadErrorKind, LoadResult};
pub use text::{GraphLoader, LabelFilter, write_graph, write_graph_to};
