//! Test fixtures: query and target graphs loaded from text.

use std::ops::ControlFlow;

use tempori_core::format::{GraphLoader, LabelFilter};
use tempori_core::{LabelTable, TemporalGraph};

use crate::engine::sink;
use crate::{Delta, Matcher, OrderStrategy};

/// The running example: a two-hop path A → B → C.
pub const PATH_QUERY: &str = indoc::indoc! {"
    3
    0\tA
    1\tB
    2\tC
    0\t1\t0:X
    1\t2\t10:X
"};

/// Two realizations of `PATH_QUERY`: through node 1 (span 10) and node 3 (span 4).
pub const PATH_TARGET: &str = indoc::indoc! {"
    4
    0\tA
    1\tB
    2\tC
    3\tB
    0\t1\t0:X
    1\t2\t10:X
    0\t3\t0:X
    3\t2\t4:X
"};

pub struct Fixture {
    pub labels: LabelTable,
    pub query: TemporalGraph,
    pub target: TemporalGraph,
}

impl Fixture {
    pub fn directed(query: &str, target: &str) -> Self {
        Self::load(query, target, true)
    }

    pub fn undirected(query: &str, target: &str) -> Self {
        Self::load(query, target, false)
    }

    fn load(query: &str, target: &str, directed: bool) -> Self {
        let mut labels = LabelTable::new();
        let query = GraphLoader::new(&mut labels)
            .directed(directed)
            .load(query)
            .expect("query graph must load");
        let target = GraphLoader::new(&mut labels)
            .directed(directed)
            .filter(LabelFilter::from_query(&query))
            .load(target)
            .expect("target graph must load");
        Self {
            labels,
            query,
            target,
        }
    }

    pub fn matcher(&self, delta: Delta) -> Matcher<'_> {
        Matcher::builder(&self.query, &self.target)
            .delta(delta)
            .build()
            .expect("fixture graphs share directedness")
    }

    pub fn count(&self, delta: Delta) -> u64 {
        self.matcher(delta).count()
    }

    pub fn count_with(&self, delta: Delta, ordered: bool, strategy: OrderStrategy) -> u64 {
        Matcher::builder(&self.query, &self.target)
            .delta(delta)
            .ordered(ordered)
            .strategy(strategy)
            .build()
            .expect("fixture graphs share directedness")
            .count()
    }

    /// Dump lines of every occurrence, in emission order.
    pub fn lines(&self, matcher: &Matcher<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        matcher.run(&mut sink::from_fn(|o| {
            lines.push(o.display(&self.labels).to_string());
            ControlFlow::Continue(())
        }));
        lines
    }
}
