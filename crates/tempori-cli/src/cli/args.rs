//! Argument builders for the `tempori` command.
//!
//! Each function returns a `clap::Arg`; `commands.rs` composes them.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use tempori_engine::Delta;

/// Target network file (-t).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .short('t')
        .long("target")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Target network file")
}

/// Query network file (-q).
pub fn query_arg() -> Arg {
    Arg::new("query")
        .short('q')
        .long("query")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Query network file")
}

/// Delta threshold (-d).
pub fn delta_arg() -> Arg {
    Arg::new("delta")
        .short('d')
        .long("delta")
        .value_name("DELTA")
        .value_parser(|s: &str| s.parse::<Delta>())
        .help("Maximum time window of an occurrence (default: unbounded)")
}

/// Undirected networks (-u).
pub fn undirected_arg() -> Arg {
    Arg::new("undirected")
        .short('u')
        .long("undirected")
        .action(ArgAction::SetTrue)
        .help("Treat target and query as undirected")
}

/// Occurrence dump file (-o).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Append occurrences to FILE and echo them to stdout")
}

/// Temporal order preservation (--ordered).
pub fn ordered_arg() -> Arg {
    Arg::new("ordered")
        .long("ordered")
        .action(ArgAction::SetTrue)
        .help("Require matched edges to keep the time order of the query edges")
}

/// Matching order strategy (--order).
pub fn order_arg() -> Arg {
    Arg::new("order")
        .long("order")
        .value_name("STRATEGY")
        .default_value("connectivity")
        .value_parser(["connectivity", "declared"])
        .help("How query nodes are ordered for the search")
}

/// Occurrence limit (--limit).
pub fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_name("N")
        .value_parser(value_parser!(u64).range(1..))
        .help("Stop after N occurrences")
}

/// Dump format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Occurrence dump format")
}

/// Search trace level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace the search on stderr (-v candidates, -vv bindings, -vvv rejections)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics and trace")
}
