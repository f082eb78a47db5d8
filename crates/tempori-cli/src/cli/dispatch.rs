//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::ArgMatches;
use tempori_engine::{Delta, OrderStrategy, Verbosity};

use super::ColorChoice;
use crate::commands::dump::DumpFormat;
use crate::commands::run::MatchArgs;

#[derive(Debug)]
pub struct MatchParams {
    pub target: PathBuf,
    pub query: PathBuf,
    pub delta: Delta,
    pub undirected: bool,
    pub output: Option<PathBuf>,
    pub ordered: bool,
    pub strategy: OrderStrategy,
    pub limit: Option<NonZeroU64>,
    pub format: DumpFormat,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl MatchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            target: m.get_one::<PathBuf>("target").cloned().unwrap_or_default(),
            query: m.get_one::<PathBuf>("query").cloned().unwrap_or_default(),
            delta: m.get_one::<Delta>("delta").copied().unwrap_or_default(),
            undirected: m.get_flag("undirected"),
            output: m.get_one::<PathBuf>("output").cloned(),
            ordered: m.get_flag("ordered"),
            strategy: parse_strategy(m),
            limit: m
                .get_one::<u64>("limit")
                .copied()
                .and_then(NonZeroU64::new),
            format: parse_format(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<MatchParams> for MatchArgs {
    fn from(p: MatchParams) -> Self {
        Self {
            target_path: p.target,
            query_path: p.query,
            delta: p.delta,
            directed: !p.undirected,
            output: p.output,
            ordered: p.ordered,
            strategy: p.strategy,
            limit: p.limit,
            format: p.format,
            verbosity: verbosity_from_count(p.verbose),
            color: p.color.should_colorize(),
        }
    }
}

/// `-v` traces at default level; each extra `v` raises it.
fn verbosity_from_count(count: u8) -> Option<Verbosity> {
    match count {
        0 => None,
        1 => Some(Verbosity::Default),
        2 => Some(Verbosity::Verbose),
        _ => Some(Verbosity::VeryVerbose),
    }
}

fn parse_strategy(m: &ArgMatches) -> OrderStrategy {
    match m.get_one::<String>("order").map(|s| s.as_str()) {
        Some("declared") => OrderStrategy::Declared,
        _ => OrderStrategy::Connectivity,
    }
}

fn parse_format(m: &ArgMatches) -> DumpFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => DumpFormat::Json,
        _ => DumpFormat::Text,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
