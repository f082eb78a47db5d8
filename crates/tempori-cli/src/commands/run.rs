//! Load both networks, match, and print the run report.

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempori_core::format::{GraphLoader, LabelFilter};
use tempori_core::{Colors, LabelTable, TemporalGraph};
use tempori_engine::{
    Delta, Discard, Limit, MatchError, MatchOutcome, Matcher, OccurrenceSink, OrderStrategy,
    PrintTracer, Verbosity,
};

use super::dump::{DumpFormat, DumpSink};

const RULE: &str = "-----------------------------------------------";

pub struct MatchArgs {
    pub target_path: PathBuf,
    pub query_path: PathBuf,
    pub delta: Delta,
    pub directed: bool,
    pub output: Option<PathBuf>,
    pub ordered: bool,
    pub strategy: OrderStrategy,
    pub limit: Option<NonZeroU64>,
    pub format: DumpFormat,
    /// `None` disables the search trace.
    pub verbosity: Option<Verbosity>,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Already rendered against the offending file.
    #[error("{0}")]
    Load(String),

    #[error("failed to open '{}': {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

pub fn run(args: MatchArgs) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(&args, &mut out) {
        Ok(_) => {}
        Err(RunError::Load(rendered)) => {
            eprint!("{rendered}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Run the whole pipeline, writing the report and echoed occurrences to `out`.
pub fn execute(args: &MatchArgs, out: &mut impl Write) -> Result<MatchOutcome, RunError> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;

    let mut labels = LabelTable::new();
    writeln!(out, "Reading query graph {}...", args.query_path.display())?;
    let query = load(&args.query_path, &mut labels, args, None)?;

    let started = Instant::now();
    writeln!(out, "Reading target graph {}...", args.target_path.display())?;
    let filter = LabelFilter::from_query(&query);
    let target = load(&args.target_path, &mut labels, args, Some(filter))?;
    let reading = started.elapsed();

    let started = Instant::now();
    writeln!(out, "Matching query to target...")?;
    let matcher = Matcher::builder(&query, &target)
        .delta(args.delta)
        .ordered(args.ordered)
        .strategy(args.strategy)
        .build()?;

    let mut tracer = args.verbosity.map(|verbosity| {
        PrintTracer::new(&labels, &target)
            .verbosity(verbosity)
            .colors(Colors::new(args.color))
            .stream(true)
    });

    let outcome = match &args.output {
        Some(path) => {
            writeln!(out, "\nOCCURRENCES FOUND:\n")?;
            writeln!(out, "Nodes\tEdges")?;
            let sink = DumpSink::create(path, args.format, &labels, out).map_err(|source| {
                RunError::Output {
                    path: path.clone(),
                    source,
                }
            })?;
            let (outcome, sink) = search(&matcher, sink, args.limit, tracer.as_mut());
            let failures = sink.finish();
            if failures > 0 {
                eprintln!("warning: {failures} occurrences failed to dump");
            }
            outcome
        }
        None => search(&matcher, Discard, args.limit, tracer.as_mut()).0,
    };
    let matching = started.elapsed();

    let stopped = if outcome.completed {
        ""
    } else {
        " (limit reached)"
    };
    writeln!(out, "\nDone! Occurrences found: {}{stopped}\n", outcome.occurrences)?;
    writeln!(out, "Time for reading: {:.3} secs", reading.as_secs_f64())?;
    writeln!(out, "Time for matching: {:.3} secs", matching.as_secs_f64())?;
    writeln!(
        out,
        "Total time: {:.3} secs",
        (reading + matching).as_secs_f64()
    )?;
    writeln!(out)?;

    Ok(outcome)
}

fn load(
    path: &Path,
    labels: &mut LabelTable,
    args: &MatchArgs,
    filter: Option<LabelFilter>,
) -> Result<TemporalGraph, RunError> {
    let source = fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_owned(),
        source,
    })?;
    let mut loader = GraphLoader::new(labels).directed(args.directed);
    if let Some(filter) = filter {
        loader = loader.filter(filter);
    }
    loader.load(&source).map_err(|e| {
        let name = path.display().to_string();
        RunError::Load(e.render(&source, Some(&name), args.color))
    })
}

/// Run the matcher into `sink`, optionally capped at `limit` occurrences.
fn search<S: OccurrenceSink>(
    matcher: &Matcher<'_>,
    sink: S,
    limit: Option<NonZeroU64>,
    tracer: Option<&mut PrintTracer<'_>>,
) -> (MatchOutcome, S) {
    match limit {
        Some(limit) => {
            let mut limited = Limit::new(sink, limit);
            let outcome = traced(matcher, &mut limited, tracer);
            (outcome, limited.into_inner())
        }
        None => {
            let mut sink = sink;
            let outcome = traced(matcher, &mut sink, tracer);
            (outcome, sink)
        }
    }
}

fn traced<S: OccurrenceSink>(
    matcher: &Matcher<'_>,
    sink: &mut S,
    tracer: Option<&mut PrintTracer<'_>>,
) -> MatchOutcome {
    match tracer {
        Some(tracer) => matcher.run_with(sink, tracer),
        None => matcher.run(sink),
    }
}
