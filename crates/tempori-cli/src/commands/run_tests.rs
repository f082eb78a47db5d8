use std::fs;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use indoc::indoc;
use tempfile::TempDir;
use tempori_engine::{Delta, OrderStrategy};

use super::dump::DumpFormat;
use super::run::{MatchArgs, RunError, execute};

const QUERY: &str = indoc! {"
    3
    0\tA
    1\tB
    2\tC
    0\t1\t0:X
    1\t2\t10:X
"};

const TARGET: &str = indoc! {"
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

const NARROW: &str = "(0:A),(3:B),(2:C)\t(0,3,0:X),(3,2,4:X)";
const WIDE: &str = "(0:A),(1:B),(2:C)\t(0,1,0:X),(1,2,10:X)";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("query.txt"), QUERY).unwrap();
        fs::write(dir.path().join("target.txt"), TARGET).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self) -> MatchArgs {
        MatchArgs {
            target_path: self.path("target.txt"),
            query_path: self.path("query.txt"),
            delta: Delta::Unbounded,
            directed: true,
            output: None,
            ordered: false,
            strategy: OrderStrategy::default(),
            limit: None,
            format: DumpFormat::Text,
            verbosity: None,
            color: false,
        }
    }
}

fn report(args: &MatchArgs) -> String {
    let mut out = Vec::new();
    execute(args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn dump_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn report_counts_occurrences() {
    let ws = Workspace::new();
    let out = report(&ws.args());

    assert!(out.contains("Reading query graph"), "{out}");
    assert!(out.contains("Reading target graph"), "{out}");
    assert!(out.contains("Matching query to target..."), "{out}");
    assert!(out.contains("Done! Occurrences found: 2\n"), "{out}");
    assert!(out.contains("Total time:"), "{out}");
    assert!(!out.contains("OCCURRENCES FOUND"), "{out}");
}

#[test]
fn delta_narrows_the_count() {
    let ws = Workspace::new();
    let args = MatchArgs {
        delta: Delta::Bounded(5),
        ..ws.args()
    };

    let mut out = Vec::new();
    let outcome = execute(&args, &mut out).unwrap();

    assert_eq!(outcome.occurrences, 1);
    assert!(outcome.completed);
}

#[test]
fn undirected_mode_matches_both_paths() {
    let ws = Workspace::new();
    let args = MatchArgs {
        directed: false,
        ..ws.args()
    };

    let out = report(&args);

    assert!(out.contains("Done! Occurrences found: 2\n"), "{out}");
}

#[test]
fn dump_writes_and_echoes_each_occurrence() {
    let ws = Workspace::new();
    let dump = ws.path("dump.txt");
    let args = MatchArgs {
        output: Some(dump.clone()),
        ..ws.args()
    };

    let out = report(&args);

    assert_eq!(dump_lines(&dump), vec![WIDE, NARROW]);
    assert!(out.contains("\nOCCURRENCES FOUND:\n\nNodes\tEdges\n"), "{out}");
    assert!(out.contains(WIDE), "{out}");
    assert!(out.contains(NARROW), "{out}");
}

#[test]
fn dump_appends_across_runs() {
    let ws = Workspace::new();
    let dump = ws.path("dump.txt");
    let args = MatchArgs {
        delta: Delta::Bounded(5),
        output: Some(dump.clone()),
        ..ws.args()
    };

    report(&args);
    report(&args);

    assert_eq!(dump_lines(&dump), vec![NARROW, NARROW]);
}

#[test]
fn json_dump_has_one_record_per_line() {
    let ws = Workspace::new();
    let dump = ws.path("dump.jsonl");
    let args = MatchArgs {
        output: Some(dump.clone()),
        format: DumpFormat::Json,
        ..ws.args()
    };

    report(&args);

    let lines = dump_lines(&dump);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(record["edges"].as_array().unwrap().len(), 2);
    }
}

#[test]
fn limit_stops_early() {
    let ws = Workspace::new();
    let dump = ws.path("dump.txt");
    let args = MatchArgs {
        output: Some(dump.clone()),
        limit: NonZeroU64::new(1),
        ..ws.args()
    };

    let out = report(&args);

    assert!(out.contains("Done! Occurrences found: 1 (limit reached)"), "{out}");
    assert_eq!(dump_lines(&dump), vec![WIDE]);
}

#[test]
fn limit_equal_to_the_count_is_still_reported() {
    let ws = Workspace::new();
    let args = MatchArgs {
        limit: NonZeroU64::new(2),
        ..ws.args()
    };

    let out = report(&args);

    assert!(out.contains("Done! Occurrences found: 2 (limit reached)"), "{out}");
}

#[test]
fn limit_above_the_count_completes() {
    let ws = Workspace::new();
    let args = MatchArgs {
        limit: NonZeroU64::new(10),
        ..ws.args()
    };

    let out = report(&args);

    assert!(out.contains("Done! Occurrences found: 2\n"), "{out}");
}

#[test]
fn ordered_and_declared_strategy_agree_on_path() {
    let ws = Workspace::new();
    let args = MatchArgs {
        ordered: true,
        strategy: OrderStrategy::Declared,
        ..ws.args()
    };

    let mut out = Vec::new();
    let outcome = execute(&args, &mut out).unwrap();

    assert_eq!(outcome.occurrences, 2);
}

#[test]
fn missing_target_is_a_read_error() {
    let ws = Workspace::new();
    let args = MatchArgs {
        target_path: ws.path("absent.txt"),
        ..ws.args()
    };

    let err = execute(&args, &mut Vec::new()).unwrap_err();

    let RunError::Read { path, .. } = &err else {
        panic!("expected a read error, got {err:?}");
    };
    assert_eq!(path, &ws.path("absent.txt"));
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn malformed_query_is_rendered_against_its_file() {
    let ws = Workspace::new();
    fs::write(ws.path("query.txt"), "three\n").unwrap();

    let err = execute(&ws.args(), &mut Vec::new()).unwrap_err();

    let RunError::Load(rendered) = &err else {
        panic!("expected a load error, got {err:?}");
    };
    assert!(rendered.contains("invalid node count `three`"), "{rendered}");
    assert!(rendered.contains("query.txt"), "{rendered}");
}

#[test]
fn unopenable_dump_is_an_output_error() {
    let ws = Workspace::new();
    let args = MatchArgs {
        output: Some(ws.path("missing-dir/dump.txt")),
        ..ws.args()
    };

    let err = execute(&args, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, RunError::Output { .. }), "{err:?}");
}
