use tempori_core::Colors;

use crate::engine::sink::Discard;
use crate::engine::trace::{PrintTracer, Verbosity};
use crate::engine::window::Delta;
use crate::test_utils::{Fixture, PATH_QUERY, PATH_TARGET};

fn trace(verbosity: Verbosity, colors: Colors) -> Vec<String> {
    let fixture = Fixture::directed(PATH_QUERY, PATH_TARGET);
    let mut tracer = PrintTracer::new(&fixture.labels, &fixture.target)
        .verbosity(verbosity)
        .colors(colors);
    fixture
        .matcher(Delta::Bounded(5))
        .run_with(&mut Discard, &mut tracer);
    tracer.into_lines()
}

#[test]
fn default_shows_candidates_and_occurrences() {
    let lines = trace(Verbosity::Default, Colors::OFF);

    assert_eq!(
        lines,
        vec![
            "[0] 1 -> 1 B",
            "  [1] 0 -> 0 A",
            "    [2] 2 -> 2 C",
            "[0] 1 -> 3 B",
            "  [1] 0 -> 0 A",
            "    [2] 2 -> 2 C",
            "occurrence #1: (0:A),(3:B),(2:C)\t(0,3,0:X),(3,2,4:X)",
        ]
    );
}

#[test]
fn very_verbose_shows_bindings_rejections_and_backtracks() {
    let lines = trace(Verbosity::VeryVerbose, Colors::OFF);

    assert_eq!(
        lines,
        vec![
            "[0] 1 -> 1 B",
            "  [1] 0 -> 0 A",
            "      bind e0 = (0,1,0:X) window [0, 0]",
            "    [2] 2 -> 2 C",
            "        skip e1 = (1,2,10:X): window span 10 exceeds delta",
            "    [2] undo 2",
            "  [1] undo 0",
            "[0] undo 1",
            "[0] 1 -> 3 B",
            "  [1] 0 -> 0 A",
            "      bind e0 = (0,3,0:X) window [0, 0]",
            "    [2] 2 -> 2 C",
            "        bind e1 = (3,2,4:X) window [0, 4]",
            "occurrence #1: (0:A),(3:B),(2:C)\t(0,3,0:X),(3,2,4:X)",
            "    [2] undo 2",
            "  [1] undo 0",
            "[0] undo 3",
        ]
    );
}

#[test]
fn verbose_omits_rejections() {
    let verbose = trace(Verbosity::Verbose, Colors::OFF);
    let very = trace(Verbosity::VeryVerbose, Colors::OFF);

    assert_eq!(verbose.len() + 1, very.len());
    assert!(verbose.iter().all(|l| !l.contains("skip")));
}

#[test]
fn colors_wrap_node_ids() {
    let lines = trace(Verbosity::Default, Colors::ON);
    assert_eq!(lines[0], "[0] \x1b[34m1 -> 1\x1b[0m \x1b[32mB\x1b[0m");
}

#[test]
fn streaming_collects_nothing() {
    let fixture = Fixture::directed(PATH_QUERY, PATH_TARGET);
    let mut tracer = PrintTracer::new(&fixture.labels, &fixture.target)
        .verbosity(Verbosity::VeryVerbose)
        .stream(true);
    let outcome = fixture
        .matcher(Delta::Bounded(5))
        .run_with(&mut Discard, &mut tracer);

    assert_eq!(outcome.occurrences, 1);
    assert!(tracer.lines().is_empty());
}
