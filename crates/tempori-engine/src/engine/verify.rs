//! Debug-only verification of emitted occurrences.
//!
//! Rechecks every occurrence from scratch against both graphs before it
//! reaches the sink. Zero-cost in release builds.

use super::occurrence::Occurrence;
use super::window::Delta;

/// Debug-only occurrence verification.
///
/// Panics with every violated constraint listed. This is a no-op in release builds.
#[cfg(debug_assertions)]
pub fn debug_verify_occurrence(occurrence: &Occurrence<'_>, delta: Delta) {
    let errors = verify_occurrence(occurrence, delta);
    if !errors.is_empty() {
        panic!(
            "invalid occurrence {occurrence:?}:\n  - {}",
            errors.join("\n  - ")
        );
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
#[inline(always)]
pub fn debug_verify_occurrence(_occurrence: &Occurrence<'_>, _delta: Delta) {}

#[cfg(debug_assertions)]
fn verify_occurrence(occurrence: &Occurrence<'_>, delta: Delta) -> Vec<String> {
    use std::collections::HashSet;

    use tempori_core::Direction;

    let (query, target) = (occurrence.query(), occurrence.target());
    let mut errors = Vec::new();

    let nodes: Vec<_> = occurrence.node_pairs().collect();
    if nodes.len() != query.node_count() {
        errors.push(format!("{} of {} query nodes bound", nodes.len(), query.node_count()));
    }
    let mut seen = HashSet::new();
    for &(q, t) in &nodes {
        if !seen.insert(t) {
            errors.push(format!("target node {t} bound twice"));
        }
        if query.label_of(q) != target.label_of(t) {
            errors.push(format!("node {q} -> {t}: label differs"));
        }
    }

    let mut times = Vec::new();
    let mut bound = HashSet::new();
    for q in query.edges() {
        let Some(t) = occurrence.target_edge(q.id) else {
            errors.push(format!("query edge {} unbound", q.id));
            continue;
        };
        if !bound.insert(t.id) {
            errors.push(format!("target edge {} bound twice", t.id));
        }
        if q.label != t.label {
            errors.push(format!("edge {} -> {}: label differs", q.id, t.id));
        }
        let (src, dst) = (occurrence.target_node(q.src), occurrence.target_node(q.dst));
        let (Some(src), Some(dst)) = (src, dst) else {
            continue;
        };
        let joins = target
            .edges_between(src, dst, Direction::Out)
            .any(|e| e.id == t.id);
        if !joins {
            errors.push(format!("edge {} -> {}: does not join {src} and {dst}", q.id, t.id));
        }
        times.push(t.time);
    }

    if let (Some(&min), Some(&max)) = (times.iter().min(), times.iter().max()) {
        let window = super::window::TimeWindow { min, max };
        if !delta.admits(window) {
            errors.push(format!("window [{min}, {max}] exceeds delta {delta}"));
        }
        if occurrence.window() != Some(window) {
            errors.push(format!(
                "tracked window {:?} differs from [{min}, {max}]",
                occurrence.window()
            ));
        }
    }
    errors
}
