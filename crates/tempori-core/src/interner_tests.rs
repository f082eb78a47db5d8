use crate::{Dictionary, Label, LabelTable};

#[test]
fn intern_deduplicates() {
    let mut dict = Dictionary::new();

    let a = dict.intern("call");
    let b = dict.intern("call");
    let c = dict.intern("sms");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(dict.len(), 2);
}

#[test]
fn get_does_not_insert() {
    let mut dict = Dictionary::new();
    dict.intern("A");

    assert_eq!(dict.get("A"), Some(Label::from_raw(0)));
    assert_eq!(dict.get("B"), None);
    assert_eq!(dict.len(), 1);
}

#[test]
fn handles_follow_first_insertion() {
    let mut dict = Dictionary::new();

    let z = dict.intern("z");
    let a = dict.intern("a");

    assert!(z < a);
    assert_eq!(z.as_u32(), 0);
    assert_eq!(dict.try_resolve(a), Some("a"));
}

#[test]
fn try_resolve_rejects_foreign_handles() {
    let dict = Dictionary::new();
    assert_eq!(dict.try_resolve(Label::from_raw(3)), None);
}

#[test]
fn node_and_edge_namespaces_are_separate() {
    let mut labels = LabelTable::new();

    let edge = labels.edges.intern("X");
    let node = labels.nodes.intern("A");
    let node_x = labels.nodes.intern("X");

    assert_eq!(edge, node);
    assert_ne!(edge, node_x);
    assert_eq!(labels.edge_name(edge), "X");
    assert_eq!(labels.node_name(node), "A");
}

#[test]
fn unknown_labels_print_as_handles() {
    let labels = LabelTable::new();
    assert_eq!(labels.node_name(Label::from_raw(7)), "#7");
}

#[test]
fn iter_yields_insertion_order() {
    let mut dict = Dictionary::new();
    let a = dict.intern("alpha");
    let b = dict.intern("beta");

    let items: Vec<_> = dict.iter().collect();
    assert_eq!(items, vec![(a, "alpha"), (b, "beta")]);
}
