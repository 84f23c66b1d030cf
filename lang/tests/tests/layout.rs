use penman_driver::PenmanCodec;
use penman_layout::*;
use penman_model::Order;
use penman_surface::{Formatter, Indent, parse};
use penman_syntax::*;
use penman_tests::*;
use pretty_assertions::assert_eq;

#[test]
fn canonical_roles_on_the_way_out() {
    let codec = amr();
    let graph = codec.decode("(a / alpha :mod-of (b / beta))").unwrap();
    assert_eq!(graph.triples[1], Triple::new("b", ":mod", "a"));
    let tree = configure(&graph, None, &codec.model).unwrap();
    let tree = canonicalize_roles(&tree, &codec.model);
    assert_eq!(codec.format(&tree, Indent::Flat, false), "(a / alpha :domain (b / beta))");
}

#[test]
fn reified_modifier() {
    let codec = amr();
    let graph = reify_edges(&codec.decode("(a / alpha :mod 5)").unwrap(), &codec.model).unwrap();
    let expected = codec.decode("(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 5))").unwrap();
    assert_eq!(graph, expected);
    assert_eq!(flat(&codec, &graph), "(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 5))");
}

#[test]
fn layout_without_markers() {
    let codec = PenmanCodec::default();
    let graph = Graph::new(vec![
        Triple::new("a", CONCEPT_ROLE, "alpha"),
        Triple::new("a", ":ARG0", "b"),
        Triple::new("b", CONCEPT_ROLE, "beta"),
    ]);
    assert_eq!(flat(&codec, &graph), "(a / alpha :ARG0 (b / beta))");
}

#[test]
fn round_trip_keeps_layout() {
    let codec = amr();
    let text = "(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b :polarity~e.3 -))";
    let graph = codec.decode(text).unwrap();
    assert_eq!(flat(&codec, &graph), text);
    let text = "(c / chapter :mod-of (b / book :ARG1-of (r / read-01 :ARG0 (i / i))))";
    assert_eq!(flat(&codec, &codec.decode(text).unwrap()), text);
}

#[test]
fn reconfiguring_sorted_roles() {
    let codec = amr();
    let graph = codec.decode("(a / alpha :op2 (c / gamma) :ARG1 (b / beta) :polarity -)").unwrap();
    let tree = reconfigure(&graph, None, &codec.model, Order::Canonical).unwrap();
    let text = Formatter::new(Indent::Flat, false).format(&tree);
    assert_eq!(text, "(a / alpha :ARG1 (b / beta) :op2 (c / gamma) :polarity -)");
}

#[test]
fn rearranged_tree() {
    let codec = amr();
    let mut tree = parse("(a / alpha :op2 (c / gamma) :polarity - :op1 (b / beta))").unwrap();
    rearrange(&mut tree, &codec.model, Order::Alphanumeric, true);
    assert_eq!(codec.format(&tree, Indent::Flat, false), "(a / alpha :polarity - :op1 (b / beta) :op2 (c / gamma))");
}
