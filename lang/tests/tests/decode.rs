use penman_driver::{PenmanCodec, PenmanError};
use penman_syntax::*;
use penman_tests::*;
use pretty_assertions::assert_eq;

#[test]
fn bark() {
    let graph = PenmanCodec::default().decode("(b / bark-01 :ARG0 (d / dog))").unwrap();
    assert_eq!(
        graph.triples,
        vec![
            Triple::new("b", CONCEPT_ROLE, "bark-01"),
            Triple::new("b", ":ARG0", "d"),
            Triple::new("d", CONCEPT_ROLE, "dog"),
        ]
    );
    assert_eq!(graph.top(), Some("b"));
    assert_eq!(graph.edges(None, None, None).len(), 1);
}

#[test]
fn deeply_nested_input() {
    let codec = PenmanCodec::default();
    let text = nested(200);
    let graph = codec.decode(&text).unwrap();
    assert_eq!(graph.triples.len(), 401);
    assert_eq!(graph.top(), Some("n0"));
    assert_eq!(flat(&codec, &graph), text);
}

#[test]
fn positioned_errors() {
    let text = "(a / alpha\n   :ARG0 (b / beta\n   :ARG1 /)";
    let Err(PenmanError::Decode(err)) = PenmanCodec::default().decode(text) else {
        panic!("expected a decode error");
    };
    assert_eq!((err.line, err.column), (3, 9));
    assert_eq!(err.text, "   :ARG1 /)");
    assert_eq!(err.path, None);
}

#[test]
fn stream_of_graphs() {
    let text = "# ::id 1\n# ::snt Dogs bark.\n(b / bark-01 :ARG0 (d / dog))\n\n# ::id 2\n(a / alpha)\n";
    let graphs = penman_driver::loads(text).unwrap();
    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs[0].metadata.get("snt").map(String::as_str), Some("Dogs bark."));
    assert_eq!(graphs[1].top(), Some("a"));
    let again = penman_driver::loads(&penman_driver::dumps(&graphs).unwrap()).unwrap();
    assert_eq!(again, graphs);
}

#[test]
fn triple_notation() {
    let codec = PenmanCodec::default();
    let graph = codec.decode_triples("instance(b, bark-01) ^ ARG0(b, d) ^ instance(d, dog)").unwrap();
    assert_eq!(graph, codec.decode("(b / bark-01 :ARG0 (d / dog))").unwrap());
    assert_eq!(flat(&codec, &graph), "(b / bark-01 :ARG0 (d / dog))");
}
