//! Shared helpers for the end-to-end tests.

use penman_driver::PenmanCodec;
use penman_model::Model;
use penman_surface::Indent;
use penman_syntax::Graph;

pub fn amr() -> PenmanCodec {
    match Model::amr() {
        | Ok(model) => PenmanCodec::new(model),
        | Err(err) => panic!("the bundled AMR model is invalid: {err}"),
    }
}

/// `graph` on a single line, laid out from its own top.
pub fn flat(codec: &PenmanCodec, graph: &Graph) -> String {
    match codec.encode(graph, None, Indent::Flat, false) {
        | Ok(text) => text,
        | Err(err) => panic!("cannot encode {:?}: {err}", graph.triples),
    }
}

/// `depth` nodes each holding the next under `:ARG0`.
pub fn nested(depth: usize) -> String {
    let mut text = String::new();
    for i in 0..depth {
        text.push_str(&format!("(n{i} / c :ARG0 "));
    }
    text.push_str("(leaf / c)");
    text.push_str(&")".repeat(depth));
    text
}
