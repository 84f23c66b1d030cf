//! Text to graphs and back, under one role model.

use crate::err::*;
use log::debug;
use penman_layout::{configure, interpret};
use penman_model::Model;
use penman_surface::{Formatter, Indent, Parser};
use penman_syntax::*;
use std::{path::PathBuf, sync::Arc};

/// Decodes and encodes PENMAN text with the rules of `model`.
#[derive(Clone, Debug, Default)]
pub struct PenmanCodec {
    pub model: Model,
}

impl PenmanCodec {
    pub fn new(model: Model) -> Self {
        PenmanCodec { model }
    }

    /* -------------------------------- Decoding -------------------------------- */

    pub fn parse(&self, text: &str) -> Result<Tree> {
        Ok(Parser::new(text, None).parse_tree()?)
    }

    /// Trees of `text` one after another; `path` names the source in errors.
    pub fn iterparse<'a>(
        &self, text: &'a str, path: Option<PathBuf>,
    ) -> impl Iterator<Item = Result<Tree>> + 'a {
        Parser::new(text, path.map(Arc::new)).map(|tree| -> Result<Tree> { Ok(tree?) })
    }

    pub fn decode(&self, text: &str) -> Result<Graph> {
        Ok(interpret(&self.parse(text)?, &self.model)?)
    }

    pub fn iterdecode<'a>(
        &'a self, text: &'a str, path: Option<PathBuf>,
    ) -> impl Iterator<Item = Result<Graph>> + 'a {
        let model = &self.model;
        self.iterparse(text, path).map(move |tree| -> Result<Graph> { Ok(interpret(&tree?, model)?) })
    }

    /// Triples written as `role(source, target) ^ ...`.
    pub fn parse_triples(&self, text: &str) -> Result<Vec<Triple>> {
        Ok(Parser::triples(text, None).parse_triples()?)
    }

    /// A graph from triple notation. A triple from the model's top variable
    /// over its top role, such as `TOP(top, b)`, names the top instead of
    /// becoming part of the graph.
    pub fn decode_triples(&self, text: &str) -> Result<Graph> {
        let mut top = None;
        let mut triples = Vec::new();
        for triple in self.parse_triples(text)? {
            if triple.source == self.model.top_variable && triple.role == self.model.top_role {
                top = triple.target;
            } else {
                triples.push(triple);
            }
        }
        let mut graph = Graph::new(triples);
        graph.set_top(top)?;
        Ok(graph)
    }

    /* -------------------------------- Encoding -------------------------------- */

    /// Lays `graph` out from `top` (its own top by default) and formats it.
    pub fn encode(
        &self, graph: &Graph, top: Option<&str>, indent: Indent, compact: bool,
    ) -> Result<String> {
        let tree = configure(graph, top, &self.model)?;
        debug!("encoding {} triples", graph.triples.len());
        Ok(self.format(&tree, indent, compact))
    }

    pub fn format(&self, tree: &Tree, indent: Indent, compact: bool) -> String {
        Formatter::new(indent, compact).format(tree)
    }

    pub fn format_triples(&self, triples: &[Triple], indent: bool) -> String {
        let indent = if indent { Indent::Adaptive } else { Indent::Flat };
        Formatter::new(indent, false).format_triples(triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unindent::unindent;

    #[test]
    fn decode_and_encode() {
        let codec = PenmanCodec::default();
        let graph = codec.decode("(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))").unwrap();
        assert_eq!(graph.top(), Some("w"));
        assert_eq!(graph.triples.len(), 6);
        let expected = unindent(
            "
            (w / want-01
               :ARG0 (b / boy)
               :ARG1 (g / go-02
                        :ARG0 b))",
        );
        assert_eq!(codec.encode(&graph, None, Indent::Adaptive, false).unwrap(), expected);
        let graph = codec.decode("(a / alpha :ARG0 (b / beta))").unwrap();
        assert_eq!(
            codec.encode(&graph, Some("b"), Indent::Flat, false).unwrap(),
            "(b / beta :ARG0-of (a / alpha))"
        );
    }

    #[test]
    fn many_graphs() {
        let codec = PenmanCodec::default();
        let text = "# ::id 1\n(a / alpha)\n\n# ::id 2\n(b / beta :ARG0 (c / gamma))\n";
        let graphs: Vec<Graph> = codec.iterdecode(text, None).collect::<Result<_>>().unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1].metadata.get("id").map(String::as_str), Some("2"));
        assert_eq!(graphs[1].top(), Some("b"));
    }

    #[test]
    fn decode_errors_carry_positions() {
        let codec = PenmanCodec::default();
        let Err(PenmanError::Decode(err)) = codec.decode("(a / alpha\n   :ARG0 (b / beta)") else {
            panic!("expected a decode error");
        };
        assert_eq!(err.line, 2);
        let path = Some(PathBuf::from("in.txt"));
        let mut graphs = codec.iterdecode("(a / alpha) (b", path);
        assert!(graphs.next().unwrap().is_ok());
        let Some(Err(PenmanError::Decode(err))) = graphs.next() else { panic!("expected an error") };
        assert_eq!(err.path, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn triple_notation() {
        let codec = PenmanCodec::default();
        let graph = codec.decode_triples("instance(a, alpha) ^ ARG0(a, b) ^ instance(b, beta)").unwrap();
        assert_eq!(graph.top(), Some("a"));
        assert!(!graph.has_explicit_top());
        let graph = codec.decode_triples("TOP(top, b) ^ instance(a, alpha) ^ ARG0-of(b, a) ^ instance(b, beta)");
        let graph = graph.unwrap();
        assert_eq!(graph.top(), Some("b"));
        assert_eq!(graph.triples.len(), 3);
        assert!(matches!(codec.decode_triples("TOP(top, z) ^ instance(a, alpha)"), Err(PenmanError::Graph(_))));

        let triples = codec.parse_triples("instance(a, alpha) ^ polarity(a)").unwrap();
        assert_eq!(codec.format_triples(&triples, false), "instance(a, alpha) ^ polarity(a)");
        assert_eq!(codec.format_triples(&triples, true), "instance(a, alpha) ^\npolarity(a)");
    }
}
