#![allow(clippy::style)]

//! Reading and writing PENMAN graphs.
//!
//! [`PenmanCodec`] ties the parser, the layout and the formatter together
//! under a role model; the free functions use the default model.

pub mod codec;
pub use codec::PenmanCodec;
pub mod err;
pub use err::*;
/// Text sources, from files or memory.
pub mod file;
pub use file::{File, Input, Loaded};

use penman_surface::Indent;
use penman_syntax::{Graph, Triple};
use std::path::Path;

pub fn decode(text: &str) -> Result<Graph> {
    PenmanCodec::default().decode(text)
}

pub fn encode(graph: &Graph) -> Result<String> {
    PenmanCodec::default().encode(graph, None, Indent::Adaptive, false)
}

/// Every graph in `text`.
pub fn loads(text: &str) -> Result<Vec<Graph>> {
    PenmanCodec::default().iterdecode(text, None).collect()
}

/// Graphs separated by blank lines.
pub fn dumps(graphs: &[Graph]) -> Result<String> {
    let codec = PenmanCodec::default();
    let parts = graphs
        .iter()
        .map(|graph| codec.encode(graph, None, Indent::Adaptive, false))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("\n\n"))
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Graph>> {
    File::new(path.as_ref()).load()?.decode(&PenmanCodec::default())
}

pub fn dump(graphs: &[Graph], path: impl AsRef<Path>) -> Result<()> {
    let mut text = dumps(graphs)?;
    text.push('\n');
    std::fs::write(path, text)?;
    Ok(())
}

pub fn parse_triples(text: &str) -> Result<Vec<Triple>> {
    PenmanCodec::default().parse_triples(text)
}
