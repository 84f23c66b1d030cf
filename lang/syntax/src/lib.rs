//! The three in-memory shapes of a PENMAN graph and the values they share.
//!
//! A [`Tree`] mirrors how the text nests its parentheses; a [`Graph`] is the
//! flat list of [`Triple`]s that the tree denotes, plus the [`Epidatum`]
//! annotations that remember how the triples were laid out.

pub mod fmt;
pub use fmt::*;

pub mod tree;
pub use tree::*;
pub mod graph;
pub use graph::*;
pub mod epigraph;
pub use epigraph::*;
pub mod surface;
pub use surface::*;
pub mod constant;
pub use constant::*;
pub mod err;
pub use err::*;

mod impls;

/* --------------------------------- Values --------------------------------- */

/// Names a node of the graph.
pub type Variable = String;
/// Labels an edge; canonically starts with `:`.
pub type Role = String;

/// The role of a node's type, written `/` in PENMAN text.
pub const CONCEPT_ROLE: &str = ":instance";
/// The surface spelling of [`CONCEPT_ROLE`].
pub const CONCEPT_SLASH: &str = "/";

/// `(source, role, target)`; a missing target is a null constant.
///
/// Triples compare by value; two identical triples are indistinguishable,
/// including as keys of [`Epidata`].
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Triple {
    pub source: Variable,
    pub role: Role,
    pub target: Option<String>,
}

impl Triple {
    pub fn new(
        source: impl Into<Variable>, role: impl Into<Role>, target: impl Into<String>,
    ) -> Self {
        Triple { source: source.into(), role: role.into(), target: Some(target.into()) }
    }
    /// A triple whose target is the null constant.
    pub fn missing(source: impl Into<Variable>, role: impl Into<Role>) -> Self {
        Triple { source: source.into(), role: role.into(), target: None }
    }
    pub fn is_instance(&self) -> bool {
        self.role == CONCEPT_ROLE
    }
    pub fn target_str(&self) -> Option<&str> {
        self.target.as_deref()
    }
    /// Whether `var` is the source or the target of this triple.
    pub fn touches(&self, var: &str) -> bool {
        self.source == var || self.target_str() == Some(var)
    }
}
