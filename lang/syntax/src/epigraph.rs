//! Annotations layered over triples: layout markers and surface alignments.
//!
//! None of these take part in graph equality.

use crate::*;
use indexmap::IndexMap;

/// Epigraph data of a graph, keyed by triple value.
///
/// Two identical triples share one entry. Interpretation keeps the first
/// list it sees for a triple and drops later ones with a warning.
pub type Epidata = IndexMap<Triple, Vec<Epidatum>>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Epidatum {
    /// A node context for the variable begins at this triple.
    Push(Variable),
    /// The innermost node context ends after this triple.
    Pop,
    /// Alignment of the triple's target.
    Alignment(Alignment),
    /// Alignment of the triple's role.
    RoleAlignment(Alignment),
}

/// Where an epidatum is rendered when a graph is laid out as a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Layout,
    Role,
    Target,
}

impl Epidatum {
    pub fn mode(&self) -> Mode {
        match self {
            | Epidatum::Push(_) | Epidatum::Pop => Mode::Layout,
            | Epidatum::RoleAlignment(_) => Mode::Role,
            | Epidatum::Alignment(_) => Mode::Target,
        }
    }
    pub fn is_layout(&self) -> bool {
        self.mode() == Mode::Layout
    }
    pub fn pushed(&self) -> Option<&str> {
        match self {
            | Epidatum::Push(var) => Some(var),
            | _ => None,
        }
    }
}

/// The variable pushed by a triple's epigraph, if any.
pub fn pushed_variable(epis: &[Epidatum]) -> Option<&str> {
    epis.iter().find_map(Epidatum::pushed)
}
