//! The pure graph: a list of triples with a top and its epigraph.

use crate::*;
use indexmap::{IndexMap, IndexSet};

/// Triples plus a designated top.
///
/// The explicit top, when set, is always the source of some triple; without
/// one the source of the first triple is the top. Two graphs are equal when
/// they have the same top and the same triples in any order; epigraph data
/// and metadata are ignored.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub triples: Vec<Triple>,
    top: Option<Variable>,
    pub epidata: Epidata,
    pub metadata: Metadata,
}

impl Graph {
    pub fn new(triples: Vec<Triple>) -> Self {
        Graph { triples, ..Default::default() }
    }
    pub fn with_top(mut self, top: impl Into<Variable>) -> Result<Self, GraphError> {
        self.set_top(Some(top.into()))?;
        Ok(self)
    }
    pub fn with_epidata(mut self, epidata: Epidata) -> Self {
        self.epidata = epidata;
        self
    }
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /* ----------------------------------- Top ---------------------------------- */

    pub fn top(&self) -> Option<&str> {
        self.top.as_deref().or_else(|| self.triples.first().map(|t| t.source.as_str()))
    }
    /// Whether the top was given explicitly.
    pub fn has_explicit_top(&self) -> bool {
        self.top.is_some()
    }
    pub fn set_top(&mut self, top: Option<Variable>) -> Result<(), GraphError> {
        if let Some(top) = &top {
            if !self.triples.iter().any(|t| &t.source == top) {
                return Err(GraphError::InvalidTop(top.clone()));
            }
        }
        self.top = top;
        Ok(())
    }

    /* ---------------------------------- Views --------------------------------- */

    /// Every triple source, plus the top.
    pub fn variables(&self) -> IndexSet<Variable> {
        let mut vars: IndexSet<Variable> = IndexSet::new();
        if let Some(top) = self.top() {
            vars.insert(top.to_string());
        }
        vars.extend(self.triples.iter().map(|t| t.source.clone()));
        vars
    }

    pub fn instances(&self) -> Vec<&Triple> {
        self.triples.iter().filter(|t| t.is_instance()).collect()
    }

    /// Non-concept triples whose target is a variable.
    pub fn edges(
        &self, source: Option<&str>, role: Option<&str>, target: Option<&str>,
    ) -> Vec<&Triple> {
        let vars = self.variables();
        self.filter(source, role, target, |t| {
            t.target_str().is_some_and(|target| vars.contains(target))
        })
    }

    /// Non-concept triples whose target is a constant.
    pub fn attributes(
        &self, source: Option<&str>, role: Option<&str>, target: Option<&str>,
    ) -> Vec<&Triple> {
        let vars = self.variables();
        self.filter(source, role, target, |t| {
            !t.target_str().is_some_and(|target| vars.contains(target))
        })
    }

    fn filter(
        &self, source: Option<&str>, role: Option<&str>, target: Option<&str>,
        kind: impl Fn(&Triple) -> bool,
    ) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|t| !t.is_instance() && kind(t))
            .filter(|t| source.is_none_or(|s| t.source == s))
            .filter(|t| role.is_none_or(|r| t.role == r))
            .filter(|t| target.is_none_or(|tgt| t.target_str() == Some(tgt)))
            .collect()
    }

    /// For each variable entered more than once, the number of extra
    /// entrances. The top counts as entered once.
    pub fn reentrancies(&self) -> IndexMap<Variable, usize> {
        let mut entrancies: IndexMap<Variable, usize> = IndexMap::new();
        if let Some(top) = self.top() {
            entrancies.insert(top.to_string(), 1);
        }
        for edge in self.edges(None, None, None) {
            if let Some(target) = &edge.target {
                *entrancies.entry(target.clone()).or_default() += 1;
            }
        }
        entrancies.into_iter().filter(|(_, count)| *count >= 2).map(|(v, c)| (v, c - 1)).collect()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        let mine: IndexSet<&Triple> = self.triples.iter().collect();
        let theirs: IndexSet<&Triple> = other.triples.iter().collect();
        self.top() == other.top() && self.triples.len() == other.triples.len() && mine == theirs
    }
}
impl Eq for Graph {}
