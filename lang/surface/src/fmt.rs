//! Formatting trees as PENMAN text and triples as conjunctions.

use indexmap::IndexSet;
use penman_syntax::*;
use pretty::RcDoc;

/* -------------------------------- Formatter ------------------------------- */

/// How branches after the first are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Indent {
    /// Everything on one line.
    Flat,
    /// Each branch on its own line, aligned one column past the opening
    /// parenthesis of its node's variable.
    #[default]
    Adaptive,
    /// Each branch on its own line, indented by a fixed width per level.
    Columns(usize),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    pub indent: Indent,
    /// Join the leading attributes of a node on its first line.
    pub compact: bool,
}

impl Formatter {
    pub fn new(indent: Indent, compact: bool) -> Self {
        Formatter { indent, compact }
    }

    /// The tree, preceded by its metadata as `# ::key value` lines.
    pub fn format(&self, tree: &Tree) -> String {
        let mut lines: Vec<String> = tree
            .metadata
            .iter()
            .map(|(key, value)| match value.is_empty() {
                | true => format!("# ::{key}"),
                | false => format!("# ::{key} {value}"),
            })
            .collect();
        lines.push(self.format_node(&tree.node, tree));
        lines.join("\n")
    }

    fn format_node(&self, node: &Node, tree: &Tree) -> String {
        let vars = match self.compact {
            | true => tree.variables().into_iter().map(str::to_string).collect(),
            | false => IndexSet::new(),
        };
        let fmt = NodeFormatter { indent: self.indent, vars };
        let mut out = String::new();
        // rendering into a String never fails
        node.pretty(&fmt).render_fmt(LINE_WIDTH, &mut out).ok();
        out
    }

    /// `role(source, target)` for each triple, joined with `^`.
    pub fn format_triples(&self, triples: &[Triple]) -> String {
        let delimiter = match self.indent {
            | Indent::Flat => " ^ ",
            | _ => " ^\n",
        };
        let parts: Vec<String> = triples.iter().map(|triple| triple.ugly(self)).collect();
        parts.join(delimiter)
    }
}

/// Breaks are all explicit, so the width only needs to be generous.
const LINE_WIDTH: usize = 100;

struct NodeFormatter {
    indent: Indent,
    /// Variables of the tree when compacting; empty otherwise.
    vars: IndexSet<String>,
}

/* --------------------------------- Pretty --------------------------------- */

impl<'a> Pretty<'a, NodeFormatter> for Node {
    fn pretty(&self, f: &'a NodeFormatter) -> RcDoc<'a> {
        let Some(var) = &self.var else { return RcDoc::text("()") };
        if self.branches.is_empty() {
            return RcDoc::text(format!("({var})"));
        }
        let (joiner, nest) = match f.indent {
            | Indent::Flat => (RcDoc::space(), 0),
            | Indent::Adaptive => (RcDoc::hardline(), var.chars().count() + 2),
            | Indent::Columns(n) => (RcDoc::hardline(), n),
        };

        // leading attributes share a line when compacting
        let mut parts: Vec<RcDoc<'a>> = Vec::new();
        let mut compact = !f.vars.is_empty();
        for branch in &self.branches {
            let attribute = branch.target.atom().is_some_and(|atom| !f.vars.contains(atom))
                || branch.target == Target::Atom(None);
            if compact && !attribute {
                compact = false;
                if !parts.is_empty() {
                    parts = vec![RcDoc::intersperse(parts, RcDoc::space())];
                }
            }
            parts.push(branch.pretty(f));
        }
        if compact {
            parts = vec![RcDoc::intersperse(parts, RcDoc::space())];
        }

        RcDoc::concat([
            RcDoc::text(format!("({var} ")),
            RcDoc::intersperse(parts, joiner).nest(nest as isize),
            RcDoc::text(")"),
        ])
    }
}

impl<'a> Pretty<'a, NodeFormatter> for Branch {
    fn pretty(&self, f: &'a NodeFormatter) -> RcDoc<'a> {
        let role = match self.role.as_str() {
            | role if role == CONCEPT_SLASH || role.starts_with(':') => role.to_string(),
            | role => format!(":{role}"),
        };
        match &self.target {
            | Target::Atom(None) => RcDoc::text(role),
            | Target::Atom(Some(atom)) if atom.is_empty() => RcDoc::text(role),
            | Target::Atom(Some(atom)) => RcDoc::text(format!("{role} {atom}")),
            | Target::Node(node) => {
                let nest = match f.indent {
                    | Indent::Adaptive => role.chars().count() + 1,
                    | _ => 0,
                };
                RcDoc::concat([RcDoc::text(role), RcDoc::space(), node.pretty(f)])
                    .nest(nest as isize)
            }
        }
    }
}

/* ---------------------------------- Ugly ---------------------------------- */

impl<'a> Ugly<'a, Formatter> for Triple {
    fn ugly(&self, _f: &'a Formatter) -> String {
        let role = self.role.strip_prefix(':').unwrap_or(&self.role);
        match &self.target {
            | Some(target) => format!("{role}({}, {target})", self.source),
            | None => format!("{role}({})", self.source),
        }
    }
}

/* ------------------------------- Entry points ------------------------------ */

/// Formats `tree` with adaptive indentation.
pub fn format(tree: &Tree) -> String {
    Formatter::default().format(tree)
}

/// Formats triples one per line.
pub fn format_triples(triples: &[Triple]) -> String {
    Formatter::default().format_triples(triples)
}
