use crate::err::*;
use indexmap::map::Entry;
use indexmap::IndexSet;
use log::{debug, warn};
use penman_model::{Model, fresh_variable};
use penman_syntax::*;
use std::borrow::Cow;

/// A node whose branches are being turned into triples.
struct Frame<'t> {
    var: Cow<'t, str>,
    branches: std::slice::Iter<'t, Branch>,
    /// Position of the node's first triple.
    start: usize,
    has_concept: bool,
}

impl<'t> Frame<'t> {
    fn new(node: &'t Node, start: usize, placeholders: &mut Placeholders) -> Self {
        let var = match node.var.as_deref() {
            | Some(var) => Cow::Borrowed(var),
            | None => {
                let var = placeholders.fresh();
                warn!("node without a variable; using {var}");
                Cow::Owned(var)
            }
        };
        Frame { var, branches: node.branches.iter(), start, has_concept: false }
    }
}

/// Names for nodes that lack a variable, distinct from every named node.
struct Placeholders {
    taken: IndexSet<Variable>,
    next: usize,
}

impl Placeholders {
    fn fresh(&mut self) -> Variable {
        let var = fresh_variable(&self.taken, &mut self.next);
        self.taken.insert(var.clone());
        var
    }
}

/// Flattens `tree` into a graph.
///
/// Inverted edges between nodes are stored in their canonical direction.
/// Each nested node leaves a `Push` on the triple that introduces it and a
/// `Pop` on the last triple it produces, so [`configure`](super::configure)
/// can rebuild the same tree.
pub fn interpret(tree: &Tree, model: &Model) -> Result<Graph> {
    let variables = tree.variables();
    let mut placeholders =
        Placeholders { taken: variables.iter().map(|var| var.to_string()).collect(), next: 2 };
    let mut triples: Vec<(Triple, Vec<Epidatum>)> = Vec::new();
    let root = Frame::new(&tree.node, 0, &mut placeholders);
    let top = root.var.to_string();
    let mut stack = vec![root];

    loop {
        let Some(frame) = stack.last_mut() else { break };
        let Some(branch) = frame.branches.next() else {
            let Some(Frame { var, start, has_concept, .. }) = stack.pop() else { break };
            if !has_concept {
                triples.insert(start, (Triple::missing(var, CONCEPT_ROLE), Vec::new()));
            }
            if !stack.is_empty() {
                if let Some((_, epis)) = triples.last_mut() {
                    epis.push(Epidatum::Pop);
                }
            }
            continue;
        };

        let (role, mut epis) = split_role(&branch.role)?;
        frame.has_concept |= role == CONCEPT_ROLE;
        match &branch.target {
            | Target::Atom(atom) => {
                let (target, aligned) = split_atom(atom.as_deref())?;
                epis.extend(aligned);
                let mut triple = Triple { source: frame.var.to_string(), role, target };
                if model.is_role_inverted(&triple.role) {
                    match triple.target_str().is_some_and(|t| variables.contains(t)) {
                        | true => triple = model.invert(&triple)?,
                        | false => warn!("cannot deinvert attribute: {triple}"),
                    }
                }
                triples.push((triple, epis));
            }
            | Target::Node(child) => {
                let child = Frame::new(child, triples.len() + 1, &mut placeholders);
                let triple = model.deinvert(&Triple::new(frame.var.as_ref(), role, child.var.as_ref()))?;
                epis.push(Epidatum::Push(child.var.to_string()));
                triples.push((triple, epis));
                stack.push(child);
            }
        }
    }

    let mut epidata = Epidata::new();
    let mut kept = Vec::with_capacity(triples.len());
    for (triple, epis) in triples {
        match epidata.entry(triple.clone()) {
            | Entry::Vacant(entry) => {
                entry.insert(epis);
            }
            | Entry::Occupied(_) => warn!("ignoring epigraph data for duplicate triple: {triple}"),
        }
        kept.push(triple);
    }
    debug!("interpreted {} triples with top {top}", kept.len());
    Ok(Graph::new(kept)
        .with_top(top)?
        .with_epidata(epidata)
        .with_metadata(tree.metadata.clone()))
}

/// `/` becomes the concept role; `:role~e.1` splits into the role and its
/// alignment.
fn split_role(role: &str) -> Result<(Role, Vec<Epidatum>)> {
    if role == CONCEPT_SLASH {
        return Ok((CONCEPT_ROLE.to_string(), Vec::new()));
    }
    match role.split_once('~') {
        | Some((role, aln)) => Ok((role.to_string(), vec![Epidatum::RoleAlignment(aln.parse()?)])),
        | None => Ok((role.to_string(), Vec::new())),
    }
}

/// Splits an alignment off an atomic target. A string may contain `~`, so
/// its alignment can only follow the closing quote.
fn split_atom(atom: Option<&str>) -> Result<(Option<String>, Vec<Epidatum>)> {
    let Some(atom) = atom else { return Ok((None, Vec::new())) };
    let (text, aln) = match atom.starts_with('"') {
        | true => atom.split_at(atom.rfind('"').map_or(atom.len(), |i| i + 1)),
        | false => atom.split_once('~').unwrap_or((atom, "")),
    };
    let epis = match aln.is_empty() {
        | true => Vec::new(),
        | false => vec![Epidatum::Alignment(aln.parse()?)],
    };
    Ok((Some(text.to_string()), epis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use penman_surface::parse;
    use pretty_assertions::assert_eq;

    fn decode(text: &str, model: &Model) -> Graph {
        interpret(&parse(text).unwrap(), model).unwrap()
    }

    #[test]
    fn nested_node() {
        let g = decode("(b / bark-01 :ARG0 (d / dog))", &Model::default());
        assert_eq!(
            g.triples,
            vec![
                Triple::new("b", CONCEPT_ROLE, "bark-01"),
                Triple::new("b", ":ARG0", "d"),
                Triple::new("d", CONCEPT_ROLE, "dog"),
            ]
        );
        assert_eq!(g.top(), Some("b"));
        assert_eq!(g.epidata[&Triple::new("b", ":ARG0", "d")], vec![Epidatum::Push("d".into())]);
        assert_eq!(g.epidata[&Triple::new("d", CONCEPT_ROLE, "dog")], vec![Epidatum::Pop]);
    }

    #[test]
    fn inverted_edges() {
        let g = decode("(a / alpha :ARG0-of (b / beta) :mod-of 5)", &Model::default());
        assert_eq!(
            g.triples,
            vec![
                Triple::new("a", CONCEPT_ROLE, "alpha"),
                Triple::new("b", ":ARG0", "a"),
                Triple::new("b", CONCEPT_ROLE, "beta"),
                Triple::new("a", ":mod-of", "5"),
            ]
        );
        assert_eq!(g.epidata[&Triple::new("b", ":ARG0", "a")], vec![Epidatum::Push("b".into())]);

        let g = decode("(a / alpha :ARG0-of (b / beta))", &Model::noop());
        assert_eq!(g.triples[1], Triple::new("a", ":ARG0-of", "b"));
    }

    #[test]
    fn reentrant_inverted_edge() {
        let g = decode("(a / alpha :ARG0 (b / beta :ARG1-of a))", &Model::default());
        assert_eq!(g.triples[3], Triple::new("a", ":ARG1", "b"));
    }

    #[test]
    fn missing_concepts() {
        let g = decode("(a :ARG0 (b))", &Model::default());
        assert_eq!(
            g.triples,
            vec![
                Triple::missing("a", CONCEPT_ROLE),
                Triple::new("a", ":ARG0", "b"),
                Triple::missing("b", CONCEPT_ROLE),
            ]
        );
        assert_eq!(g.epidata[&Triple::missing("b", CONCEPT_ROLE)], vec![Epidatum::Pop]);
        assert_eq!(g.epidata[&Triple::missing("a", CONCEPT_ROLE)], Vec::<Epidatum>::new());
    }

    #[test]
    fn pops_land_on_the_last_triple_of_the_nested_node() {
        let g = decode("(a :ARG0 (b :mod 1) :ARG1 (c / gamma :ARG2 (d)))", &Model::default());
        assert_eq!(
            g.triples[1..4].to_vec(),
            vec![
                Triple::new("a", ":ARG0", "b"),
                Triple::missing("b", CONCEPT_ROLE),
                Triple::new("b", ":mod", "1"),
            ]
        );
        assert_eq!(g.epidata[&Triple::new("b", ":mod", "1")], vec![Epidatum::Pop]);
        assert_eq!(g.epidata[&Triple::missing("d", CONCEPT_ROLE)], vec![Epidatum::Pop, Epidatum::Pop]);
    }

    #[test]
    fn alignments() {
        let g = decode(r#"(a / alpha~e.1 :ARG0~e.2 (b / beta) :name "x~y"~3 :mod c~e.4)"#, &Model::default());
        let aln = |prefix: Option<&str>, i| Alignment::new(vec![i], prefix.map(str::to_string));
        assert_eq!(
            g.epidata[&Triple::new("a", CONCEPT_ROLE, "alpha")],
            vec![Epidatum::Alignment(aln(Some("e."), 1))]
        );
        assert_eq!(
            g.epidata[&Triple::new("a", ":ARG0", "b")],
            vec![Epidatum::RoleAlignment(aln(Some("e."), 2)), Epidatum::Push("b".into())]
        );
        assert_eq!(g.epidata[&Triple::new("a", ":name", "\"x~y\"")], vec![Epidatum::Alignment(aln(None, 3))]);
        assert_eq!(g.epidata[&Triple::new("a", ":mod", "c")], vec![Epidatum::Alignment(aln(Some("e."), 4))]);
    }

    #[test]
    fn duplicate_triples_keep_the_first_epigraph() {
        let g = decode("(a / alpha :ARG0 (b / beta) :ARG0 b)", &Model::default());
        assert_eq!(g.triples.len(), 4);
        assert_eq!(g.epidata.len(), 3);
        assert_eq!(g.epidata[&Triple::new("a", ":ARG0", "b")], vec![Epidatum::Push("b".into())]);
    }

    #[test]
    fn metadata_is_carried() {
        let g = decode("# ::id 1\n(a / alpha)", &Model::default());
        assert_eq!(g.metadata.get("id").map(String::as_str), Some("1"));
    }

    #[test]
    fn missing_variable() {
        let g = decode("(/ alpha)", &Model::default());
        assert_eq!(g.triples, vec![Triple::new("_", CONCEPT_ROLE, "alpha")]);
        assert_eq!(g.top(), Some("_"));
        let g = decode("(_ :ARG0 (/ beta) :ARG1 (/ gamma))", &Model::default());
        assert_eq!(
            g.triples,
            vec![
                Triple::missing("_", CONCEPT_ROLE),
                Triple::new("_", ":ARG0", "_2"),
                Triple::new("_2", CONCEPT_ROLE, "beta"),
                Triple::new("_", ":ARG1", "_3"),
                Triple::new("_3", CONCEPT_ROLE, "gamma"),
            ]
        );
        let tree = Tree::from(Node::default().with_branch(":ARG0", "b"));
        let g = interpret(&tree, &Model::default()).unwrap();
        assert_eq!(g.triples, vec![Triple::missing("_", CONCEPT_ROLE), Triple::new("_", ":ARG0", "b")]);
    }

    #[test]
    fn deep_nesting() {
        let depth = 200;
        let mut text = String::new();
        for i in 0..depth {
            text.push_str(&format!("(n{i} / c :ARG0 "));
        }
        text.push_str("(leaf / c)");
        text.push_str(&")".repeat(depth));
        let g = decode(&text, &Model::default());
        assert_eq!(g.triples.len(), 2 * depth + 1);
        assert_eq!(g.epidata[&Triple::new("leaf", CONCEPT_ROLE, "c")].len(), depth);
    }
}
