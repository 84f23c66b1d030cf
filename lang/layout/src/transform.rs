//! Rewrites of trees and graphs driven by a role model.
//!
//! Graph transforms keep the epigraph consistent, so the result configures
//! with the new nodes nested where the old edges were.

use crate::{err::*, layout::*, layout::context::closing_pop};
use indexmap::{IndexMap, IndexSet};
use penman_model::{Model, fresh_variable};
use penman_syntax::*;

/* ---------------------------------- Trees --------------------------------- */

/// Canonicalizes every branch role of `tree`, keeping role alignments.
pub fn canonicalize_roles(tree: &Tree, model: &Model) -> Tree {
    let mut tree = tree.clone();
    let mut stack = vec![&mut tree.node];
    while let Some(node) = stack.pop() {
        for branch in node.branches.iter_mut() {
            branch.role = match branch.role.split_once('~') {
                | Some((role, aln)) => format!("{}~{aln}", model.canonicalize_role(role)),
                | None => model.canonicalize_role(&branch.role),
            };
            if let Target::Node(child) = &mut branch.target {
                stack.push(child);
            }
        }
    }
    tree
}

/* --------------------------------- Graphs --------------------------------- */

/// Replaces every edge with a reifiable role by a node of the role's concept.
///
/// The new node is entered from the side the edge was written from, and
/// the edge's own markers move to the triple leaving it.
pub fn reify_edges(graph: &Graph, model: &Model) -> Result<Graph> {
    let mut variables = graph.variables();
    let mut epidata = graph.epidata.clone();
    let mut triples = Vec::with_capacity(graph.triples.len());
    // contexts of nested targets now also close the new nodes
    let mut closers: Vec<usize> = Vec::new();
    // where the markers of a replaced triple went
    let mut moved: IndexMap<&Triple, Triple> = IndexMap::new();

    for triple in &graph.triples {
        if !model.is_role_reifiable(&triple.role) {
            triples.push(triple.clone());
            continue;
        }
        let [mut incoming, node, mut outgoing] = model.reify(triple, &variables)?;
        if appears_inverted(graph, triple) {
            std::mem::swap(&mut incoming, &mut outgoing);
        }
        let var = node.source.clone();
        variables.insert(var.clone());

        let mut old = epidata.shift_remove(triple).unwrap_or_default();
        old.retain(|epi| !matches!(epi, Epidatum::RoleAlignment(_)));
        match pushed_variable(&old) {
            | Some(pushed) => closers.extend(closing_pop(graph, pushed)),
            | None => old.push(Epidatum::Pop),
        }
        epidata.insert(incoming.clone(), vec![Epidatum::Push(var)]);
        epidata.insert(node.clone(), Vec::new());
        epidata.insert(outgoing.clone(), old);
        moved.insert(triple, outgoing.clone());
        triples.extend([incoming, node, outgoing]);
    }

    for i in closers {
        let closer = &graph.triples[i];
        let closer = moved.get(closer).unwrap_or(closer);
        epidata.entry(closer.clone()).or_default().push(Epidatum::Pop);
    }
    rebuild(graph, triples, epidata)
}

/// Collapses nodes of dereifiable concepts back into single edges.
///
/// A node qualifies when it is not the top, no edge points to it, and it
/// has exactly two triples besides its concept. The edge takes the place
/// of the triple that entered the node.
pub fn dereify_edges(graph: &Graph, model: &Model) -> Result<Graph> {
    let agenda = dereify_agenda(graph, model);
    let mut epidata = graph.epidata.clone();
    let mut triples = Vec::with_capacity(graph.triples.len());
    for triple in &graph.triples {
        let Some(Dereified { first, triple: dereified, epis }) = agenda.get(triple.source.as_str())
        else {
            triples.push(triple.clone());
            continue;
        };
        epidata.shift_remove(triple);
        if triple == *first {
            triples.push(dereified.clone());
            epidata.insert(dereified.clone(), epis.clone());
        }
    }
    // the pop closing a collapsed node ends up on its edge if the node wrote it
    for var in agenda.keys() {
        let Some(i) = closing_pop(graph, var) else { continue };
        let closer = &graph.triples[i];
        let closer = agenda.get(closer.source.as_str()).map_or(closer, |d| &d.triple);
        if let Some(epis) = epidata.get_mut(closer) {
            if let Some(i) = epis.iter().position(|epi| matches!(epi, Epidatum::Pop)) {
                epis.remove(i);
            }
        }
    }
    rebuild(graph, triples, epidata)
}

struct Dereified<'g> {
    first: &'g Triple,
    triple: Triple,
    epis: Vec<Epidatum>,
}

fn dereify_agenda<'g>(graph: &'g Graph, model: &Model) -> IndexMap<&'g str, Dereified<'g>> {
    let mut fixed: IndexSet<&str> =
        graph.edges(None, None, None).into_iter().filter_map(Triple::target_str).collect();
    fixed.extend(graph.top());
    let mut instances: IndexMap<&str, &Triple> = IndexMap::new();
    let mut others: IndexMap<&str, Vec<&Triple>> = IndexMap::new();
    for triple in &graph.triples {
        let var = triple.source.as_str();
        if fixed.contains(var) {
            continue;
        }
        match triple.is_instance() {
            | true => {
                instances.insert(var, triple);
            }
            | false => others.entry(var).or_default().push(triple),
        }
    }

    let alignments = alignments(graph);
    let mut agenda = IndexMap::new();
    for (var, instance) in instances {
        let concept = instance.target_str().unwrap_or_default();
        let Some(&[mut first, mut second]) = others.get(var).map(Vec::as_slice) else { continue };
        if !model.is_concept_dereifiable(concept) {
            continue;
        }
        if get_pushed_variable(graph, second) == Some(var) {
            std::mem::swap(&mut first, &mut second);
        }
        let Ok(triple) = model.dereify(instance, first, second) else { continue };

        let mut epis: Vec<Epidatum> = Vec::new();
        if let Some(aln) = alignments.get(instance) {
            epis.push(Epidatum::RoleAlignment(aln.clone()));
        }
        let own = |epi: &&Epidatum| match epi {
            | Epidatum::RoleAlignment(_) => false,
            | Epidatum::Push(pushed) => pushed != var,
            | _ => true,
        };
        epis.extend(get_epidata(graph, second).iter().filter(own).cloned());
        // pops written on the other triples of the node
        for other in [instance, first] {
            let pops = get_epidata(graph, other).iter().filter(|epi| matches!(epi, Epidatum::Pop));
            epis.extend(pops.cloned());
        }
        agenda.insert(var, Dereified { first, triple, epis });
    }
    agenda
}

/// Turns every attribute `(s, r, c)` into an edge to a new node `(v / c)`.
pub fn reify_attributes(graph: &Graph) -> Result<Graph> {
    let mut variables = graph.variables();
    let mut epidata = graph.epidata.clone();
    let mut triples = Vec::with_capacity(graph.triples.len());
    let mut next = 2;
    for triple in &graph.triples {
        let attribute = !triple.is_instance()
            && !triple.target_str().is_some_and(|t| variables.contains(t));
        if !attribute {
            triples.push(triple.clone());
            continue;
        }
        let var = fresh_variable(&variables, &mut next);
        variables.insert(var.clone());
        let edge = Triple::new(triple.source.clone(), triple.role.clone(), var.clone());
        let node = Triple { source: var.clone(), role: CONCEPT_ROLE.to_string(), target: triple.target.clone() };

        let (mut role_epis, mut node_epis): (Vec<_>, Vec<_>) = epidata
            .shift_remove(triple)
            .unwrap_or_default()
            .into_iter()
            .partition(|epi| epi.mode() == Mode::Role);
        role_epis.push(Epidatum::Push(var));
        node_epis.push(Epidatum::Pop);
        epidata.insert(edge.clone(), role_epis);
        epidata.insert(node.clone(), node_epis);
        triples.extend([edge, node]);
    }
    rebuild(graph, triples, epidata)
}

/// Adds a top-role triple before each triple that enters a node, so the
/// branch structure survives as plain triples.
pub fn indicate_branches(graph: &Graph, model: &Model) -> Result<Graph> {
    let mut triples = Vec::with_capacity(graph.triples.len());
    for triple in &graph.triples {
        match get_pushed_variable(graph, triple) {
            | Some(pushed) if triple.target_str() == Some(pushed) => {
                triples.push(Triple::new(triple.source.clone(), model.top_role.clone(), pushed));
            }
            | Some(pushed) if triple.source == pushed => {
                if let Some(target) = &triple.target {
                    triples.push(Triple::new(target.clone(), model.top_role.clone(), pushed));
                }
            }
            | _ => {}
        }
        triples.push(triple.clone());
    }
    rebuild(graph, triples, graph.epidata.clone())
}

fn get_epidata<'g>(graph: &'g Graph, triple: &Triple) -> &'g [Epidatum] {
    graph.epidata.get(triple).map(Vec::as_slice).unwrap_or_default()
}

/// A graph of new triples with the top and metadata of `graph`.
fn rebuild(graph: &Graph, triples: Vec<Triple>, epidata: Epidata) -> Result<Graph> {
    let mut rebuilt = Graph::new(triples).with_epidata(epidata).with_metadata(graph.metadata.clone());
    rebuilt.set_top(graph.top().map(str::to_string))?;
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use penman_surface::{Formatter, Indent, parse};
    use pretty_assertions::assert_eq;

    fn amr() -> Model {
        Model::amr().unwrap()
    }

    fn decode(text: &str, model: &Model) -> Graph {
        interpret(&parse(text).unwrap(), model).unwrap()
    }

    fn encode(graph: &Graph, model: &Model) -> String {
        Formatter::new(Indent::Flat, false).format(&configure(graph, None, model).unwrap())
    }

    #[test]
    fn canonicalizing_roles() {
        let model = amr();
        let tree = parse("(a / alpha :mod-of~e.2 (b / beta :ARG0-of-of c) :domain-of d)").unwrap();
        let tree = canonicalize_roles(&tree, &model);
        let text = Formatter::new(Indent::Flat, false).format(&tree);
        assert_eq!(text, "(a / alpha :domain~e.2 (b / beta :ARG0 c) :mod d)");
    }

    #[test]
    fn reifying_an_attribute_edge() {
        let model = amr();
        let graph = reify_edges(&decode("(a / alpha :mod 5)", &model), &model).unwrap();
        assert_eq!(
            graph.triples,
            vec![
                Triple::new("a", CONCEPT_ROLE, "alpha"),
                Triple::new("_", ":ARG1", "a"),
                Triple::new("_", CONCEPT_ROLE, "have-mod-91"),
                Triple::new("_", ":ARG2", "5"),
            ]
        );
        assert_eq!(graph.top(), Some("a"));
        assert_eq!(encode(&graph, &model), "(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 5))");
    }

    #[test]
    fn reifying_nested_and_inverted_edges() {
        let model = amr();
        let graph = decode("(a / alpha :mod (b / beta) :ARG0 c :location-of (d / delta))", &model);
        let graph = reify_edges(&graph, &model).unwrap();
        assert_eq!(
            encode(&graph, &model),
            "(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 (b / beta)) :ARG0 c \
             :ARG2-of (_2 / be-located-at-91 :ARG1 (d / delta)))"
        );
    }

    #[test]
    fn dereifying() {
        let model = amr();
        let graph = decode("(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 (b / beta)) :ARG0 c)", &model);
        let graph = dereify_edges(&graph, &model).unwrap();
        assert_eq!(encode(&graph, &model), "(a / alpha :mod (b / beta) :ARG0 c)");

        let graph = decode("(a / alpha :ARG1-of (_ / have-mod-91~e.3 :ARG2 5))", &model);
        let graph = dereify_edges(&graph, &model).unwrap();
        assert_eq!(graph.triples, vec![Triple::new("a", CONCEPT_ROLE, "alpha"), Triple::new("a", ":mod", "5")]);
        assert_eq!(encode(&graph, &model), "(a / alpha :mod~e.3 5)");
    }

    #[test]
    fn reify_then_dereify() {
        let model = amr();
        let text = "(a / alpha :mod (b / beta :location c) :ARG0 (d / delta :mod 5) :polarity -)";
        let graph = decode(text, &model);
        let reified = reify_edges(&graph, &model).unwrap();
        assert_ne!(reified, graph);
        let dereified = dereify_edges(&reified, &model).unwrap();
        assert_eq!(dereified, graph);
        assert_eq!(encode(&dereified, &model), text);
    }

    #[test]
    fn fixed_nodes_are_not_dereified() {
        let model = amr();
        let graph = decode("(_ / have-mod-91 :ARG1 (a / alpha) :ARG2 5)", &model);
        assert_eq!(dereify_edges(&graph, &model).unwrap().triples, graph.triples);
        let graph = decode("(a / alpha :ARG1-of (_ / have-mod-91 :ARG2 5 :time 3))", &model);
        assert_eq!(dereify_edges(&graph, &model).unwrap().triples, graph.triples);
    }

    #[test]
    fn reifying_attributes() {
        let model = Model::default();
        let graph = decode("(a / alpha :ARG0 (b / beta) :polarity~e.2 -~e.3 :mod 5)", &model);
        let graph = reify_attributes(&graph).unwrap();
        assert_eq!(
            encode(&graph, &model),
            "(a / alpha :ARG0 (b / beta) :polarity~e.2 (_ / -~e.3) :mod (_2 / 5))"
        );
    }

    #[test]
    fn indicating_branches() {
        let model = amr();
        let graph = decode("(a / alpha :ARG0 (b / beta) :ARG1-of (c / gamma))", &model);
        let graph = indicate_branches(&graph, &model).unwrap();
        assert_eq!(
            graph.triples,
            vec![
                Triple::new("a", CONCEPT_ROLE, "alpha"),
                Triple::new("a", ":TOP", "b"),
                Triple::new("a", ":ARG0", "b"),
                Triple::new("b", CONCEPT_ROLE, "beta"),
                Triple::new("a", ":TOP", "c"),
                Triple::new("c", ":ARG1", "a"),
                Triple::new("c", CONCEPT_ROLE, "gamma"),
            ]
        );
        assert_eq!(graph.top(), Some("a"));
    }
}
