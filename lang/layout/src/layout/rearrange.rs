use crate::{err::*, layout::configure};
use indexmap::IndexSet;
use penman_model::{Model, Order};
use penman_syntax::*;

/// Configures `graph` afresh: layout markers are dropped and, unless `order`
/// is [`Order::Original`], triples are first sorted by role.
pub fn reconfigure(graph: &Graph, top: Option<&str>, model: &Model, order: Order) -> Result<Tree> {
    let mut graph = graph.clone();
    // an implicit top is the first triple's source, which sorting may change
    let pinned = graph.top().map(str::to_string);
    graph.set_top(pinned)?;
    for epis in graph.epidata.values_mut() {
        epis.retain(|epi| !epi.is_layout());
    }
    if order != Order::Original {
        graph.triples.sort_by_cached_key(|triple| model.role_key(order, &triple.role));
    }
    configure(&graph, top, model)
}

/// Sorts the branches of every node by role in place; the concept branch
/// stays first.
///
/// With `attributes_first`, branches whose target is not a node variable
/// come before those that are, whatever their roles.
pub fn rearrange(tree: &mut Tree, model: &Model, order: Order, attributes_first: bool) {
    let variables: IndexSet<String> = match attributes_first {
        | true => tree.variables().into_iter().map(str::to_string).collect(),
        | false => IndexSet::new(),
    };
    let key = |branch: &Branch| {
        let var = match &branch.target {
            | Target::Atom(atom) => atom.as_deref(),
            | Target::Node(node) => node.var.as_deref(),
        };
        (var.is_some_and(|var| variables.contains(var)), model.role_key(order, &branch.role))
    };
    let mut stack = vec![&mut tree.node];
    while let Some(node) = stack.pop() {
        let pinned = usize::from(node.branches.first().is_some_and(|b| b.role == CONCEPT_SLASH));
        node.branches[pinned..].sort_by_cached_key(key);
        for branch in node.branches.iter_mut() {
            if let Target::Node(child) = &mut branch.target {
                stack.push(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::interpret;
    use penman_surface::{Formatter, Indent, parse};
    use pretty_assertions::assert_eq;

    fn flat(tree: &Tree) -> String {
        Formatter::new(Indent::Flat, false).format(tree)
    }

    #[test]
    fn rearranging_branches() {
        let model = Model::default();
        let text = "(a / alpha :op2 (b / beta :ARG1 x :ARG0 y) :mod 1 :op10 c :ARG0-of d)";
        let mut tree = parse(text).unwrap();
        rearrange(&mut tree, &model, Order::Alphanumeric, false);
        assert_eq!(flat(&tree), "(a / alpha :ARG0-of d :mod 1 :op2 (b / beta :ARG0 y :ARG1 x) :op10 c)");

        let mut tree = parse(text).unwrap();
        rearrange(&mut tree, &model, Order::Canonical, false);
        assert_eq!(flat(&tree), "(a / alpha :mod 1 :op2 (b / beta :ARG0 y :ARG1 x) :op10 c :ARG0-of d)");

        let mut tree = parse(text).unwrap();
        rearrange(&mut tree, &model, Order::Original, true);
        assert_eq!(flat(&tree), "(a / alpha :mod 1 :op10 c :ARG0-of d :op2 (b / beta :ARG1 x :ARG0 y))");
    }

    #[test]
    fn reconfigured_layout_ignores_input_order() {
        let model = Model::default();
        let first = parse("(a / alpha :ARG1 (c / gamma) :ARG0 (b / beta :mod a))").unwrap();
        let second = parse("(a / alpha :ARG0 (b / beta :mod a) :ARG1 (c / gamma))").unwrap();
        let first = reconfigure(&interpret(&first, &model).unwrap(), None, &model, Order::Canonical);
        let second = reconfigure(&interpret(&second, &model).unwrap(), None, &model, Order::Canonical);
        assert_eq!(flat(&first.unwrap()), flat(&second.unwrap()));
    }

    #[test]
    fn reconfigure_drops_layout() {
        let model = Model::default();
        let tree = parse("(a / alpha :ARG0 (b / beta :ARG1 (c / gamma)))").unwrap();
        let graph = interpret(&tree, &model).unwrap();
        let tree = reconfigure(&graph, None, &model, Order::Original).unwrap();
        assert_eq!(flat(&tree), "(a / alpha :ARG0 (b / beta :ARG1 (c / gamma)))");
        let tree = reconfigure(&graph, Some("c"), &model, Order::Original).unwrap();
        assert_eq!(flat(&tree), "(c / gamma :ARG1-of (b / beta :ARG0-of (a / alpha)))");
    }

    #[test]
    fn reconfigure_keeps_an_implicit_top() {
        let model = Model::default();
        let graph = Graph::new(vec![
            Triple::new("a", CONCEPT_ROLE, "alpha"),
            Triple::new("a", ":mod", "b"),
            Triple::new("b", CONCEPT_ROLE, "beta"),
            Triple::new("b", ":ARG1", "5"),
        ]);
        for order in [Order::Original, Order::Alphanumeric, Order::Canonical] {
            let tree = reconfigure(&graph, None, &model, order).unwrap();
            assert_eq!(flat(&tree), "(a / alpha :mod (b / beta :ARG1 5))");
        }
        let tree = reconfigure(&graph, Some("b"), &model, Order::Alphanumeric).unwrap();
        assert_eq!(tree.node.var.as_deref(), Some("b"));
    }
}
