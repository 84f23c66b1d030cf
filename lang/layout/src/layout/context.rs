use penman_syntax::*;

fn epidata_of<'g>(graph: &'g Graph, triple: &Triple) -> &'g [Epidatum] {
    graph.epidata.get(triple).map(Vec::as_slice).unwrap_or_default()
}

/// The variable whose node context begins at `triple`, if any.
pub fn get_pushed_variable<'g>(graph: &'g Graph, triple: &Triple) -> Option<&'g str> {
    pushed_variable(epidata_of(graph, triple))
}

/// For each triple, the variable of the node it was written in.
///
/// Follows the pushes and pops from the top; once a triple does not touch
/// the current context, or more contexts are closed than were opened, the
/// remaining contexts are unknown.
pub fn node_contexts(graph: &Graph) -> Vec<Option<&str>> {
    let variables = graph.variables();
    let mut contexts = vec![None; graph.triples.len()];
    let mut stack: Vec<&str> = graph.top().into_iter().collect();
    for (i, triple) in graph.triples.iter().enumerate() {
        let Some(&context) = stack.last() else { break };
        if !triple.touches(context) {
            break;
        }
        contexts[i] = Some(context);
        let epis = epidata_of(graph, triple);
        if let Some(pushed) = pushed_variable(epis).filter(|var| variables.contains(*var)) {
            stack.push(pushed);
        }
        for _ in epis.iter().filter(|epi| matches!(epi, Epidatum::Pop)) {
            stack.pop();
        }
    }
    contexts
}

/// Whether `triple` was written from its target's side, as in
/// `(b :ARG0-of (a))` for `(a, :ARG0, b)`.
pub fn appears_inverted(graph: &Graph, triple: &Triple) -> bool {
    let variables = graph.variables();
    if triple.role == CONCEPT_ROLE || !triple.target_str().is_some_and(|t| variables.contains(t)) {
        return false;
    }
    if let Some(pushed) = get_pushed_variable(graph, triple) {
        return pushed == triple.source;
    }
    for (context, other) in node_contexts(graph).into_iter().zip(&graph.triples) {
        let Some(context) = context else { break };
        if other == triple {
            return triple.target_str() == Some(context);
        }
    }
    false
}

/// The index of the triple whose `Pop` closes the context of `var`.
pub(crate) fn closing_pop(graph: &Graph, var: &str) -> Option<usize> {
    let mut stack: Vec<&str> = Vec::new();
    for (i, triple) in graph.triples.iter().enumerate() {
        let epis = epidata_of(graph, triple);
        if let Some(pushed) = pushed_variable(epis) {
            stack.push(pushed);
        }
        for _ in epis.iter().filter(|epi| matches!(epi, Epidatum::Pop)) {
            if stack.pop() == Some(var) {
                return Some(i);
            }
        }
    }
    None
}
