use crate::err::*;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use penman_model::Model;
use penman_syntax::*;
use penman_utils::arena::*;

new_key_type! {
    struct DraftId;
}

/// A node under construction; nested nodes are referred to by id until the
/// tree is assembled.
struct Draft {
    var: Variable,
    edges: Vec<Edge>,
}

struct Edge {
    role: Role,
    target: Slot,
    /// Alignments still to be rendered.
    epis: Vec<Epidatum>,
}

enum Slot {
    Atom(Option<String>),
    Node(DraftId),
}

/// One entry of the work list.
enum Datum {
    Triple { triple: Triple, push: bool, epis: Vec<Epidatum> },
    Pop,
}

/// What happened when the next datum was taken for a node.
enum Placed {
    /// An edge was added; `surprising` if the triple had to be inverted.
    Edge { surprising: bool },
    /// An edge to a new node was added; its branches come next.
    Child(DraftId),
    /// The node has no more branches.
    End { surprising: bool },
}

/// Lays `graph` out as a tree rooted at `top` (the graph's top by default).
///
/// `Push` and `Pop` markers decide the nesting where they are consistent.
/// Triples that fit nowhere yet are set aside and retried, and nodes without
/// a marked context are nested where they were first referenced.
pub fn configure(graph: &Graph, top: Option<&str>, model: &Model) -> Result<Tree> {
    let top = top.or(graph.top());
    if graph.triples.is_empty() {
        let node = Node { var: top.map(str::to_string), branches: Vec::new() };
        return Ok(Tree::new(node, graph.metadata.clone()));
    }
    let Some(top) = top else { return Err(LayoutError::InvalidTop(String::new())) };

    let mut nodemap: IndexMap<Variable, Option<DraftId>> =
        graph.variables().into_iter().map(|var| (var, None)).collect();
    if !nodemap.contains_key(top) {
        return Err(LayoutError::InvalidTop(top.to_string()));
    }
    let mut drafts = ArenaDense::new();
    let root = drafts.alloc(Draft { var: top.to_string(), edges: Vec::new() });
    nodemap.insert(top.to_string(), Some(root));

    let mut data = preconfigure(graph, model);
    data.reverse();
    let mut layout = Configurator { model, data, drafts, nodemap };
    layout.configure_node(root);
    layout.trim_pops();

    // whatever the top node left behind is placed wherever it fits
    let mut skipped: Vec<Datum> = Vec::new();
    while !layout.data.is_empty() {
        let (unplaced, var) = layout.find_next();
        skipped.extend(unplaced);
        let count = layout.data.len();
        let Some(var) = var.filter(|_| count > 0) else { return Err(LayoutError::Disconnected) };
        let surprising = layout.configure_node(var);
        if layout.data.len() < count {
            skipped.append(&mut layout.data);
            layout.data = std::mem::take(&mut skipped);
        } else if let Some(datum) = layout.data.pop() {
            // the datum found for `var` only names it as a concept
            debug_assert!(surprising);
            skipped.insert(0, datum);
        }
        layout.trim_pops();
    }
    if !skipped.is_empty() {
        let unplaced = skipped
            .iter()
            .filter_map(|datum| match datum {
                | Datum::Triple { triple, .. } => Some(triple.to_string()),
                | Datum::Pop => None,
            })
            .collect();
        return Err(LayoutError::Incomplete(unplaced));
    }

    let node = layout.assemble(root);
    debug!("configured {} triples under {top}", graph.triples.len());
    Ok(Tree::new(node, graph.metadata.clone()))
}

/// Turns the triples into a work list, in order, keeping only consistent
/// markers: the first push of each variable, and only onto a triple it is
/// an endpoint of. A triple whose source is pushed is inverted so the pushed
/// variable becomes the target.
fn preconfigure(graph: &Graph, model: &Model) -> Vec<Datum> {
    let mut data = Vec::with_capacity(graph.triples.len());
    let mut pushed: IndexSet<&str> = IndexSet::new();
    for triple in &graph.triples {
        let mut placed = triple.clone();
        let mut push = false;
        let mut pops = 0;
        let mut epis = Vec::new();
        for epi in graph.epidata.get(triple).into_iter().flatten() {
            match epi {
                | Epidatum::Push(var) => {
                    if pushed.contains(var.as_str()) {
                        warn!("ignoring secondary node contexts for '{var}'");
                        continue;
                    }
                    if !triple.touches(var) || triple.role == CONCEPT_ROLE {
                        warn!("node context '{var}' invalid for triple: {triple}");
                        continue;
                    }
                    if var == &triple.source {
                        match model.invert(triple) {
                            | Ok(inverted) => placed = inverted,
                            | Err(err) => {
                                warn!("node context '{var}' ignored: {err}");
                                continue;
                            }
                        }
                    }
                    pushed.insert(var);
                    push = true;
                }
                | Epidatum::Pop => pops += 1,
                | epi => epis.push(epi.clone()),
            }
        }
        data.push(Datum::Triple { triple: placed, push, epis });
        data.extend((0..pops).map(|_| Datum::Pop));
    }
    data
}

/// The configuration state: the reversed work list, the nodes built so far,
/// and for each variable either its node or the node that first referenced
/// it.
struct Configurator<'m> {
    model: &'m Model,
    data: Vec<Datum>,
    drafts: ArenaDense<DraftId, Draft>,
    nodemap: IndexMap<Variable, Option<DraftId>>,
}

struct Frame {
    id: DraftId,
    surprising: bool,
}

impl Configurator<'_> {
    /// Fills in the node `id` and, depth first, every node pushed from it.
    /// Returns whether some triple did not fit where the markers put it.
    fn configure_node(&mut self, id: DraftId) -> bool {
        let mut stack = vec![Frame { id, surprising: false }];
        while let Some(frame) = stack.last_mut() {
            match self.place_next(frame.id) {
                | Placed::Edge { surprising } => frame.surprising |= surprising,
                | Placed::Child(child) => stack.push(Frame { id: child, surprising: false }),
                | Placed::End { surprising } => {
                    let surprising = frame.surprising || surprising;
                    stack.pop();
                    match stack.last_mut() {
                        | Some(parent) => parent.surprising &= surprising,
                        | None => return surprising,
                    }
                }
            }
        }
        false
    }

    fn place_next(&mut self, id: DraftId) -> Placed {
        let Some(Datum::Triple { triple, mut push, epis }) = self.data.pop() else {
            return Placed::End { surprising: false };
        };
        let var = &self.drafts[&id].var;
        let mut surprising = false;
        let (role, target) = if &triple.source == var {
            (triple.role, triple.target)
        } else if triple.target.as_ref() == Some(var) && triple.role != CONCEPT_ROLE {
            push = false;
            surprising = true;
            (self.model.invert_role(&triple.role), Some(triple.source))
        } else {
            self.data.push(Datum::Triple { triple, push, epis });
            return Placed::End { surprising: true };
        };

        let (role, index) = match role == CONCEPT_ROLE {
            | true if target.as_deref().is_none_or(str::is_empty) => {
                // `(a)` rather than `(a /)`
                return Placed::Edge { surprising };
            }
            | true => (CONCEPT_SLASH.to_string(), 0),
            | false => (role, self.drafts[&id].edges.len()),
        };
        let (target, placed) = match (push, target) {
            | (true, Some(var)) => {
                let child = self.drafts.alloc(Draft { var: var.clone(), edges: Vec::new() });
                self.nodemap.insert(var, Some(child));
                (Slot::Node(child), Placed::Child(child))
            }
            | (_, target) => {
                // the first node to mention a variable is where it may be nested later;
                // a concept is never a place to nest one
                let site = target.as_ref().filter(|_| role != CONCEPT_SLASH);
                if let Some(site) = site.and_then(|var| self.nodemap.get_mut(var)) {
                    if site.is_none() {
                        *site = Some(id);
                    }
                }
                (Slot::Atom(target), Placed::Edge { surprising })
            }
        };
        self.drafts[&id].edges.insert(index, Edge { role, target, epis });
        placed
    }

    /// Pops at the end of the work list close nothing.
    fn trim_pops(&mut self) {
        while matches!(self.data.last(), Some(Datum::Pop)) {
            self.data.pop();
        }
    }

    /// Finds, from the end of the work list, the first triple with an
    /// endpoint that has a node or can get one. The entries after it are
    /// removed and returned.
    fn find_next(&mut self) -> (Vec<Datum>, Option<DraftId>) {
        let mut found = None;
        let mut pivot = self.data.len().min(1);
        for (i, datum) in self.data.iter().enumerate().rev() {
            let Datum::Triple { triple, .. } = datum else { continue };
            let source = Some(triple.source.as_str());
            found = [source, triple.target_str()]
                .into_iter()
                .flatten()
                .find(|var| matches!(self.nodemap.get(*var), Some(Some(_))))
                .map(str::to_string);
            if found.is_some() {
                pivot = i + 1;
                break;
            }
        }
        let unplaced = self.data.split_off(pivot);
        (unplaced, found.and_then(|var| self.establish(&var)))
    }

    /// The node of `var`, splicing a new one into the node that first
    /// referenced `var` if it has none yet.
    fn establish(&mut self, var: &str) -> Option<DraftId> {
        let site = (*self.nodemap.get(var)?)?;
        if self.drafts[&site].var == var {
            return Some(site);
        }
        let node = self.drafts.alloc(Draft { var: var.to_string(), edges: Vec::new() });
        self.nodemap.insert(var.to_string(), Some(node));
        let edge = self.drafts[&site].edges.iter_mut().find(|edge| {
            edge.role != CONCEPT_SLASH && matches!(&edge.target, Slot::Atom(Some(t)) if t == var)
        });
        if let Some(edge) = edge {
            edge.target = Slot::Node(node);
        }
        Some(node)
    }

    /// Builds the tree under `root`, rendering leftover alignments onto the
    /// roles and atoms they belong to. A node always has a higher id than
    /// the node it is nested in, so building newest first sees every child
    /// before its parent.
    fn assemble(self, root: DraftId) -> Node {
        let mut built: IndexMap<DraftId, Node> = IndexMap::new();
        for (id, Draft { var, edges }) in self.drafts.drain_rev() {
            let branches = edges
                .into_iter()
                .map(|Edge { mut role, target, epis }| {
                    let mut target = match target {
                        | Slot::Atom(atom) => Target::Atom(atom),
                        | Slot::Node(child) => Target::Node(built.swap_remove(&child).unwrap_or_default()),
                    };
                    for epi in epis {
                        match (epi.mode(), &mut target) {
                            | (Mode::Role, _) => role.push_str(&epi.to_string()),
                            | (Mode::Target, Target::Atom(Some(atom))) => atom.push_str(&epi.to_string()),
                            | _ => warn!("epigraphical marker ignored: {epi}"),
                        }
                    }
                    Branch { role, target }
                })
                .collect();
            built.insert(id, Node { var: Some(var), branches });
        }
        built.swap_remove(&root).unwrap_or_default()
    }
}
