//! The surface tree: nodes and branches nested exactly as the text nests them.

use crate::*;
use derive_more::From;
use indexmap::{IndexMap, IndexSet};

/// Ordered `key → value` pairs read from `# ::key value` comments.
pub type Metadata = IndexMap<String, String>;

/// A parenthesized node; `var` is absent only for malformed input like `()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub var: Option<Variable>,
    pub branches: Vec<Branch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub role: Role,
    pub target: Target,
}

/// What a branch points at. An atom naming a variable defined elsewhere in
/// the tree is a reentrancy.
#[derive(From, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Atom(Option<String>),
    Node(Node),
}

/// A node together with its metadata.
///
/// Equality compares the nodes only.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    pub node: Node,
    pub metadata: Metadata,
}

/* ---------------------------------- Node ---------------------------------- */

impl Node {
    pub fn new(var: impl Into<Variable>) -> Self {
        Node { var: Some(var.into()), branches: Vec::new() }
    }
    pub fn with_branch(mut self, role: impl Into<Role>, target: impl Into<Target>) -> Self {
        self.branches.push(Branch { role: role.into(), target: target.into() });
        self
    }
    /// The target of the first `/` branch.
    pub fn concept(&self) -> Option<&str> {
        self.branches.iter().find_map(|branch| match &branch.target {
            | Target::Atom(concept) if branch.role == CONCEPT_SLASH => concept.as_deref(),
            | _ => None,
        })
    }
}

impl Target {
    pub fn is_atomic(&self) -> bool {
        matches!(self, Target::Atom(_))
    }
    pub fn atom(&self) -> Option<&str> {
        match self {
            | Target::Atom(atom) => atom.as_deref(),
            | Target::Node(_) => None,
        }
    }
}

impl From<&str> for Target {
    fn from(atom: &str) -> Self {
        Target::Atom(Some(atom.to_string()))
    }
}
impl From<String> for Target {
    fn from(atom: String) -> Self {
        Target::Atom(Some(atom))
    }
}

/* ---------------------------------- Tree ---------------------------------- */

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}
impl Eq for Tree {}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Tree { node, metadata: Metadata::new() }
    }
}

impl Tree {
    pub fn new(node: Node, metadata: Metadata) -> Self {
        Tree { node, metadata }
    }

    /// Every node of the tree in pre-order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        let mut stack = vec![&self.node];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            for branch in node.branches.iter().rev() {
                if let Target::Node(child) = &branch.target {
                    stack.push(child);
                }
            }
        }
        nodes
    }

    /// The variables of all nodes, in pre-order.
    pub fn variables(&self) -> IndexSet<&str> {
        self.nodes().into_iter().filter_map(|node| node.var.as_deref()).collect()
    }

    /// Depth-first `(path, branch)` pairs; a path lists the branch indices
    /// leading from the root to the branch.
    pub fn walk(&self) -> Vec<(Vec<usize>, &Branch)> {
        fn push_children<'a>(
            stack: &mut Vec<(Vec<usize>, &'a Branch)>, path: &[usize], node: &'a Node,
        ) {
            for (i, branch) in node.branches.iter().enumerate().rev() {
                let mut path = path.to_vec();
                path.push(i);
                stack.push((path, branch));
            }
        }
        let mut walked = Vec::new();
        let mut stack = Vec::new();
        push_children(&mut stack, &[], &self.node);
        while let Some((path, branch)) = stack.pop() {
            if let Target::Node(child) = &branch.target {
                push_children(&mut stack, &path, child);
            }
            walked.push((path, branch));
        }
        walked
    }

    /// Renames every node from `fmt` and rewrites every reference to it.
    ///
    /// `fmt` may use `{prefix}` (the lowercased first letter of the concept,
    /// or `_`), `{i}` (a 0-based attempt count) and `{j}` (empty on the first
    /// attempt, then `2`, `3`, ...). The default is `{prefix}{j}`.
    pub fn reset_variables(&mut self, fmt: &str) {
        let mut varmap: IndexMap<String, String> = IndexMap::new();
        let mut used: IndexSet<String> = IndexSet::new();
        let mut fresh = |concept: Option<&str>| {
            let prefix = match concept.and_then(|c| c.trim_start_matches('"').chars().next()) {
                | Some(c) if c.is_alphabetic() => c.to_lowercase().to_string(),
                | _ => "_".to_string(),
            };
            let mut i = 0;
            loop {
                let j = if i == 0 { String::new() } else { (i + 1).to_string() };
                let var = fmt
                    .replace("{prefix}", &prefix)
                    .replace("{i}", &i.to_string())
                    .replace("{j}", &j);
                i += 1;
                if !used.contains(&var) {
                    used.insert(var.clone());
                    break var;
                }
            }
        };

        // assign, then substitute: a node may be referenced before it appears
        let mut anonymous = Vec::new();
        for node in self.nodes() {
            match &node.var {
                | Some(var) if varmap.contains_key(var) => {}
                | Some(var) => {
                    let new = fresh(node.concept());
                    varmap.insert(var.clone(), new);
                }
                | None => anonymous.push(fresh(node.concept())),
            }
        }

        let mut anonymous = anonymous.into_iter();
        let mut stack = vec![&mut self.node];
        while let Some(node) = stack.pop() {
            node.var = match node.var.take() {
                | Some(var) => varmap.get(&var).cloned().or(Some(var)),
                | None => anonymous.next(),
            };
            for branch in node.branches.iter_mut().rev() {
                match &mut branch.target {
                    | Target::Node(child) => stack.push(child),
                    | Target::Atom(Some(atom)) if branch.role != CONCEPT_SLASH => {
                        if let Some(new) = varmap.get(atom.as_str()) {
                            *atom = new.clone();
                        }
                    }
                    | Target::Atom(_) => {}
                }
            }
        }
    }
}
