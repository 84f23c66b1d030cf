use crate::{config::*, err::*};
use indexmap::{IndexMap, IndexSet};
use penman_syntax::*;
use rand::Rng;
use regex::Regex;

/// How roles are checked for inversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Inversion {
    /// A role is inverted if it is not declared and ends in `-of`.
    Suffix,
    /// No role is ever inverted.
    Never,
}

/// The concept and argument roles a role reifies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reified {
    pub concept: String,
    pub source: Role,
    pub target: Role,
}

/// The role an argument-role pair of a concept dereifies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dereified {
    pub role: Role,
    pub source: Role,
    pub target: Role,
}

/// Rules for canonicalizing, inverting and (de)reifying roles.
///
/// Built once and shared; every operation reads it only.
#[derive(Clone, Debug)]
pub struct Model {
    pub top_variable: Variable,
    pub top_role: Role,
    /// Declared role names and patterns, full-matched as one regex.
    roles: Option<Regex>,
    pub normalizations: IndexMap<Role, Role>,
    pub reifications: IndexMap<Role, Vec<Reified>>,
    pub dereifications: IndexMap<String, Vec<Dereified>>,
    inversion: Inversion,
}

impl Default for Model {
    fn default() -> Self {
        let config = ModelConfig::default();
        Model {
            top_variable: config.top_variable,
            top_role: config.top_role,
            roles: None,
            normalizations: IndexMap::new(),
            reifications: IndexMap::new(),
            dereifications: IndexMap::new(),
            inversion: Inversion::Suffix,
        }
    }
}

impl Model {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let ModelConfig { top_variable, top_role, roles, normalizations, reifications } = config;
        let roles = match roles.is_empty() {
            | true => None,
            | false => Some(Regex::new(&format!("^(?:{})$", roles.join("|")))?),
        };
        let mut model = Model {
            top_variable,
            top_role,
            roles,
            normalizations,
            inversion: Inversion::Suffix,
            ..Model::default()
        };
        for Reification { role, concept, source, target } in reifications {
            model.reifications.entry(role.clone()).or_default().push(Reified {
                concept: concept.clone(),
                source: source.clone(),
                target: target.clone(),
            });
            model.dereifications.entry(concept).or_default().push(Dereified { role, source, target });
        }
        Ok(model)
    }

    /// The model of Abstract Meaning Representation.
    pub fn amr() -> Result<Self> {
        Self::new(ModelConfig::from_toml(include_str!("../models/amr.toml"))?)
    }

    /// A model that never treats a role as inverted, so graphs keep the
    /// direction their edges were written in.
    pub fn noop() -> Self {
        Model { inversion: Inversion::Never, ..Model::default() }
    }

    /* ---------------------------------- Roles --------------------------------- */

    fn declares(&self, role: &str) -> bool {
        role == CONCEPT_ROLE
            || role == self.top_role
            || self.roles.as_ref().is_some_and(|re| re.is_match(role))
    }

    /// Whether `role`, or `role` without one `-of`, is declared.
    pub fn has_role(&self, role: &str) -> bool {
        self.declares(role) || role.strip_suffix("-of").is_some_and(|base| self.declares(base))
    }

    pub fn is_role_inverted(&self, role: &str) -> bool {
        match self.inversion {
            | Inversion::Suffix => !self.declares(role) && role.ends_with("-of"),
            | Inversion::Never => false,
        }
    }

    /// Toggles a trailing `-of`.
    pub fn invert_role(&self, role: &str) -> Role {
        match role.strip_suffix("-of") {
            | Some(base) => base.to_string(),
            | None => format!("{role}-of"),
        }
    }

    /// The triple read from its target: endpoints swapped, role toggled.
    pub fn invert(&self, triple: &Triple) -> Result<Triple> {
        let Some(target) = &triple.target else {
            return Err(ModelError::NotInvertible(triple.clone()));
        };
        Ok(Triple {
            source: target.clone(),
            role: self.invert_role(&triple.role),
            target: Some(triple.source.clone()),
        })
    }

    /// Inverts the triple only if its role is inverted.
    pub fn deinvert(&self, triple: &Triple) -> Result<Triple> {
        match self.is_role_inverted(&triple.role) {
            | true => self.invert(triple),
            | false => Ok(triple.clone()),
        }
    }

    /// The preferred spelling of `role`.
    ///
    /// Adds the leading `:`, collapses doubled `-of-of` suffixes of undeclared
    /// roles, then applies the normalizations.
    pub fn canonicalize_role(&self, role: &str) -> Role {
        let mut role = match role == CONCEPT_SLASH || role.starts_with(':') {
            | true => role.to_string(),
            | false => format!(":{role}"),
        };
        if !self.declares(&role) {
            loop {
                let twice = self.invert_role(&self.invert_role(&role));
                if twice == role {
                    break;
                }
                role = twice;
            }
        }
        match self.normalizations.get(&role) {
            | Some(normal) => normal.clone(),
            | None => role,
        }
    }

    pub fn canonicalize(&self, triple: &Triple) -> Triple {
        Triple { role: self.canonicalize_role(&triple.role), ..triple.clone() }
    }

    /* ------------------------------- Reification ------------------------------ */

    pub fn is_role_reifiable(&self, role: &str) -> bool {
        self.reifications.contains_key(role)
    }

    /// Expands an edge into `(v, source-role, source)`, `(v, :instance,
    /// concept)` and `(v, target-role, target)` for a fresh `v` not in
    /// `taken`.
    pub fn reify(&self, triple: &Triple, taken: &IndexSet<Variable>) -> Result<[Triple; 3]> {
        let Some(Reified { concept, source, target }) =
            self.reifications.get(&triple.role).and_then(|all| all.first())
        else {
            return Err(ModelError::NotReifiable(triple.role.clone()));
        };
        let var = fresh_variable(taken, &mut 2);
        Ok([
            Triple::new(var.clone(), source.clone(), triple.source.clone()),
            Triple::new(var.clone(), CONCEPT_ROLE, concept.clone()),
            Triple { source: var, role: target.clone(), target: triple.target.clone() },
        ])
    }

    pub fn is_concept_dereifiable(&self, concept: &str) -> bool {
        self.dereifications.contains_key(concept)
    }

    /// Collapses a reified node back into one edge; the argument triples may
    /// come in either order.
    pub fn dereify(&self, instance: &Triple, a: &Triple, b: &Triple) -> Result<Triple> {
        let invalid = |why: &str| Err(ModelError::InvalidDereification(why.to_string()));
        if instance.role != CONCEPT_ROLE {
            return invalid("the first triple is not an instance triple");
        }
        if a.source != instance.source || b.source != instance.source {
            return invalid("the triples do not share a source");
        }
        let concept = instance.target.clone().unwrap_or_default();
        let Some(roles) = self.dereifications.get(&concept) else {
            return Err(ModelError::NotDereifiable(concept));
        };
        for Dereified { role, source, target } in roles {
            let (from, to) = if &a.role == source && &b.role == target {
                (a, b)
            } else if &b.role == source && &a.role == target {
                (b, a)
            } else {
                continue;
            };
            let Some(from) = &from.target else { return invalid("the source argument is missing") };
            return Ok(Triple { source: from.clone(), role: role.clone(), target: to.target.clone() });
        }
        invalid(&format!("{} and {} do not match a reification of '{concept}'", a.role, b.role))
    }

    /* --------------------------------- Ordering -------------------------------- */

    /// A key for sorting branches or triples by role.
    pub fn role_key(&self, order: Order, role: &str) -> RoleKey {
        match order {
            | Order::Original => RoleKey::default(),
            | Order::Alphanumeric => RoleKey::alphanumeric(role),
            | Order::Canonical => {
                RoleKey { inverted: self.is_role_inverted(role), ..RoleKey::alphanumeric(role) }
            }
            | Order::Random => RoleKey { shuffle: rand::rng().random(), ..RoleKey::default() },
        }
    }

    /* --------------------------------- Checking -------------------------------- */

    /// Structural problems of `graph`, keyed by the offending triple; problems
    /// of the graph as a whole are keyed by `None`.
    pub fn errors(&self, graph: &Graph) -> IndexMap<Option<Triple>, Vec<String>> {
        let mut errors: IndexMap<Option<Triple>, Vec<String>> = IndexMap::new();
        let mut report = |triple: Option<&Triple>, message: &str| {
            errors.entry(triple.cloned()).or_default().push(message.to_string())
        };
        if graph.triples.is_empty() {
            report(None, "graph is empty");
            return errors;
        }

        let mut by_source: IndexMap<&str, Vec<&Triple>> = IndexMap::new();
        for triple in &graph.triples {
            if !self.has_role(&triple.role) {
                report(Some(triple), "invalid role");
            }
            by_source.entry(triple.source.as_str()).or_default().push(triple);
        }
        let Some(top) = graph.top() else {
            report(None, "top is not set");
            return errors;
        };
        if !by_source.contains_key(top) {
            report(None, "top is not a variable in the graph");
            return errors;
        }

        // undirected reachability over variable-to-variable edges
        let mut adjacent: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for triple in &graph.triples {
            if let Some(target) = triple.target_str().filter(|t| by_source.contains_key(t)) {
                adjacent.entry(triple.source.as_str()).or_default().push(target);
                adjacent.entry(target).or_default().push(triple.source.as_str());
            }
        }
        let mut reached: IndexSet<&str> = IndexSet::new();
        let mut agenda = vec![top];
        while let Some(var) = agenda.pop() {
            if reached.insert(var) {
                agenda.extend(adjacent.get(var).into_iter().flatten().copied());
            }
        }
        let mut unreached: Vec<_> = by_source.iter().filter(|(var, _)| !reached.contains(*var)).collect();
        unreached.sort_by_key(|(var, _)| **var);
        for triple in unreached.into_iter().flat_map(|(_, triples)| triples) {
            report(Some(*triple), "unreachable");
        }
        errors
    }
}

/// `_`, then `_2`, `_3`, ... until one is not taken; `next` holds the next
/// number to try.
pub fn fresh_variable(taken: &IndexSet<Variable>, next: &mut usize) -> Variable {
    let mut var = "_".to_string();
    while taken.contains(&var) {
        var = format!("_{next}");
        *next += 1;
    }
    var
}

/* ---------------------------------- Order ---------------------------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Keep the order as given.
    #[default]
    Original,
    /// By role name, then by any trailing number.
    Alphanumeric,
    /// Non-inverted roles first, then alphanumerically.
    Canonical,
    Random,
}

/// Compares roles field by field, so unused fields stay at their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoleKey {
    pub inverted: bool,
    pub name: String,
    pub number: u64,
    pub shuffle: u64,
}

impl RoleKey {
    /// `:op12` is `(":op", 12)`; a role without a trailing number keeps
    /// its full name with number 0.
    fn alphanumeric(role: &str) -> Self {
        let name = role.trim_end_matches(|c: char| c.is_ascii_digit());
        match (name.is_empty() || name.len() == role.len(), role[name.len()..].parse::<u64>()) {
            | (false, Ok(number)) => RoleKey { name: name.to_string(), number, ..RoleKey::default() },
            | _ => RoleKey { name: role.to_string(), ..RoleKey::default() },
        }
    }
}
