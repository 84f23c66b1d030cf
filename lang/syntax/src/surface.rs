//! Surface alignments: token indices attached to roles and targets, written
//! `~e.1,2` after the aligned text.

use crate::*;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static ALIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^~?([a-zA-Z]\.?)?([0-9]+(?:,[0-9]+)*)$").expect("valid alignment pattern")
});

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub indices: Vec<usize>,
    /// The tag before the indices, including its trailing `.` if written.
    pub prefix: Option<String>,
}

impl Alignment {
    pub fn new(indices: Vec<usize>, prefix: Option<String>) -> Self {
        Alignment { indices, prefix }
    }
}

impl FromStr for Alignment {
    type Err = SurfaceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurfaceError::InvalidAlignment(s.to_string());
        let caps = ALIGNMENT_RE.captures(s).ok_or_else(invalid)?;
        let prefix = caps.get(1).map(|m| m.as_str().to_string());
        let indices = caps[2]
            .split(',')
            .map(|idx| idx.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Alignment { indices, prefix })
    }
}

fn collect(
    graph: &Graph, pick: impl Fn(&Epidatum) -> Option<&Alignment>,
) -> IndexMap<Triple, Alignment> {
    let mut alns = IndexMap::new();
    for triple in &graph.triples {
        let Some(epis) = graph.epidata.get(triple) else { continue };
        // the last marker on a triple wins
        if let Some(aln) = epis.iter().filter_map(&pick).last() {
            alns.insert(triple.clone(), aln.clone());
        }
    }
    alns
}

/// Target alignments of the graph, by triple.
pub fn alignments(graph: &Graph) -> IndexMap<Triple, Alignment> {
    collect(graph, |epi| match epi {
        | Epidatum::Alignment(aln) => Some(aln),
        | _ => None,
    })
}

/// Role alignments of the graph, by triple.
pub fn role_alignments(graph: &Graph) -> IndexMap<Triple, Alignment> {
    collect(graph, |epi| match epi {
        | Epidatum::RoleAlignment(aln) => Some(aln),
        | _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_alignment() {
        let aln: Alignment = "~e.1,2".parse().unwrap();
        assert_eq!(aln, Alignment::new(vec![1, 2], Some("e.".into())));
        assert_eq!(aln.to_string(), "~e.1,2");
        let aln: Alignment = "3".parse().unwrap();
        assert_eq!(aln.to_string(), "~3");
        let aln: Alignment = "~x4".parse().unwrap();
        assert_eq!(aln.prefix.as_deref(), Some("x"));
    }

    #[test]
    fn reject_alignment() {
        assert!("~e.".parse::<Alignment>().is_err());
        assert!("~1,".parse::<Alignment>().is_err());
        assert!("~ab.1".parse::<Alignment>().is_err());
    }

    #[test]
    fn collect_by_triple() {
        let t = Triple::new("a", ":ARG0", "b");
        let mut graph = Graph::new(vec![t.clone()]);
        graph.epidata.insert(
            t.clone(),
            vec![
                Epidatum::RoleAlignment(Alignment::new(vec![1], None)),
                Epidatum::Alignment(Alignment::new(vec![2], None)),
                Epidatum::Alignment(Alignment::new(vec![3], None)),
            ],
        );
        assert_eq!(alignments(&graph)[&t].indices, vec![3]);
        assert_eq!(role_alignments(&graph)[&t].indices, vec![1]);
    }
}
