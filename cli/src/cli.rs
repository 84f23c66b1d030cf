use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Read, check and rewrite graphs in PENMAN notation
#[derive(Parser)]
#[command(name = "penman", version, about, long_about = None)]
pub struct Cli {
    /// Files of PENMAN graphs; standard input if none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
    /// Role model to use, as a TOML file
    #[arg(long, value_name = "FILE", conflicts_with = "amr")]
    pub model: Option<PathBuf>,
    /// Use the AMR role model
    #[arg(long, default_value_t = false)]
    pub amr: bool,
    /// Report structural errors of each graph
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /* --------------------------------- Output --------------------------------- */
    /// Indent branches this many columns; -1 for a single line, 0 to align
    /// them under the first branch
    #[arg(long, allow_negative_numbers = true, value_name = "N")]
    pub indent: Option<i32>,
    /// Keep leading attributes on the line of their node
    #[arg(long, default_value_t = false)]
    pub compact: bool,
    /// Print graphs as conjunctions of triples
    #[arg(long, default_value_t = false)]
    pub triples: bool,

    /* ------------------------------- Tree passes ------------------------------ */
    /// Rename variables from a template such as "{prefix}{j}"
    #[arg(long, value_name = "FMT")]
    pub make_variables: Option<String>,
    /// Sort the branches of each node
    #[arg(long, value_name = "ORDER")]
    pub rearrange: Option<RoleOrder>,
    /// With --rearrange, put attributes before edges
    #[arg(long, default_value_t = false, requires = "rearrange")]
    pub attributes_first: bool,
    /// Spell every role the way the model prefers
    #[arg(long, default_value_t = false)]
    pub canonicalize_roles: bool,

    /* ------------------------------ Graph passes ------------------------------ */
    /// Lay the graph out afresh, sorting triples by role
    #[arg(long, value_name = "ORDER")]
    pub reconfigure: Option<RoleOrder>,
    /// Replace edges with nodes of their reified concepts
    #[arg(long, default_value_t = false)]
    pub reify_edges: bool,
    /// Collapse nodes of reified concepts back into edges
    #[arg(long, default_value_t = false)]
    pub dereify_edges: bool,
    /// Turn attributes into edges to new nodes
    #[arg(long, default_value_t = false)]
    pub reify_attributes: bool,
    /// Mark each nesting with a top-role triple
    #[arg(long, default_value_t = false)]
    pub indicate_branches: bool,

    /// More logging; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RoleOrder {
    Original,
    Alphanumeric,
    Canonical,
    Random,
}
