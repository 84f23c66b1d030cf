mod cli;

use clap::Parser;
use cli::{Cli, RoleOrder};
use colored::Colorize;
use log::{LevelFilter, debug};
use penman_driver::{File, Input, PenmanCodec, Result};
use penman_layout::{
    canonicalize_roles, configure, dereify_edges, indicate_branches, rearrange, reconfigure,
    reify_attributes, reify_edges,
};
use penman_model::{Model, ModelConfig, Order};
use penman_surface::Indent;
use penman_syntax::Graph;
use std::{io::Read, process::ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new().filter_level(level(&cli)).parse_default_env().init();
    match run(&cli) {
        | Ok(true) => ExitCode::SUCCESS,
        | Ok(false) => ExitCode::FAILURE,
        | Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn level(cli: &Cli) -> LevelFilter {
    match (cli.quiet, cli.verbose) {
        | (true, _) => LevelFilter::Error,
        | (false, 0) => LevelFilter::Warn,
        | (false, 1) => LevelFilter::Info,
        | (false, 2) => LevelFilter::Debug,
        | (false, _) => LevelFilter::Trace,
    }
}

/// Prints every graph of every input; false if a checked graph had errors.
fn run(cli: &Cli) -> Result<bool> {
    let codec = PenmanCodec::new(model(cli)?);
    let inputs: Vec<Input> = match cli.files.is_empty() {
        | true => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            vec![Input::from(text)]
        }
        | false => cli.files.iter().map(|path| File::new(path).into()).collect(),
    };

    let mut valid = true;
    let mut first = true;
    for input in inputs {
        let loaded = input.load()?;
        for graph in codec.iterdecode(&loaded.source, loaded.path.clone()) {
            let (text, ok) = process(cli, &codec, graph?)?;
            valid &= ok;
            if !first {
                println!();
            }
            first = false;
            println!("{text}");
        }
    }
    Ok(valid)
}

fn model(cli: &Cli) -> Result<Model> {
    let model = match (&cli.model, cli.amr) {
        | (Some(path), _) => Model::new(ModelConfig::load(path)?)?,
        | (None, true) => Model::amr()?,
        | (None, false) => Model::default(),
    };
    Ok(model)
}

fn indent(cli: &Cli) -> Indent {
    match cli.indent {
        | None | Some(0) => Indent::Adaptive,
        | Some(n) if n < 0 => Indent::Flat,
        | Some(n) => Indent::Columns(n.unsigned_abs() as usize),
    }
}

impl From<RoleOrder> for Order {
    fn from(order: RoleOrder) -> Self {
        match order {
            | RoleOrder::Original => Order::Original,
            | RoleOrder::Alphanumeric => Order::Alphanumeric,
            | RoleOrder::Canonical => Order::Canonical,
            | RoleOrder::Random => Order::Random,
        }
    }
}

/// Runs the requested passes over one graph and renders it, with any
/// structural errors as leading comments.
fn process(cli: &Cli, codec: &PenmanCodec, mut graph: Graph) -> Result<(String, bool)> {
    let model = &codec.model;
    if cli.reify_edges {
        graph = reify_edges(&graph, model)?;
    }
    if cli.dereify_edges {
        graph = dereify_edges(&graph, model)?;
    }
    if cli.reify_attributes {
        graph = reify_attributes(&graph)?;
    }
    if cli.indicate_branches {
        graph = indicate_branches(&graph, model)?;
    }

    let mut out = String::new();
    let mut ok = true;
    if cli.check {
        for (triple, messages) in model.errors(&graph) {
            ok = false;
            for message in messages {
                match &triple {
                    | Some(triple) => out.push_str(&format!("# ::error {triple}: {message}\n")),
                    | None => out.push_str(&format!("# ::error {message}\n")),
                }
            }
        }
    }

    let indent = indent(cli);
    if cli.triples {
        out.push_str(&codec.format_triples(&graph.triples, indent != Indent::Flat));
        return Ok((out, ok));
    }
    let mut tree = match cli.reconfigure {
        | Some(order) => reconfigure(&graph, None, model, order.into())?,
        | None => configure(&graph, None, model)?,
    };
    if cli.canonicalize_roles {
        tree = canonicalize_roles(&tree, model);
    }
    if let Some(fmt) = &cli.make_variables {
        tree.reset_variables(fmt);
    }
    if let Some(order) = cli.rearrange {
        rearrange(&mut tree, model, order.into(), cli.attributes_first);
    }
    debug!("rendering {} triples", graph.triples.len());
    out.push_str(&codec.format(&tree, indent, cli.compact));
    Ok((out, ok))
}
