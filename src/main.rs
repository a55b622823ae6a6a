//! ipforest - IPv4 address forest tool
//!
//! Builds a forest from bracket notation or a TOML manifest, then answers
//! rooted queries or applies a single change and prints the result.

mod cli;

use cli::{Cli, Commands};
use ipforest::error::Result;
use ipforest::manifest::{self, Assembly, ForestManifest, TreeDef};
use ipforest::{logging, Address, Forest, Outcome};
use serde_json::json;
use std::path::Path;

/// Manifest read when neither --config nor --notation is given
const DEFAULT_MANIFEST: &str = "forest.toml";

/// Exit status for a refused change
const EXIT_REJECTED: i32 = 2;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Commands that don't need a forest
    if let Commands::Completion { shell } = cli.command {
        Cli::generate_completion(shell);
        return Ok(());
    }

    let manifest = load_manifest(&cli)?;
    let filter = if cli.verbose {
        "debug"
    } else {
        manifest.config.log_filter()
    };
    logging::init_logging(filter)?;

    let Assembly {
        mut forest,
        skipped,
    } = manifest.assemble()?;

    match cli.command {
        Commands::Check => {
            let trees = forest.components().len();
            if cli.json {
                let skipped: Vec<_> = skipped
                    .iter()
                    .map(|s| json!({ "entry": s.entry, "reason": s.reason.to_string() }))
                    .collect();
                print_json(&json!({
                    "members": forest.len(),
                    "links": forest.edge_count(),
                    "trees": trees,
                    "edges": forest.edges(),
                    "skipped": skipped,
                }))?;
            } else {
                println!(
                    "{} addresses, {} links, {} tree(s)",
                    forest.len(),
                    forest.edge_count(),
                    trees
                );
                for s in &skipped {
                    println!("skipped {}: {}", s.entry, s.reason);
                }
            }
        }

        Commands::List => {
            let members = forest.list();
            if cli.json {
                print_json(&members)?;
            } else {
                for member in members {
                    println!("{}", member);
                }
            }
        }

        Commands::Show { root } => {
            let trees = shown_trees(&forest, root);
            if cli.json {
                print_json(&trees)?;
            } else {
                for tree in trees {
                    println!("{}", tree);
                }
            }
        }

        Commands::Height { root } => {
            let height = forest.height(&root);
            if cli.json {
                print_json(&json!({ "root": root, "height": height }))?;
            } else {
                println!("{}", height);
            }
        }

        Commands::Levels { root } => {
            let levels = forest.levels(&root);
            if cli.json {
                print_json(&levels)?;
            } else {
                for (depth, level) in levels.iter().enumerate() {
                    let names: Vec<String> = level.iter().map(|a| a.to_string()).collect();
                    println!("{}: {}", depth, names.join(" "));
                }
            }
        }

        Commands::Route { from, to } => {
            let route = forest.route(&from, &to);
            if cli.json {
                print_json(&route)?;
            } else if route.is_empty() {
                println!("No route from {} to {}", from, to);
            } else {
                let hops: Vec<String> = route.iter().map(|a| a.to_string()).collect();
                println!("{}", hops.join(" -> "));
            }
        }

        Commands::Contains { address } => {
            let found = forest.contains(&address);
            if cli.json {
                print_json(&json!({ "address": address, "member": found }))?;
            } else {
                println!("{}", found);
            }
        }

        Commands::Connect { a, b } => {
            let outcome = forest.connect(&a, &b);
            report(&forest, outcome, cli.json)?;
        }

        Commands::Disconnect { a, b } => {
            let outcome = forest.disconnect(&a, &b);
            report(&forest, outcome, cli.json)?;
        }

        Commands::Merge { notation } => {
            let other = Forest::parse(&notation)?;
            let outcome = forest.union(&other);
            report(&forest, outcome, cli.json)?;
        }

        Commands::Completion { .. } => unreachable!("handled before the forest is built"),
    }

    Ok(())
}

/// Pick the forest source: inline notation, manifest files, or the default manifest
fn load_manifest(cli: &Cli) -> Result<ForestManifest> {
    if !cli.notations.is_empty() {
        let manifest = ForestManifest {
            trees: cli
                .notations
                .iter()
                .enumerate()
                .map(|(i, notation)| TreeDef {
                    name: format!("notation-{}", i + 1),
                    notation: notation.clone(),
                })
                .collect(),
            ..Default::default()
        };
        manifest.validate()?;
        return Ok(manifest);
    }

    if cli.configs.is_empty() {
        manifest::load(Path::new(DEFAULT_MANIFEST))
    } else {
        manifest::load_merged(&cli.configs)
    }
}

/// Notation of every tree, each hung from its smallest member
fn tree_notations(forest: &Forest) -> Vec<String> {
    forest
        .components()
        .iter()
        .filter_map(|members| members.first())
        .map(|root| forest.to_notation(root))
        .collect()
}

/// Trees printed by `show`: the one hung from `root`, or all of them
///
/// An unknown root yields the empty notation, like every other query.
fn shown_trees(forest: &Forest, root: Option<Address>) -> Vec<String> {
    match root {
        Some(root) => vec![forest.to_notation(&root)],
        None => tree_notations(forest),
    }
}

/// Print a mutation outcome followed by the resulting forest
fn report(forest: &Forest, outcome: Outcome, as_json: bool) -> Result<()> {
    if as_json {
        print_json(&json!({
            "applied": outcome.is_ok(),
            "reason": outcome.as_ref().err().map(|r| r.to_string()),
            "trees": tree_notations(forest),
        }))?;
    } else {
        match &outcome {
            Ok(()) => println!("ok"),
            Err(reason) => println!("rejected: {}", reason),
        }
        for tree in tree_notations(forest) {
            println!("{}", tree);
        }
    }

    if outcome.is_err() {
        std::process::exit(EXIT_REJECTED);
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
