//! Command-line interface for ipforest
//!
//! Uses clap with derive for type-safe CLI parsing

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ipforest::Address;
use std::path::PathBuf;

/// ipforest - inspect and reshape forests of IPv4 address trees
#[derive(Parser)]
#[command(name = "ipforest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Manifest file(s); later files override earlier ones
    #[arg(short, long = "config", global = true)]
    pub configs: Vec<PathBuf>,

    /// Tree(s) in bracket notation, merged in order; replaces --config
    #[arg(short, long = "notation", global = true)]
    pub notations: Vec<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the forest and report what was merged and skipped
    Check,

    /// List every member address
    List,

    /// Print bracket notation (every tree when no root is given)
    Show {
        /// Address to hang the tree from
        root: Option<Address>,
    },

    /// Print the height of the tree hung from ROOT
    Height {
        /// Root address
        root: Address,
    },

    /// Print the members of each level below ROOT
    Levels {
        /// Root address
        root: Address,
    },

    /// Print the route between two addresses
    Route {
        /// Start address
        from: Address,

        /// End address
        to: Address,
    },

    /// Check whether an address is a member
    Contains {
        /// Address to look up
        address: Address,
    },

    /// Link two members and print the result
    Connect {
        /// First address
        a: Address,

        /// Second address
        b: Address,
    },

    /// Remove the link between two members and print the result
    Disconnect {
        /// First address
        a: Address,

        /// Second address
        b: Address,
    },

    /// Merge another tree into the forest and print the result
    Merge {
        /// Tree in bracket notation
        notation: String,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Generate shell completion scripts
    pub fn generate_completion(shell: Shell) {
        let mut cmd = Self::command();
        clap_complete::generate(shell, &mut cmd, "ipforest", &mut std::io::stdout());
    }
}
