//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Parse, validate, and render hierarchical question trees from delimited question sheets
#[derive(Parser, Debug)]
#[command(name = "questree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (can be repeated: -d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Column delimiter (must differ from ',', the enum sub-delimiter)
    #[arg(long, global = true, default_value_t = ';', env = "QUESTREE_DELIMITER")]
    pub delimiter: char,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a question sheet and list every problem found
    Validate {
        /// Question sheet file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Render the question tree
    Tree {
        /// Question sheet file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Build even when validation fails (orphans become roots)
        #[arg(long)]
        force: bool,
    },

    /// Print the question forest as JSON
    Json {
        /// Question sheet file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show sheet statistics
    Info {
        /// Question sheet file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
