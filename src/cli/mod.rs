//! Command-line front end.
//!
//! Parsing lives here; [`commands`] turns a parsed command into store calls
//! and writes the result to any `io::Write`, which keeps it testable
//! without spawning the binary.

mod commands;

pub use commands::{execute, run};

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::BackendKind;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Keep a searchable catalogue of books")]
pub struct Cli {
    /// Config file (default: <config_dir>/bookshelf/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Local,
    Remote,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => BackendKind::Local,
            BackendArg::Remote => BackendKind::Remote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List books one page at a time
    List {
        /// Case-insensitive substring to match
        #[arg(long, short, default_value = "")]
        search: String,
        /// 1-based page number, clamped to the pages that exist
        #[arg(long, short, default_value_t = 1)]
        page: usize,
        /// Match author and year as well as title
        #[arg(long)]
        all_fields: bool,
    },
    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
    },
    /// Change fields of an existing book
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,
    },
    /// Delete a book
    Remove { id: String },
    /// Print one book
    Show { id: String },
    /// Print the whole catalogue as JSON
    Export,
}
