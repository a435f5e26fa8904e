//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{list_cmd, query, task_cmd, watch};
use crate::ops::Ops;
use crate::storage::Workspace;

#[derive(Parser)]
#[command(name = "daily")]
#[command(author, version, about = "Local-first personal checklists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "DAILY_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage task lists
    #[command(subcommand)]
    List(list_cmd::ListCommands),

    /// Manage tasks within a list
    #[command(subcommand)]
    Task(task_cmd::TaskCommands),

    /// Render a list with its items
    Show {
        /// List name or ID
        list: String,
    },

    /// Print a list as share-ready text
    Share {
        /// List name or ID
        list: String,
    },

    /// Show outstanding tasks across all lists
    Pending {
        /// Maximum entries to show (defaults from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show an overview of every list
    Status,

    /// Search tasks by text
    Search {
        /// Search query
        query: String,
    },

    /// Re-render the outstanding summary whenever the data changes
    Watch,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Daily CLI starting");

    let workspace = Workspace::open_default(cli.dir.as_deref())?;
    output.verbose_ctx(
        "workspace",
        &format!("Using workspace: {}", workspace.root().display()),
    );

    match cli.command {
        Commands::List(cmd) => list_cmd::run(cmd, &output, &workspace)?,
        Commands::Task(cmd) => task_cmd::run(cmd, &output, &workspace)?,

        Commands::Show { list } => query::show(&output, &workspace, &list)?,
        Commands::Share { list } => query::share(&output, &workspace, &list)?,
        Commands::Pending { limit } => query::pending(&output, &workspace, limit)?,
        Commands::Status => query::status(&output, &workspace)?,
        Commands::Search { query } => query::search(&output, &workspace, &query)?,

        Commands::Watch => watch::run(&output, &workspace)?,
    }

    Ok(())
}

/// Builds the operations facade, wiring change events into verbose output
pub(crate) fn ops_for<'a>(workspace: &'a Workspace, output: &Output) -> Ops<'a> {
    let ops = Ops::new(workspace);
    if output.is_verbose() {
        ops.observe(|change| eprintln!("[verbose:change] {}", change));
    }
    ops
}
