//! Live outstanding-tasks summary
//!
//! Watches the workspace's store files and re-renders the pending
//! summary whenever they change, until interrupted.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;

use super::app::ops_for;
use super::output::Output;
use super::query;
use crate::storage::Workspace;

/// Debounce window for bursts of file changes
const DEBOUNCE: Duration = Duration::from_millis(500);

pub fn run(output: &Output, workspace: &Workspace) -> Result<()> {
    let limit = workspace.config().pending_limit;

    // Initial render before the first change arrives
    render(output, workspace, limit)?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx).context("Failed to start file watcher")?;

    debouncer
        .watcher()
        .watch(workspace.root(), RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", workspace.root().display()))?;

    output.verbose_ctx(
        "watch",
        &format!("Watching {}", workspace.root().display()),
    );

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    e.path
                        .file_name()
                        .is_some_and(|name| name == "items.jsonl" || name == "lists.json")
                });
                if !relevant {
                    continue;
                }

                if !output.is_json() {
                    println!();
                }
                render(output, workspace, limit)?;
            }
            Ok(Err(error)) => {
                output.verbose_ctx("watch", &format!("Watch error: {:?}", error));
            }
            Err(_) => break,
        }
    }

    Ok(())
}

fn render(output: &Output, workspace: &Workspace, limit: usize) -> Result<()> {
    let ops = ops_for(workspace, output);
    query::render_pending(output, &ops, limit)
}
