//! Task CLI commands

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::app::ops_for;
use super::output::Output;
use crate::domain::{EditSession, Item, ItemId, TaskList};
use crate::ops::{EditOutcome, Ops};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a list
    ///
    /// Without text, the task is composed interactively: an empty entry
    /// is discarded instead of saved blank.
    Add {
        /// List name or ID
        list: String,

        /// Task text (reads from stdin when omitted)
        text: Vec<String>,
    },

    /// Edit a task's text
    ///
    /// Without text, the new text is read from stdin; submitting nothing
    /// deletes the task.
    Edit {
        /// Task ID
        id: String,

        /// New text (reads from stdin when omitted)
        text: Vec<String>,
    },

    /// Toggle a task's completion
    Done {
        /// Task ID
        id: String,
    },

    /// Toggle a task's priority flag
    Flag {
        /// Task ID
        id: String,
    },

    /// Move a task to the recently-deleted shelf
    Archive {
        /// Task ID
        id: String,
    },

    /// Recover an archived task
    Restore {
        /// Task ID
        id: String,
    },

    /// Recover every archived task in a list
    RestoreAll {
        /// List name or ID
        list: String,
    },

    /// Show a list's archived tasks
    Archived {
        /// List name or ID
        list: String,
    },

    /// Permanently delete a task
    Rm {
        /// Task ID
        id: String,
    },

    /// Delete every completed task in a list
    Clean {
        /// List name or ID
        list: String,
    },

    /// Clear the priority flag on every task in a list
    ResetFlags {
        /// List name or ID
        list: String,
    },

    /// Add one task per non-empty line from a file or stdin
    Import {
        /// List name or ID
        list: String,

        /// File to read (stdin when omitted)
        file: Option<PathBuf>,
    },
}

pub fn run(cmd: TaskCommands, output: &Output, workspace: &Workspace) -> Result<()> {
    match cmd {
        TaskCommands::Add { list, text } => add_task(output, workspace, &list, &text.join(" ")),
        TaskCommands::Edit { id, text } => edit_task(output, workspace, &id, &text.join(" ")),
        TaskCommands::Done { id } => toggle(output, workspace, &id, Toggle::Completed),
        TaskCommands::Flag { id } => toggle(output, workspace, &id, Toggle::Priority),
        TaskCommands::Archive { id } => archive_task(output, workspace, &id),
        TaskCommands::Restore { id } => restore_task(output, workspace, &id),
        TaskCommands::RestoreAll { list } => restore_all(output, workspace, &list),
        TaskCommands::Archived { list } => show_archived(output, workspace, &list),
        TaskCommands::Rm { id } => remove_task(output, workspace, &id),
        TaskCommands::Clean { list } => clean_list(output, workspace, &list),
        TaskCommands::ResetFlags { list } => reset_flags(output, workspace, &list),
        TaskCommands::Import { list, file } => import(output, workspace, &list, file.as_deref()),
    }
}

enum Toggle {
    Completed,
    Priority,
}

fn add_task(output: &Output, workspace: &Workspace, selector: &str, text: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let item = ops.add_item(&list.id, text)?;

    if !text.is_empty() {
        report_item(output, "Added", &item);
        return Ok(());
    }

    // Empty-text affordance: the item exists, now compose its text
    compose(output, &ops, &item, &list)
}

fn edit_task(output: &Output, workspace: &Workspace, id_str: &str, text: &str) -> Result<()> {
    let ops = ops_for(workspace, output);
    let id: ItemId = id_str.parse()?;

    if !text.is_empty() {
        return finish_edit(output, ops.commit_edit(&id, text)?, id_str);
    }

    let Some(item) = ops.workspace().item_store().read_all()?.remove(&id) else {
        output.error(&format!("Task not found: {}", id_str));
        return Ok(());
    };

    let Some(list) = ops.find_list(&item.list.to_string())? else {
        output.error(&format!("List not found: {}", item.list));
        return Ok(());
    };
    compose(output, &ops, &item, &list)
}

/// Runs an interactive edit session over stdin for one item
fn compose(output: &Output, ops: &Ops<'_>, item: &Item, list: &TaskList) -> Result<()> {
    let mut session = EditSession::default();
    session.begin(item.id.clone(), item.text.clone());

    let stdin = io::stdin();
    if stdin.is_terminal() {
        if item.text.is_empty() {
            eprint!("{} > ", list.name);
        } else {
            eprintln!("Editing: {}", item.text);
            eprint!("{} > ", list.name);
        }
        io::stderr().flush().ok();
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read task text")?;
    session.update(line.trim_end_matches(['\r', '\n']));

    let Some((id, draft)) = session.take() else {
        return Ok(());
    };
    finish_edit(output, ops.commit_edit(&id, &draft)?, &id.to_string())
}

fn finish_edit(output: &Output, outcome: EditOutcome, id_str: &str) -> Result<()> {
    match outcome {
        EditOutcome::Saved(item) => report_item(output, "Saved", &item),
        EditOutcome::Discarded => {
            if output.is_json() {
                output.data(&serde_json::json!({ "discarded": true }));
            } else {
                output.success("Discarded empty task");
            }
        }
        EditOutcome::Missing => output.error(&format!("Task not found: {}", id_str)),
    }
    Ok(())
}

fn toggle(output: &Output, workspace: &Workspace, id_str: &str, which: Toggle) -> Result<()> {
    let ops = ops_for(workspace, output);
    let id: ItemId = id_str.parse()?;

    let result = match which {
        Toggle::Completed => ops.toggle_completed(&id)?,
        Toggle::Priority => ops.toggle_priority(&id)?,
    };

    match result {
        Some(item) => {
            let verb = match which {
                Toggle::Completed if item.completed => "Completed",
                Toggle::Completed => "Reopened",
                Toggle::Priority if item.priority => "Flagged",
                Toggle::Priority => "Unflagged",
            };
            report_item(output, verb, &item);
        }
        None => output.error(&format!("Task not found: {}", id_str)),
    }

    Ok(())
}

fn archive_task(output: &Output, workspace: &Workspace, id_str: &str) -> Result<()> {
    let ops = ops_for(workspace, output);
    let id: ItemId = id_str.parse()?;

    match ops.archive_item(&id)? {
        Some(item) => report_item(output, "Archived", &item),
        None => output.error(&format!("Task not found: {}", id_str)),
    }
    Ok(())
}

fn restore_task(output: &Output, workspace: &Workspace, id_str: &str) -> Result<()> {
    let ops = ops_for(workspace, output);
    let id: ItemId = id_str.parse()?;

    match ops.unarchive_item(&id)? {
        Some(item) => report_item(output, "Restored", &item),
        None => output.error(&format!("Task not found: {}", id_str)),
    }
    Ok(())
}

fn restore_all(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let restored = ops.unarchive_all(&list.id)?;
    if output.is_json() {
        output.data(&serde_json::json!({ "restored": restored }));
    } else {
        output.success(&format!("Restored {} task{}", restored, plural(restored)));
    }
    Ok(())
}

fn show_archived(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let items = ops.archived_items(&list.id)?;

    if output.is_json() {
        let entries: Vec<_> = items.iter().map(item_json).collect();
        output.data(&entries);
    } else if items.is_empty() {
        println!("No recently deleted tasks");
    } else {
        for item in &items {
            println!("{}  {}", item.id, display_text(item));
        }
    }

    Ok(())
}

fn remove_task(output: &Output, workspace: &Workspace, id_str: &str) -> Result<()> {
    let ops = ops_for(workspace, output);
    let id: ItemId = id_str.parse()?;

    match ops.delete_item(&id)? {
        Some(item) => report_item(output, "Deleted", &item),
        None => output.error(&format!("Task not found: {}", id_str)),
    }
    Ok(())
}

fn clean_list(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let removed = ops.delete_completed(&list.id)?;
    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else {
        output.success(&format!(
            "Deleted {} completed task{}",
            removed,
            plural(removed)
        ));
    }
    Ok(())
}

fn reset_flags(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let cleared = ops.reset_priorities(&list.id)?;
    if output.is_json() {
        output.data(&serde_json::json!({ "cleared": cleared }));
    } else {
        output.success(&format!("Cleared {} priority flag{}", cleared, plural(cleared)));
    }
    Ok(())
}

fn import(
    output: &Output,
    workspace: &Workspace,
    selector: &str,
    file: Option<&std::path::Path>,
) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let content = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    let imported = ops.import_lines(&list.id, content.lines().map(str::to_string))?;

    if output.is_json() {
        let entries: Vec<_> = imported.iter().map(item_json).collect();
        output.data(&entries);
    } else {
        output.success(&format!(
            "Imported {} task{} into {}",
            imported.len(),
            plural(imported.len()),
            list.name
        ));
    }

    Ok(())
}

fn report_item(output: &Output, verb: &str, item: &Item) {
    if output.is_json() {
        output.data(&item_json(item));
    } else {
        output.success(&format!("{}: {} - {}", verb, item.id, display_text(item)));
    }
}

fn display_text(item: &Item) -> &str {
    if item.text.is_empty() {
        "Task"
    } else {
        &item.text
    }
}

fn item_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.to_string(),
        "list": item.list.to_string(),
        "text": item.text,
        "completed": item.completed,
        "priority": item.priority,
        "archived": item.archived,
    })
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
