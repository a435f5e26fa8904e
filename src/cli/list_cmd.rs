//! List CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::ops_for;
use super::output::Output;
use crate::domain::Theme;
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a list
    ///
    /// A taken name gets a numeric suffix: "Groceries", "Groceries 2", ...
    Add {
        /// List name
        name: String,

        /// Display color: default, blue, green, pink, purple, yellow
        #[arg(long)]
        theme: Option<String>,

        /// Render items without a completion glyph
        #[arg(long)]
        no_bullets: bool,
    },

    /// Show all lists
    Ls,

    /// Rename a list and/or change its style
    Edit {
        /// List name or ID
        list: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New display color
        #[arg(long)]
        theme: Option<String>,

        /// Render items with a completion glyph (true/false)
        #[arg(long)]
        bullets: Option<bool>,
    },

    /// Delete lists and all of their tasks
    Rm {
        /// List names or IDs
        lists: Vec<String>,
    },
}

pub fn run(cmd: ListCommands, output: &Output, workspace: &Workspace) -> Result<()> {
    match cmd {
        ListCommands::Add {
            name,
            theme,
            no_bullets,
        } => add_list(output, workspace, &name, theme.as_deref(), no_bullets),
        ListCommands::Ls => list_lists(output, workspace),
        ListCommands::Edit {
            list,
            name,
            theme,
            bullets,
        } => edit_list(output, workspace, &list, name.as_deref(), theme.as_deref(), bullets),
        ListCommands::Rm { lists } => remove_lists(output, workspace, &lists),
    }
}

fn add_list(
    output: &Output,
    workspace: &Workspace,
    name: &str,
    theme: Option<&str>,
    no_bullets: bool,
) -> Result<()> {
    let ops = ops_for(workspace, output);

    let bullet_points = if no_bullets { Some(false) } else { None };
    let theme = theme.map(Theme::from_key);
    let list = ops.create_list(name, bullet_points, theme)?;

    if output.is_json() {
        output.data(&list_json(&list));
    } else {
        output.success(&format!("Created list: {}", list.name));
    }

    Ok(())
}

fn list_lists(output: &Output, workspace: &Workspace) -> Result<()> {
    let ops = ops_for(workspace, output);
    let lists = ops.lists()?;

    if output.is_json() {
        let entries: Vec<_> = lists.iter().map(list_json).collect();
        output.data(&entries);
    } else if lists.is_empty() {
        println!("No lists yet. Create one with 'daily list add <name>'");
    } else {
        println!("{:<12} {:<10} {}", "ID", "THEME", "NAME");
        println!("{}", "-".repeat(50));
        for list in &lists {
            println!("{:<12} {:<10} {}", list.id.to_string(), list.theme.key(), list.name);
        }
    }

    Ok(())
}

fn edit_list(
    output: &Output,
    workspace: &Workspace,
    selector: &str,
    name: Option<&str>,
    theme: Option<&str>,
    bullets: Option<bool>,
) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let theme = theme.map(Theme::from_key);
    match ops.update_list(&list.id, name, bullets, theme)? {
        Some(updated) => {
            if output.is_json() {
                output.data(&list_json(&updated));
            } else {
                output.success(&format!("Updated list: {}", updated.name));
            }
        }
        None => output.error(&format!("List not found: {}", selector)),
    }

    Ok(())
}

fn remove_lists(output: &Output, workspace: &Workspace, selectors: &[String]) -> Result<()> {
    let ops = ops_for(workspace, output);

    let mut ids = Vec::new();
    for selector in selectors {
        match ops.find_list(selector)? {
            Some(list) => ids.push(list.id),
            None => output.error(&format!("List not found: {}", selector)),
        }
    }

    let removed = ops.delete_lists(&ids)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else if removed > 0 {
        output.success(&format!(
            "Deleted {} list{} and their tasks",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
    }

    Ok(())
}

fn list_json(list: &crate::domain::TaskList) -> serde_json::Value {
    serde_json::json!({
        "id": list.id.to_string(),
        "name": list.name,
        "theme": list.theme.key(),
        "color": list.theme.color(),
        "bullet_points": list.bullet_points,
    })
}
