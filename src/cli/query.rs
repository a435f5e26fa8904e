//! Read-only views: show, share, pending, status, search

use anyhow::Result;

use super::app::ops_for;
use super::output::Output;
use crate::domain::Item;
use crate::ops::Ops;
use crate::storage::Workspace;

/// Renders a list with its visible items in list order
pub fn show(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let items = ops.items(&list.id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "list": {
                "id": list.id.to_string(),
                "name": list.name,
                "theme": list.theme.key(),
                "color": list.theme.color(),
                "bullet_points": list.bullet_points,
            },
            "items": items.iter().map(item_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    println!("{} ({})", list.name, list.theme.key());
    if items.is_empty() {
        println!("No tasks. Add one with 'daily task add {:?}'", list.name);
        return Ok(());
    }

    for item in &items {
        let flag = if item.priority { " ⚑" } else { "" };
        if list.bullet_points {
            let glyph = if item.completed { "[x]" } else { "[ ]" };
            println!("{}  {} {}{}", item.id, glyph, text_of(item), flag);
        } else {
            println!("{}  {}{}", item.id, text_of(item), flag);
        }
    }

    Ok(())
}

/// Prints a list's share-ready text block
pub fn share(output: &Output, workspace: &Workspace, selector: &str) -> Result<()> {
    let ops = ops_for(workspace, output);

    let Some(list) = ops.find_list(selector)? else {
        output.error(&format!("List not found: {}", selector));
        return Ok(());
    };

    let text = ops.share_text(&list)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "list": list.name, "text": text }));
    } else {
        print!("{}", text);
    }

    Ok(())
}

/// Shows outstanding tasks across all lists, oldest first
pub fn pending(output: &Output, workspace: &Workspace, limit: Option<usize>) -> Result<()> {
    let ops = ops_for(workspace, output);
    let limit = limit.unwrap_or(workspace.config().pending_limit);

    render_pending(output, &ops, limit)
}

/// Renders the pending summary; shared with `watch`
pub(crate) fn render_pending(output: &Output, ops: &Ops<'_>, limit: usize) -> Result<()> {
    let items = ops.pending(limit)?;

    if output.is_json() {
        output.data(&items.iter().map(item_json).collect::<Vec<_>>());
        return Ok(());
    }

    println!("Today's Tasks");
    if items.is_empty() {
        println!("You're all caught up! 🎉");
    } else {
        for item in &items {
            println!("○ {}", text_of(item));
        }
    }

    Ok(())
}

/// Shows an overview of every list with item counts
pub fn status(output: &Output, workspace: &Workspace) -> Result<()> {
    output.verbose("Gathering workspace status");
    let cache = workspace.get_or_rebuild_cache()?;
    let counts = cache.counts()?;

    if output.is_json() {
        let entries: Vec<_> = counts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.list_id,
                    "name": c.name,
                    "open": c.open,
                    "completed": c.completed,
                    "archived": c.archived,
                })
            })
            .collect();
        output.data(&entries);
        return Ok(());
    }

    if counts.is_empty() {
        println!("No lists yet. Create one with 'daily list add <name>'");
        return Ok(());
    }

    println!("{:<24} {:>6} {:>6} {:>9}", "LIST", "OPEN", "DONE", "ARCHIVED");
    println!("{}", "-".repeat(48));
    for c in &counts {
        println!("{:<24} {:>6} {:>6} {:>9}", c.name, c.open, c.completed, c.archived);
    }

    Ok(())
}

/// Searches visible tasks by text, matching list names too
pub fn search(output: &Output, workspace: &Workspace, query: &str) -> Result<()> {
    output.verbose_ctx("search", &format!("Searching for: {}", query));
    let cache = workspace.get_or_rebuild_cache()?;
    let hits = cache.search(query)?;

    if output.is_json() {
        let entries: Vec<_> = hits
            .iter()
            .map(|h| {
                serde_json::json!({
                    "id": h.id,
                    "list": h.list_name,
                    "text": h.text,
                    "completed": h.completed,
                    "priority": h.priority,
                })
            })
            .collect();
        output.data(&entries);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches for '{}'", query);
    } else {
        for hit in &hits {
            let glyph = if hit.completed { "[x]" } else { "[ ]" };
            println!("{}  {} {}: {}", hit.id, glyph, hit.list_name, hit.text);
        }
    }

    Ok(())
}

fn text_of(item: &Item) -> &str {
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
    })
}
