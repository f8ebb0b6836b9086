//! Reminder list commands

use anyhow::Result;
use hearth_core::db::Database;
use hearth_core::edit::validate_task_title;

use super::confirm;

pub fn cmd_tasks_list(db: &Database) -> Result<()> {
    let tasks = db.list_open_tasks()?;
    if tasks.is_empty() {
        println!("No open reminders.");
        return Ok(());
    }

    for task in tasks {
        let star = if task.important { "⭐" } else { "  " };
        println!("{} [{}] {}", star, task.id, task.title);
    }
    Ok(())
}

pub fn cmd_tasks_add(db: &Database, title: &str, important: bool) -> Result<()> {
    let id = db.create_task(title, important)?;
    println!("✅ Added reminder [{}]", id);
    Ok(())
}

pub fn cmd_tasks_star(db: &Database, id: i64, important: bool) -> Result<()> {
    db.update_task(id, None, Some(important))?;
    if important {
        println!("⭐ Marked reminder [{}] important", id);
    } else {
        println!("✅ Removed the important mark from reminder [{}]", id);
    }
    Ok(())
}

/// Title edit follows the inline-edit commit rules: a blank title discards
/// the edit instead of blanking the reminder.
pub fn cmd_tasks_edit(db: &Database, id: i64, title: &str) -> Result<()> {
    match validate_task_title(title) {
        Some(title) => {
            db.update_task(id, Some(&title), None)?;
            println!("✅ Updated reminder [{}]", id);
        }
        None => {
            println!("✋ Edit discarded; reminder [{}] is unchanged", id);
        }
    }
    Ok(())
}

pub fn cmd_tasks_delete(db: &Database, id: i64, yes: bool) -> Result<()> {
    let task = db
        .get_task(id)?
        .ok_or_else(|| anyhow::anyhow!("Reminder {} not found", id))?;

    if !confirm(
        &format!("Delete reminder \"{}\"?", task.title),
        yes,
    ) {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_task(id)?;
    println!("🗑️  Deleted reminder \"{}\"", task.title);
    Ok(())
}
