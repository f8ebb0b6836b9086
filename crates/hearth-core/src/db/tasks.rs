//! Reminder list operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Task;

fn map_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let created_at_str: String = row.get(4)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        important: row.get(2)?,
        completed: row.get(3)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a task; the title must be non-empty after trimming
    pub fn create_task(&self, title: &str, important: bool) -> Result<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidData(
                "Task title must not be empty".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (title, important) VALUES (?, ?)",
            params![title, important],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List open tasks only; completed rows never surface
    pub fn list_open_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, important, completed, created_at FROM tasks
             WHERE completed = 0 ORDER BY id",
        )?;

        let tasks = stmt
            .query_map([], map_task_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Get a task by ID
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn()?;
        let task = conn
            .query_row(
                "SELECT id, title, important, completed, created_at FROM tasks WHERE id = ?",
                params![id],
                map_task_row,
            )
            .ok();

        Ok(task)
    }

    /// Update any subset of {title, important}. A provided title must be
    /// non-empty after trimming.
    pub fn update_task(
        &self,
        id: i64,
        title: Option<&str>,
        important: Option<bool>,
    ) -> Result<()> {
        let title = title.map(str::trim);
        if let Some(t) = title {
            if t.is_empty() {
                return Err(Error::InvalidData(
                    "Task title must not be empty".to_string(),
                ));
            }
        }

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE tasks SET title = COALESCE(?1, title), important = COALESCE(?2, important)
             WHERE id = ?3",
            params![title, important, id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Task {} not found", id)));
        }
        Ok(())
    }

    /// Delete a task by ID
    pub fn delete_task(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM tasks WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Task {} not found", id)));
        }
        Ok(())
    }
}
