use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use studyflow_types::{Assignment, Session};

use crate::backend::Backend;
use crate::{Error, Result};

/// Durable SQLite backend.
///
/// Stores whole records in two flat tables keyed by user. Insertion
/// order is recovered through rowid, so the stores see the same
/// ordering the in-memory backend gives them. Store callers run each
/// operation to completion inside one process, so the read-check-write
/// sequence in `SessionStore::end` never interleaves.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS assignments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                due_date TEXT NOT NULL,
                priority TEXT NOT NULL,
                estimated_minutes INTEGER NOT NULL,
                course TEXT NOT NULL,
                completed INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                assignment_id TEXT,
                kind TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT,
                completed INTEGER NOT NULL,
                interrupted INTEGER NOT NULL,
                actual_minutes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assignments_user ON assignments(user_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
            "#,
        )?;

        Ok(())
    }
}

impl Backend for SqliteBackend {
    fn assignments(&self, user_id: &str) -> Result<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, description, due_date, priority, estimated_minutes,
                   course, completed, created_at, updated_at
            FROM assignments WHERE user_id = ?1 ORDER BY rowid
            "#,
        )?;
        let rows = stmt.query_map(params![user_id], assignment_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row??);
        }
        Ok(records)
    }

    fn insert_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO assignments
                (id, user_id, title, description, due_date, priority,
                 estimated_minutes, course, completed, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                &record.id,
                user_id,
                &record.title,
                &record.description,
                record.due_date.to_rfc3339(),
                record.priority.as_str(),
                record.estimated_minutes,
                &record.course,
                record.completed,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn replace_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<bool> {
        let affected = self.conn.execute(
            r#"
            UPDATE assignments SET
                title = ?3, description = ?4, due_date = ?5, priority = ?6,
                estimated_minutes = ?7, course = ?8, completed = ?9, updated_at = ?10
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![
                &record.id,
                user_id,
                &record.title,
                &record.description,
                record.due_date.to_rfc3339(),
                record.priority.as_str(),
                record.estimated_minutes,
                &record.course,
                record.completed,
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(affected > 0)
    }

    fn delete_assignment(&mut self, user_id: &str, assignment_id: &str) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM assignments WHERE id = ?1 AND user_id = ?2",
            params![assignment_id, user_id],
        )?;

        Ok(affected > 0)
    }

    fn sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, assignment_id, kind, duration_minutes, start_time,
                   end_time, completed, interrupted, actual_minutes
            FROM sessions WHERE user_id = ?1 ORDER BY rowid
            "#,
        )?;
        let rows = stmt.query_map(params![user_id], session_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row??);
        }
        Ok(records)
    }

    fn insert_session(&mut self, user_id: &str, record: &Session) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO sessions
                (id, user_id, assignment_id, kind, duration_minutes, start_time,
                 end_time, completed, interrupted, actual_minutes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                &record.id,
                user_id,
                &record.assignment_id,
                record.kind.as_str(),
                record.duration_minutes,
                record.start_time.to_rfc3339(),
                record.end_time.map(|ts| ts.to_rfc3339()),
                record.completed,
                record.interrupted,
                record.actual_minutes,
            ],
        )?;

        Ok(())
    }

    fn replace_session(&mut self, user_id: &str, record: &Session) -> Result<bool> {
        let affected = self.conn.execute(
            r#"
            UPDATE sessions SET
                assignment_id = ?3, kind = ?4, duration_minutes = ?5, start_time = ?6,
                end_time = ?7, completed = ?8, interrupted = ?9, actual_minutes = ?10
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![
                &record.id,
                user_id,
                &record.assignment_id,
                record.kind.as_str(),
                record.duration_minutes,
                record.start_time.to_rfc3339(),
                record.end_time.map(|ts| ts.to_rfc3339()),
                record.completed,
                record.interrupted,
                record.actual_minutes,
            ],
        )?;

        Ok(affected > 0)
    }
}

// query_map closures must return rusqlite::Result, so row decoding
// yields a nested Result: outer for SQL access, inner for value decoding.

fn assignment_from_row(row: &Row<'_>) -> rusqlite::Result<Result<Assignment>> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let description: String = row.get(2)?;
    let due_date: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let estimated_minutes: u32 = row.get(5)?;
    let course: String = row.get(6)?;
    let completed: bool = row.get(7)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok((|| {
        Ok(Assignment {
            id,
            title,
            description,
            due_date: parse_ts(&due_date)?,
            priority: priority
                .parse()
                .map_err(|_| Error::Decode(format!("bad priority: {}", priority)))?,
            estimated_minutes,
            course,
            completed,
            created_at: parse_ts(&created_at)?,
            updated_at: parse_ts(&updated_at)?,
        })
    })())
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Result<Session>> {
    let id: String = row.get(0)?;
    let assignment_id: Option<String> = row.get(1)?;
    let kind: String = row.get(2)?;
    let duration_minutes: u32 = row.get(3)?;
    let start_time: String = row.get(4)?;
    let end_time: Option<String> = row.get(5)?;
    let completed: bool = row.get(6)?;
    let interrupted: bool = row.get(7)?;
    let actual_minutes: u32 = row.get(8)?;

    Ok((|| {
        Ok(Session {
            id,
            assignment_id,
            kind: kind
                .parse()
                .map_err(|_| Error::Decode(format!("bad session kind: {}", kind)))?,
            duration_minutes,
            start_time: parse_ts(&start_time)?,
            end_time: end_time.as_deref().map(parse_ts).transpose()?,
            completed,
            interrupted,
            actual_minutes,
        })
    })())
}

fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| Error::Decode(format!("bad timestamp {}: {}", value, err)))
}
