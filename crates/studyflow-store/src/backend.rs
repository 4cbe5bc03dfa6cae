use std::collections::HashMap;

use studyflow_types::{Assignment, Session};

use crate::Result;

/// Keyed-collection storage contract.
///
/// Backends hold whole records per user and know nothing about tier
/// policy, defaults, or ordering. Reads return snapshots in insertion
/// order; writes replace or remove one record at a time. A durable
/// backend slots in behind this trait without touching store logic.
pub trait Backend {
    fn assignments(&self, user_id: &str) -> Result<Vec<Assignment>>;

    fn insert_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<()>;

    /// Replace the stored record with the same id. Returns false when
    /// no such record exists for this user.
    fn replace_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<bool>;

    /// Returns false when no such record exists for this user.
    fn delete_assignment(&mut self, user_id: &str, assignment_id: &str) -> Result<bool>;

    fn sessions(&self, user_id: &str) -> Result<Vec<Session>>;

    fn insert_session(&mut self, user_id: &str, record: &Session) -> Result<()>;

    /// Replace the stored record with the same id. Returns false when
    /// no such record exists for this user.
    fn replace_session(&mut self, user_id: &str, record: &Session) -> Result<bool>;
}

/// Process-lifetime in-memory backend: one record vector per user.
///
/// This is the reference behavior; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    assignments: HashMap<String, Vec<Assignment>>,
    sessions: HashMap<String, Vec<Session>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn assignments(&self, user_id: &str) -> Result<Vec<Assignment>> {
        Ok(self.assignments.get(user_id).cloned().unwrap_or_default())
    }

    fn insert_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<()> {
        self.assignments
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn replace_assignment(&mut self, user_id: &str, record: &Assignment) -> Result<bool> {
        let Some(records) = self.assignments.get_mut(user_id) else {
            return Ok(false);
        };
        match records.iter_mut().find(|a| a.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_assignment(&mut self, user_id: &str, assignment_id: &str) -> Result<bool> {
        let Some(records) = self.assignments.get_mut(user_id) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|a| a.id != assignment_id);
        Ok(records.len() < before)
    }

    fn sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        Ok(self.sessions.get(user_id).cloned().unwrap_or_default())
    }

    fn insert_session(&mut self, user_id: &str, record: &Session) -> Result<()> {
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn replace_session(&mut self, user_id: &str, record: &Session) -> Result<bool> {
        let Some(records) = self.sessions.get_mut(user_id) else {
            return Ok(false);
        };
        match records.iter_mut().find(|s| s.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
