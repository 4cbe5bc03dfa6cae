use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Assignment priority level.
///
/// Ordering is derived so that `Low < Medium < High`, which lets
/// callers sort by descending severity without a custom comparator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric weight used by the study planner (low 1, medium 2, high 3).
    pub fn score(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::Validation(format!("unknown priority: {}", other))),
        }
    }
}

/// Sort order for assignment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSort {
    /// Earliest due first.
    #[default]
    DueDate,
    /// High, medium, low.
    Priority,
    /// Most recently created first.
    CreatedAt,
    /// Insertion order, as stored.
    Stored,
}

/// A tracked study assignment, owned exclusively by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Opaque unique identifier, assigned at creation, immutable thereafter.
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    /// Estimated effort in minutes (positive).
    pub estimated_minutes: u32,
    /// Free-text course tag, may be empty.
    pub course: String,
    pub completed: bool,
    /// Stamped by the store at creation, never altered.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an assignment.
///
/// `title` and `due_date` are required; everything else falls back to
/// the documented defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub estimated_minutes: Option<u32>,
    pub course: Option<String>,
}

/// Partial update for an assignment. Absent fields keep their stored
/// value. `id` and `created_at` are not patchable by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub estimated_minutes: Option<u32>,
    pub course: Option<String>,
    pub completed: Option<bool>,
}
