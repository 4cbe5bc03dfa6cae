use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Kind of focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    #[default]
    Focus,
    Break,
    LongBreak,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::Break => "break",
            SessionKind::LongBreak => "long-break",
        }
    }
}

impl FromStr for SessionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(SessionKind::Focus),
            "break" => Ok(SessionKind::Break),
            "long-break" => Ok(SessionKind::LongBreak),
            other => Err(Error::Validation(format!("unknown session kind: {}", other))),
        }
    }
}

/// A single timed focus/break session.
///
/// Termination is single-use: once `end_time` is set it can never be
/// set again, and `actual_minutes` is derived at that moment rather
/// than supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Weak reference to an assignment; may point at a deleted record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    pub kind: SessionKind,
    /// Planned length in minutes.
    pub duration_minutes: u32,
    pub start_time: DateTime<Utc>,
    /// None while the session is open.
    pub end_time: Option<DateTime<Utc>>,
    /// Meaningful only after termination.
    pub completed: bool,
    /// Meaningful only after termination.
    pub interrupted: bool,
    /// Elapsed wall time rounded to whole minutes; 0 while open.
    pub actual_minutes: u32,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Creation payload for a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDraft {
    pub assignment_id: Option<String>,
    pub kind: Option<SessionKind>,
    pub duration_minutes: Option<u32>,
}

/// An open session augmented with live timer arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    #[serde(flatten)]
    pub session: Session,
    pub elapsed_minutes: u32,
    pub remaining_minutes: u32,
}

/// Filters for session history queries. All supplied filters must
/// match; date bounds are inclusive and compared against `start_time`.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub assignment_id: Option<String>,
    /// Keep only the most recent N entries (tail of the chronological list).
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SessionKind::LongBreak).unwrap(),
            "\"long-break\""
        );
        assert_eq!(
            serde_json::from_str::<SessionKind>("\"long-break\"").unwrap(),
            SessionKind::LongBreak
        );
    }

    #[test]
    fn test_session_kind_round_trips_as_str() {
        for kind in [SessionKind::Focus, SessionKind::Break, SessionKind::LongBreak] {
            assert_eq!(kind.as_str().parse::<SessionKind>().unwrap(), kind);
        }
    }
}
