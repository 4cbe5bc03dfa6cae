use chrono::Utc;
use uuid::Uuid;

use studyflow_types::{
    elapsed_minutes, local_date, ActiveSession, Error as DomainError, HistoryFilter, Session,
    SessionDraft, Tier,
};

use crate::backend::Backend;
use crate::{Error, Result};

/// Session records for one or more users, with the daily cap and the
/// custom-duration gate enforced at start time.
///
/// At most one open session per user is a usage convention, not an
/// enforced rule: `start` never rejects because another session is
/// still open, and `active` simply returns the first open one.
pub struct SessionStore<'a, B: Backend> {
    backend: &'a mut B,
}

impl<'a, B: Backend> SessionStore<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Open a new session stamped with the current time.
    ///
    /// The free-tier daily cap counts sessions whose `start_time`
    /// falls on today's local calendar date. A requested duration
    /// other than the tier default requires the custom-duration
    /// capability.
    pub fn start(&mut self, user_id: &str, draft: SessionDraft, tier: Tier) -> Result<Session> {
        let limits = tier.limits();
        let now = Utc::now();

        if let Some(max) = limits.max_daily_sessions {
            let today = local_date(now);
            let today_count = self
                .backend
                .sessions(user_id)?
                .iter()
                .filter(|s| local_date(s.start_time) == today)
                .count();
            if today_count as u32 >= max {
                return Err(DomainError::LimitExceeded {
                    limit: max,
                    requires_premium: !tier.is_premium(),
                    hint: "upgrade to premium for unlimited sessions",
                }
                .into());
            }
        }

        let duration_minutes = match draft.duration_minutes {
            None => limits.default_session_minutes,
            Some(requested) if requested == limits.default_session_minutes => requested,
            Some(requested) => {
                if !limits.custom_duration {
                    return Err(DomainError::LimitExceeded {
                        limit: limits.default_session_minutes,
                        requires_premium: true,
                        hint: "custom session length requires premium",
                    }
                    .into());
                }
                if requested == 0 {
                    return Err(DomainError::Validation(
                        "session duration must be positive".to_string(),
                    )
                    .into());
                }
                requested
            }
        };

        let record = Session {
            id: Uuid::new_v4().to_string(),
            assignment_id: draft.assignment_id,
            kind: draft.kind.unwrap_or_default(),
            duration_minutes,
            start_time: now,
            end_time: None,
            completed: false,
            interrupted: false,
            actual_minutes: 0,
        };
        self.backend.insert_session(user_id, &record)?;
        Ok(record)
    }

    /// Terminate a session. Termination is single-use: a second call
    /// for the same session fails with `AlreadyEnded` and leaves the
    /// record untouched.
    pub fn end(
        &mut self,
        user_id: &str,
        session_id: &str,
        completed: Option<bool>,
        interrupted: Option<bool>,
    ) -> Result<Session> {
        let sessions = self.backend.sessions(user_id)?;
        let Some(mut closed) = sessions.into_iter().find(|s| s.id == session_id) else {
            return Err(not_found(session_id));
        };
        if closed.end_time.is_some() {
            return Err(DomainError::AlreadyEnded(session_id.to_string()).into());
        }

        let now = Utc::now();
        closed.end_time = Some(now);
        closed.actual_minutes = elapsed_minutes(closed.start_time, now);
        closed.completed = completed.unwrap_or(true);
        closed.interrupted = interrupted.unwrap_or(false);

        if !self.backend.replace_session(user_id, &closed)? {
            return Err(not_found(session_id));
        }
        Ok(closed)
    }

    /// Sessions matching all supplied filters, in chronological order.
    /// A `limit` keeps the most recent entries (the tail).
    pub fn history(&self, user_id: &str, filter: &HistoryFilter) -> Result<Vec<Session>> {
        let mut sessions = self.backend.sessions(user_id)?;

        if let Some(start) = filter.start_date {
            sessions.retain(|s| s.start_time >= start);
        }
        if let Some(end) = filter.end_date {
            sessions.retain(|s| s.start_time <= end);
        }
        if let Some(assignment_id) = &filter.assignment_id {
            sessions.retain(|s| s.assignment_id.as_deref() == Some(assignment_id.as_str()));
        }
        if let Some(limit) = filter.limit
            && sessions.len() > limit
        {
            sessions = sessions.split_off(sessions.len() - limit);
        }

        Ok(sessions)
    }

    /// The first open session, augmented with live timer arithmetic,
    /// or None when nothing is running.
    pub fn active(&self, user_id: &str) -> Result<Option<ActiveSession>> {
        let sessions = self.backend.sessions(user_id)?;
        let Some(open) = sessions.into_iter().find(Session::is_open) else {
            return Ok(None);
        };

        let elapsed = elapsed_minutes(open.start_time, Utc::now());
        let remaining = open.duration_minutes.saturating_sub(elapsed);
        Ok(Some(ActiveSession {
            session: open,
            elapsed_minutes: elapsed,
            remaining_minutes: remaining,
        }))
    }
}

fn not_found(session_id: &str) -> Error {
    DomainError::NotFound {
        entity: "Session",
        id: session_id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use studyflow_types::SessionKind;

    #[test]
    fn test_start_fills_defaults() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();

        assert_eq!(session.kind, SessionKind::Focus);
        assert_eq!(session.duration_minutes, 25);
        assert!(session.end_time.is_none());
        assert_eq!(session.actual_minutes, 0);
        assert!(!session.completed);
        assert!(!session.interrupted);
    }

    #[test]
    fn test_free_tier_daily_cap_is_five() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        for _ in 0..5 {
            store.start("alice", SessionDraft::default(), Tier::Free).unwrap();
        }

        let err = store
            .start("alice", SessionDraft::default(), Tier::Free)
            .unwrap_err();
        match err.domain() {
            Some(DomainError::LimitExceeded {
                limit,
                requires_premium,
                ..
            }) => {
                assert_eq!(*limit, 5);
                assert!(*requires_premium);
            }
            other => panic!("expected LimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_premium_has_no_daily_cap() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        for _ in 0..8 {
            store.start("alice", SessionDraft::default(), Tier::Premium).unwrap();
        }
    }

    #[test]
    fn test_custom_duration_requires_premium() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let draft = SessionDraft {
            duration_minutes: Some(50),
            ..Default::default()
        };
        let err = store.start("alice", draft, Tier::Free).unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(DomainError::LimitExceeded {
                requires_premium: true,
                ..
            })
        ));
    }

    #[test]
    fn test_default_duration_is_allowed_on_free() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let draft = SessionDraft {
            duration_minutes: Some(25),
            ..Default::default()
        };
        let session = store.start("alice", draft, Tier::Free).unwrap();
        assert_eq!(session.duration_minutes, 25);
    }

    #[test]
    fn test_premium_sets_custom_duration() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let draft = SessionDraft {
            duration_minutes: Some(50),
            kind: Some(SessionKind::Focus),
            ..Default::default()
        };
        let session = store.start("alice", draft, Tier::Premium).unwrap();
        assert_eq!(session.duration_minutes, 50);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let draft = SessionDraft {
            duration_minutes: Some(0),
            ..Default::default()
        };
        let err = store.start("alice", draft, Tier::Premium).unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::Validation(_))));
    }

    #[test]
    fn test_end_defaults_to_completed_not_interrupted() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();
        let closed = store.end("alice", &session.id, None, None).unwrap();

        assert!(closed.end_time.is_some());
        assert!(closed.completed);
        assert!(!closed.interrupted);
    }

    #[test]
    fn test_end_is_single_use() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();
        let closed = store.end("alice", &session.id, Some(true), None).unwrap();

        let err = store
            .end("alice", &session.id, Some(false), Some(true))
            .unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::AlreadyEnded(_))));

        // The second call must not have touched the record.
        let stored = store.history("alice", &HistoryFilter::default()).unwrap();
        assert_eq!(stored[0], closed);
    }

    #[test]
    fn test_end_unknown_session_is_not_found() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let err = store.end("alice", "missing", None, None).unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_history_filters_by_assignment() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let tagged = SessionDraft {
            assignment_id: Some("essay".to_string()),
            ..Default::default()
        };
        store.start("alice", tagged, Tier::Premium).unwrap();
        store.start("alice", SessionDraft::default(), Tier::Premium).unwrap();

        let filter = HistoryFilter {
            assignment_id: Some("essay".to_string()),
            ..Default::default()
        };
        let matches = store.history("alice", &filter).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].assignment_id.as_deref(), Some("essay"));
    }

    #[test]
    fn test_history_limit_keeps_the_tail() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(store.start("alice", SessionDraft::default(), Tier::Premium).unwrap().id);
        }

        let filter = HistoryFilter {
            limit: Some(2),
            ..Default::default()
        };
        let tail: Vec<String> = store
            .history("alice", &filter)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(tail, ids[2..]);
    }

    #[test]
    fn test_history_date_bounds_are_inclusive() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();

        let filter = HistoryFilter {
            start_date: Some(session.start_time),
            end_date: Some(session.start_time),
            ..Default::default()
        };
        assert_eq!(store.history("alice", &filter).unwrap().len(), 1);
    }

    #[test]
    fn test_active_reports_timer_arithmetic() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        assert!(store.active("alice").unwrap().is_none());

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();
        let active = store.active("alice").unwrap().expect("open session");

        assert_eq!(active.session.id, session.id);
        assert_eq!(active.elapsed_minutes, 0);
        assert_eq!(active.remaining_minutes, 25);
    }

    #[test]
    fn test_active_is_none_after_end() {
        let mut backend = MemoryBackend::new();
        let mut store = SessionStore::new(&mut backend);

        let session = store.start("alice", SessionDraft::default(), Tier::Free).unwrap();
        store.end("alice", &session.id, None, None).unwrap();

        assert!(store.active("alice").unwrap().is_none());
    }
}
