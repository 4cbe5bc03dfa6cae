use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use studyflow_types::{local_date, local_hour, local_weekday, Session, Tier};

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Time window selector for analytics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    #[default]
    Week,
    /// Last 30 days.
    Month,
    /// No window.
    All,
}

impl Period {
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::Day => Some(now - Duration::hours(24)),
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(now - Duration::days(30)),
            Period::All => None,
        }
    }

    /// Sessions whose `start_time` falls inside this window.
    pub fn filter(&self, sessions: &[Session], now: DateTime<Utc>) -> Vec<Session> {
        match self.cutoff(now) {
            Some(cutoff) => sessions
                .iter()
                .filter(|s| s.start_time >= cutoff)
                .cloned()
                .collect(),
            None => sessions.to_vec(),
        }
    }
}

/// Completion and volume counts, available on every tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BasicStats {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_minutes: u32,
    /// total_minutes / total_sessions, rounded; 0 with no sessions.
    pub average_session_minutes: u32,
}

pub fn basic_stats(sessions: &[Session]) -> BasicStats {
    let total_sessions = sessions.len();
    let completed_sessions = sessions.iter().filter(|s| s.completed).count();
    let total_minutes: u32 = sessions.iter().map(|s| s.actual_minutes).sum();
    let average_session_minutes = if total_sessions > 0 {
        ((total_minutes as f64) / (total_sessions as f64)).round() as u32
    } else {
        0
    };

    BasicStats {
        total_sessions,
        completed_sessions,
        total_minutes,
        average_session_minutes,
    }
}

/// Share of sessions finished without interruption, scaled 0-100.
pub fn productivity_score(sessions: &[Session]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let productive = sessions
        .iter()
        .filter(|s| s.completed && !s.interrupted)
        .count();
    ((productive as f64 / sessions.len() as f64) * 100.0).round() as u32
}

/// The hour-of-day range where the most sessions were completed.
///
/// Sessions are bucketed by the local hour of `start_time`; each
/// populated hour scores its completed count, and the earliest hour
/// wins ties. `None` when the collection is empty.
pub fn best_productivity_time(sessions: &[Session]) -> Option<String> {
    if sessions.is_empty() {
        return None;
    }

    let mut buckets = [(0u32, 0u32); 24];
    for session in sessions {
        let hour = local_hour(session.start_time) as usize;
        buckets[hour].0 += 1;
        if session.completed {
            buckets[hour].1 += 1;
        }
    }

    let mut best_hour = 0;
    let mut best_score = 0.0;
    for (hour, (count, completed)) in buckets.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let score = (*completed as f64 / *count as f64) * *count as f64;
        if score > best_score {
            best_score = score;
            best_hour = hour;
        }
    }

    Some(format!("{}:00 - {}:00", best_hour, best_hour + 1))
}

/// Consecutive local calendar days with at least one session, counting
/// back from `today` (which counts as day zero). Stops at the first gap.
pub fn streak_days(sessions: &[Session], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = sessions.iter().map(|s| local_date(s.start_time)).collect();

    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Per-weekday session count and focus minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub day: String,
    pub sessions: usize,
    pub minutes: u32,
}

/// Session counts and minutes bucketed Sun through Sat.
pub fn weekly_progress(sessions: &[Session]) -> Vec<DayProgress> {
    let mut progress: Vec<DayProgress> = DAY_LABELS
        .iter()
        .map(|day| DayProgress {
            day: (*day).to_string(),
            sessions: 0,
            minutes: 0,
        })
        .collect();

    for session in sessions {
        let index = local_weekday(session.start_time);
        progress[index].sessions += 1;
        progress[index].minutes += session.actual_minutes;
    }
    progress
}

/// Accumulated focus time for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentFocus {
    pub assignment_id: String,
    pub total_minutes: u32,
    pub session_count: usize,
}

/// Focus time grouped by assignment, in first-seen order. Sessions
/// without an assignment reference are skipped.
pub fn focus_time_by_assignment(sessions: &[Session]) -> Vec<AssignmentFocus> {
    let mut grouped: Vec<AssignmentFocus> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let Some(assignment_id) = &session.assignment_id else {
            continue;
        };
        let slot = *index.entry(assignment_id.clone()).or_insert_with(|| {
            grouped.push(AssignmentFocus {
                assignment_id: assignment_id.clone(),
                total_minutes: 0,
                session_count: 0,
            });
            grouped.len() - 1
        });
        grouped[slot].total_minutes += session.actual_minutes;
        grouped[slot].session_count += 1;
    }
    grouped
}

/// Premium-only analytics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumInsights {
    pub productivity_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_productivity_time: Option<String>,
    pub streak_days: u32,
    pub weekly_progress: Vec<DayProgress>,
    pub focus_time_by_assignment: Vec<AssignmentFocus>,
}

/// Tier-shaped analytics result: basic stats always, the premium block
/// for premium callers, an upgrade marker for everyone else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub period: Period,
    #[serde(flatten)]
    pub basic: BasicStats,
    #[serde(flatten)]
    pub premium: Option<PremiumInsights>,
    pub requires_premium: bool,
}

/// Run the full analytics pass over a user's sessions.
///
/// All statistics except the streak are computed over the `period`
/// window; the streak always looks at the complete history, since a
/// streak broken by windowing would be meaningless.
pub fn analyze(
    sessions: &[Session],
    period: Period,
    tier: Tier,
    now: DateTime<Utc>,
) -> InsightsReport {
    let windowed = period.filter(sessions, now);
    let basic = basic_stats(&windowed);

    let premium = tier.is_premium().then(|| PremiumInsights {
        productivity_score: productivity_score(&windowed),
        best_productivity_time: best_productivity_time(&windowed),
        streak_days: streak_days(sessions, local_date(now)),
        weekly_progress: weekly_progress(&windowed),
        focus_time_by_assignment: focus_time_by_assignment(&windowed),
    });

    InsightsReport {
        period,
        basic,
        requires_premium: premium.is_none(),
        premium,
    }
}
