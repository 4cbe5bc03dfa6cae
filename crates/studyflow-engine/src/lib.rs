// Engine module - Derived computation over store state (planning, analytics)
// This layer sits between the entity stores and CLI presentation.
// It holds no persistent state of its own: every function is a pure
// computation over already-materialized record collections, with `now`
// passed in explicitly so results are deterministic under test.

pub mod analytics;
pub mod planner;

pub use analytics::{
    analyze, basic_stats, best_productivity_time, focus_time_by_assignment, productivity_score,
    streak_days, weekly_progress, AssignmentFocus, BasicStats, DayProgress, InsightsReport,
    Period, PremiumInsights,
};
pub use planner::{generate_plan, StudyBlock, StudyPlan, BLOCK_MINUTES};
