use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studyflow_types::{Assignment, Priority};

/// Maximum length of a single study block in minutes.
pub const BLOCK_MINUTES: u32 = 45;

/// One time-boxed study interval carved out of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyBlock {
    pub assignment_id: String,
    pub title: String,
    pub course: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    /// 1-based position of this block within its assignment.
    pub session_number: u32,
    /// Total blocks the assignment was split into.
    pub total_sessions: u32,
    pub duration_minutes: u32,
}

/// Ordered, time-boxed study plan for a set of outstanding assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyPlan {
    pub blocks: Vec<StudyBlock>,
    /// Sum of all block durations.
    pub total_minutes: u32,
}

impl StudyPlan {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Generate a prioritized study plan from outstanding assignments.
///
/// Completed assignments are ignored. Each remaining assignment gets a
/// score combining urgency (how close the due date is, capped at 10
/// for anything due now or overdue, zero at 10+ days out) and its
/// priority weight. Assignments are then split into sequential blocks
/// of at most [`BLOCK_MINUTES`], emitted in score order without
/// interleaving. Equal scores keep their input order.
pub fn generate_plan(assignments: &[Assignment], now: DateTime<Utc>) -> StudyPlan {
    let mut scored: Vec<(f64, &Assignment)> = assignments
        .iter()
        .filter(|a| !a.completed)
        .map(|a| (plan_score(a, now), a))
        .collect();

    // sort_by is stable, so ties keep relative input order
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut blocks = Vec::new();
    for (_, assignment) in scored {
        let total_sessions = assignment.estimated_minutes.div_ceil(BLOCK_MINUTES);
        for i in 0..total_sessions {
            blocks.push(StudyBlock {
                assignment_id: assignment.id.clone(),
                title: assignment.title.clone(),
                course: assignment.course.clone(),
                due_date: assignment.due_date,
                priority: assignment.priority,
                session_number: i + 1,
                total_sessions,
                duration_minutes: BLOCK_MINUTES.min(assignment.estimated_minutes - i * BLOCK_MINUTES),
            });
        }
    }

    let total_minutes = blocks.iter().map(|b| b.duration_minutes).sum();
    StudyPlan {
        blocks,
        total_minutes,
    }
}

/// Urgency/priority score; higher means schedule sooner.
fn plan_score(assignment: &Assignment, now: DateTime<Utc>) -> f64 {
    let days_until_due = (assignment.due_date - now).num_seconds() as f64 / 86_400.0;
    let urgency = (10.0 - days_until_due).max(0.0);
    2.0 * urgency + 1.5 * f64::from(assignment.priority.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment(id: &str, estimated_minutes: u32, priority: Priority, due: DateTime<Utc>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: id.to_string(),
            title: format!("Assignment {}", id),
            description: String::new(),
            due_date: due,
            priority,
            estimated_minutes,
            course: "MATH101".to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_blocks_split_at_45_minutes() {
        let now = Utc::now();
        let plan = generate_plan(&[assignment("a", 100, Priority::High, now)], now);

        let durations: Vec<u32> = plan.blocks.iter().map(|b| b.duration_minutes).collect();
        assert_eq!(durations, vec![45, 45, 10]);
        assert!(plan.blocks.iter().all(|b| b.total_sessions == 3));
        assert_eq!(
            plan.blocks.iter().map(|b| b.session_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(plan.total_minutes, 100);
    }

    #[test]
    fn test_exact_multiple_produces_full_blocks() {
        let now = Utc::now();
        let plan = generate_plan(&[assignment("a", 90, Priority::Medium, now)], now);

        let durations: Vec<u32> = plan.blocks.iter().map(|b| b.duration_minutes).collect();
        assert_eq!(durations, vec![45, 45]);
    }

    #[test]
    fn test_overdue_beats_distant_regardless_of_priority() {
        let now = Utc::now();
        let overdue = assignment("overdue", 45, Priority::Low, now - Duration::days(2));
        let distant = assignment("distant", 45, Priority::High, now + Duration::days(20));
        let plan = generate_plan(&[distant, overdue], now);

        // Overdue low: 2*10 + 1.5*1 = 21.5; distant high: 0 + 4.5
        assert_eq!(plan.blocks[0].assignment_id, "overdue");
        assert_eq!(plan.blocks[1].assignment_id, "distant");
    }

    #[test]
    fn test_priority_breaks_same_due_date() {
        let now = Utc::now();
        let due = now + Duration::days(3);
        let plan = generate_plan(
            &[
                assignment("low", 45, Priority::Low, due),
                assignment("high", 45, Priority::High, due),
            ],
            now,
        );

        assert_eq!(plan.blocks[0].assignment_id, "high");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let now = Utc::now();
        let due = now + Duration::days(1);
        let plan = generate_plan(
            &[
                assignment("first", 45, Priority::Medium, due),
                assignment("second", 45, Priority::Medium, due),
            ],
            now,
        );

        assert_eq!(plan.blocks[0].assignment_id, "first");
        assert_eq!(plan.blocks[1].assignment_id, "second");
    }

    #[test]
    fn test_completed_assignments_are_skipped() {
        let now = Utc::now();
        let mut done = assignment("done", 45, Priority::High, now);
        done.completed = true;
        let plan = generate_plan(&[done], now);

        assert!(plan.is_empty());
        assert_eq!(plan.total_minutes, 0);
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        let plan = generate_plan(&[], Utc::now());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_blocks_are_not_interleaved() {
        let now = Utc::now();
        let plan = generate_plan(
            &[
                assignment("a", 90, Priority::High, now),
                assignment("b", 90, Priority::Low, now + Duration::days(5)),
            ],
            now,
        );

        let ids: Vec<&str> = plan.blocks.iter().map(|b| b.assignment_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a", "b", "b"]);
    }
}
