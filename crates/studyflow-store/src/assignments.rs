use chrono::Utc;
use uuid::Uuid;

use studyflow_types::{
    Assignment, AssignmentDraft, AssignmentPatch, AssignmentSort, Error as DomainError, Tier,
};

use crate::backend::Backend;
use crate::{Error, Result};

const DEFAULT_ESTIMATED_MINUTES: u32 = 60;

/// Assignment records for one or more users, with tier capacity rules
/// enforced at write time.
pub struct AssignmentStore<'a, B: Backend> {
    backend: &'a mut B,
}

impl<'a, B: Backend> AssignmentStore<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Create an assignment. Requires a non-empty title and a due
    /// date; rejects the write once the tier's record cap is reached.
    pub fn create(&mut self, user_id: &str, draft: AssignmentDraft, tier: Tier) -> Result<Assignment> {
        let title = match draft.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                return Err(DomainError::Validation(
                    "title and due date are required".to_string(),
                )
                .into());
            }
        };
        let due_date = draft.due_date.ok_or_else(|| {
            DomainError::Validation("title and due date are required".to_string())
        })?;
        let estimated_minutes = draft.estimated_minutes.unwrap_or(DEFAULT_ESTIMATED_MINUTES);
        if estimated_minutes == 0 {
            return Err(
                DomainError::Validation("estimated minutes must be positive".to_string()).into(),
            );
        }

        if let Some(max) = tier.limits().max_assignments {
            let count = self.backend.assignments(user_id)?.len();
            if count as u32 >= max {
                return Err(DomainError::LimitExceeded {
                    limit: max,
                    requires_premium: !tier.is_premium(),
                    hint: "upgrade to premium for unlimited assignments",
                }
                .into());
            }
        }

        let now = Utc::now();
        let record = Assignment {
            id: Uuid::new_v4().to_string(),
            title,
            description: draft.description.unwrap_or_default(),
            due_date,
            priority: draft.priority.unwrap_or_default(),
            estimated_minutes,
            course: draft.course.unwrap_or_default(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.backend.insert_assignment(user_id, &record)?;
        Ok(record)
    }

    /// Snapshot of the user's assignments, optionally filtered by
    /// completion status, in the requested order. Never mutates state.
    pub fn list(
        &self,
        user_id: &str,
        completed: Option<bool>,
        sort: AssignmentSort,
    ) -> Result<Vec<Assignment>> {
        let mut records = self.backend.assignments(user_id)?;

        if let Some(flag) = completed {
            records.retain(|a| a.completed == flag);
        }

        match sort {
            AssignmentSort::DueDate => records.sort_by_key(|a| a.due_date),
            AssignmentSort::Priority => records.sort_by(|a, b| b.priority.cmp(&a.priority)),
            AssignmentSort::CreatedAt => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            AssignmentSort::Stored => {}
        }

        Ok(records)
    }

    /// Merge `patch` over the stored record. `id` and `created_at`
    /// cannot be touched; `updated_at` is refreshed on success.
    pub fn update(
        &mut self,
        user_id: &str,
        assignment_id: &str,
        patch: AssignmentPatch,
    ) -> Result<Assignment> {
        let records = self.backend.assignments(user_id)?;
        let Some(mut merged) = records.into_iter().find(|a| a.id == assignment_id) else {
            return Err(not_found(assignment_id));
        };

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(
                    DomainError::Validation("title must not be empty".to_string()).into(),
                );
            }
            merged.title = title;
        }
        if let Some(description) = patch.description {
            merged.description = description;
        }
        if let Some(due_date) = patch.due_date {
            merged.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            merged.priority = priority;
        }
        if let Some(estimated_minutes) = patch.estimated_minutes {
            if estimated_minutes == 0 {
                return Err(DomainError::Validation(
                    "estimated minutes must be positive".to_string(),
                )
                .into());
            }
            merged.estimated_minutes = estimated_minutes;
        }
        if let Some(course) = patch.course {
            merged.course = course;
        }
        if let Some(completed) = patch.completed {
            merged.completed = completed;
        }
        merged.updated_at = Utc::now();

        if !self.backend.replace_assignment(user_id, &merged)? {
            return Err(not_found(assignment_id));
        }
        Ok(merged)
    }

    pub fn delete(&mut self, user_id: &str, assignment_id: &str) -> Result<()> {
        if self.backend.delete_assignment(user_id, assignment_id)? {
            Ok(())
        } else {
            Err(not_found(assignment_id))
        }
    }
}

fn not_found(assignment_id: &str) -> Error {
    DomainError::NotFound {
        entity: "Assignment",
        id: assignment_id.to_string(),
    }
    .into()
}
