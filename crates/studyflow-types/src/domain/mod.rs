mod assignment;
mod session;
mod tier;

pub use assignment::{Assignment, AssignmentDraft, AssignmentPatch, AssignmentSort, Priority};
pub use session::{ActiveSession, HistoryFilter, Session, SessionDraft, SessionKind};
pub use tier::{Tier, TierLimits};
