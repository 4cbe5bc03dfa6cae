use serde::{Deserialize, Serialize};

/// Subscription class governing capacity and feature gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Free,
    Premium,
}

impl Tier {
    pub fn is_premium(&self) -> bool {
        matches!(self, Tier::Premium)
    }

    /// Policy bundle for this tier. Stores consult the bundle instead
    /// of branching on the tier directly, so limit changes or new
    /// tiers stay configuration rather than code changes.
    pub fn limits(&self) -> TierLimits {
        match self {
            Tier::Free => TierLimits {
                max_assignments: Some(TierLimits::FREE_MAX_ASSIGNMENTS),
                max_daily_sessions: Some(TierLimits::FREE_MAX_DAILY_SESSIONS),
                default_session_minutes: TierLimits::DEFAULT_SESSION_MINUTES,
                custom_duration: false,
            },
            Tier::Premium => TierLimits {
                max_assignments: None,
                max_daily_sessions: None,
                default_session_minutes: TierLimits::DEFAULT_SESSION_MINUTES,
                custom_duration: true,
            },
        }
    }
}

/// Read-only capacity policy consulted by the stores at write time.
/// `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    pub max_assignments: Option<u32>,
    pub max_daily_sessions: Option<u32>,
    /// The standard pomodoro length, and the only length the free tier may use.
    pub default_session_minutes: u32,
    /// Whether session length may deviate from the default.
    pub custom_duration: bool,
}

impl TierLimits {
    pub const FREE_MAX_ASSIGNMENTS: u32 = 10;
    pub const FREE_MAX_DAILY_SESSIONS: u32 = 5;
    pub const DEFAULT_SESSION_MINUTES: u32 = 25;
}
