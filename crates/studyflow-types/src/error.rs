use std::fmt;

/// Result type for studyflow-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across the domain layer.
///
/// Every variant is terminal for the triggering call; none represent
/// transient conditions, so callers never retry internally. The
/// surrounding surface (CLI, or a future transport) maps each kind to
/// a user-visible message using the context carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Required input is missing or malformed; the caller must fix the request.
    Validation(String),

    /// The referenced record does not exist for this user.
    NotFound { entity: &'static str, id: String },

    /// A tier capacity or capability gate was hit.
    LimitExceeded {
        /// The applicable limit (record count, daily cap, or fixed duration).
        limit: u32,
        /// Whether upgrading to premium would lift the gate.
        requires_premium: bool,
        /// Short human-readable hint for rendering.
        hint: &'static str,
    },

    /// Session termination was requested a second time.
    AlreadyEnded(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::NotFound { entity, id } => write!(f, "{} not found: {}", entity, id),
            Error::LimitExceeded {
                limit,
                requires_premium,
                hint,
            } => {
                if *requires_premium {
                    write!(f, "Limit reached ({}): {}", limit, hint)
                } else {
                    write!(f, "Limit reached ({})", limit)
                }
            }
            Error::AlreadyEnded(id) => write!(f, "Session already ended: {}", id),
        }
    }
}

impl std::error::Error for Error {}
