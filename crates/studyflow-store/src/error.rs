use std::fmt;

/// Result type for studyflow-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// Domain rule violation (validation, not-found, tier limits, double termination)
    Domain(studyflow_types::Error),

    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// A stored value could not be decoded back into a record
    Decode(String),
}

impl Error {
    /// The domain error, if this failure came from a business rule.
    pub fn domain(&self) -> Option<&studyflow_types::Error> {
        match self {
            Error::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Domain(err) => write!(f, "{}", err),
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Domain(err) => Some(err),
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Decode(_) => None,
        }
    }
}

impl From<studyflow_types::Error> for Error {
    fn from(err: studyflow_types::Error) -> Self {
        Error::Domain(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
