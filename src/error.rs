//! Crate-level error types.

use std::fmt;

/// Errors produced by the winanim crate.
#[derive(Debug)]
pub enum AnimError {
    /// A record or curve was built from parameters outside their domain
    /// (negative duration, non-finite endpoint, malformed curve).
    InvalidArgument(String),
    /// An operation was attempted in a state that does not support it, such
    /// as reading the value of a pending record that does not wait at source.
    InvalidState(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for AnimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for AnimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnimError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = AnimError::InvalidArgument("duration -5ms".to_owned());
        assert_eq!(err.to_string(), "invalid argument: duration -5ms");
        let err = AnimError::InvalidState("pending".to_owned());
        assert_eq!(err.to_string(), "invalid state: pending");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AnimError::from(io);
        assert!(err.source().is_some());
        assert!(AnimError::OptionsParse("x".to_owned()).source().is_none());
    }
}
