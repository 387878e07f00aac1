// Error taxonomy shared by the generation pipeline and the CLI
use std::path::PathBuf;
use thiserror::Error;

/// Typed failures of the scaffolding pipeline.
///
/// Parsing and extraction failures are recoverable: callers surface them as
/// warnings and fall back to manual entry or skip the item. `AlreadyExists` is
/// a decision point for the user (`--force`), not a fatal condition.
#[derive(Debug, Error)]
pub enum LppError {
    /// The signature did not have the `returnType name(params)` shape
    #[error("malformed signature: {0:?}")]
    MalformedSignature(String),

    /// The target solution file is present and overwrite was not requested
    #[error("solution file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// No usable signature (or other required data) could be derived
    #[error("extraction failed for problem #{id}: {reason}")]
    ExtractionFailure { id: String, reason: String },

    /// Reading or writing a JSON store failed
    #[error("metadata store {}: {message}", .path.display())]
    PersistenceFailure { path: PathBuf, message: String },

    /// Paid-only problems are rejected before any generation work
    #[error("problem #{id} ({title}) is paid-only")]
    PaidOnly { id: String, title: String },

    #[error("template rendering failed: {0}")]
    Template(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn extraction(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure should degrade to a warning plus fallback path
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedSignature(_)
                | Self::ExtractionFailure { .. }
                | Self::AlreadyExists(_)
                | Self::PaidOnly { .. }
        )
    }
}

pub type LppResult<T> = Result<T, LppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LppError::MalformedSignature("int (".to_string());
        assert_eq!(err.to_string(), "malformed signature: \"int (\"");

        let err = LppError::AlreadyExists(PathBuf::from("src/Problems/1_Two_Sum.h"));
        assert_eq!(
            err.to_string(),
            "solution file already exists: src/Problems/1_Two_Sum.h"
        );

        let err = LppError::extraction("42", "no cpp snippet");
        assert_eq!(err.to_string(), "extraction failed for problem #42: no cpp snippet");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(LppError::MalformedSignature(String::new()).is_recoverable());
        assert!(LppError::extraction("1", "x").is_recoverable());
        assert!(!LppError::persistence("metadata.json", "denied").is_recoverable());
        assert!(!LppError::Template("bad".into()).is_recoverable());
    }
}
