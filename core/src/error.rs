use std::path::PathBuf;
use thiserror::Error;

/// Failures the ranking core reports to its caller.
///
/// Searching never fails and neither does fitting already-typed documents;
/// only turning raw input into documents can.
#[derive(Error, Debug)]
pub enum RankError {
    /// The collection could not be parsed into the document shape.
    #[error("invalid corpus: {context}: {source}")]
    InvalidCorpus {
        context: String,
        source: serde_json::Error,
    },

    #[error("IO error: {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RankError {
    pub(crate) fn invalid(context: impl Into<String>, source: serde_json::Error) -> Self {
        RankError::InvalidCorpus { context: context.into(), source }
    }

    pub fn is_invalid_corpus(&self) -> bool {
        matches!(self, RankError::InvalidCorpus { .. })
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
