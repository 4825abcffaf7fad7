use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    // Traversal
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("filesystem error at {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Query compilation
    #[error("invalid extension filter: {0}")]
    InvalidFilterSyntax(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid strictness level {0} (expected 0..=5)")]
    InvalidStrictness(u8),

    #[error("too many terms to permute: {count} (max {max})")]
    TooManyTerms { count: usize, max: usize },

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl SiftError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Failed at: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotADirectory(p) | Self::Filesystem { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the error comes from compiling the query rather than from
    /// touching the filesystem. Query errors are raised before any I/O.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilterSyntax(_)
                | Self::InvalidPattern(_)
                | Self::InvalidStrictness(_)
                | Self::TooManyTerms { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
