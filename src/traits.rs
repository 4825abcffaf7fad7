use std::path::{Path, PathBuf};

use crate::entry::{Entry, Listing};
use crate::error::SiftError;

/// The filesystem capability the walker consumes.
///
/// [`FsSource`](crate::FsSource) implements this on the real filesystem.
/// Implement it yourself to search an in-memory tree, an archive, or a
/// remote listing API.
///
/// # Thread Safety
///
/// `Send + Sync` are required so a running search can be moved to another
/// thread. The walker itself is single-threaded.
///
/// # Error Handling
///
/// A failed [`list`](Source::list) aborts the whole search. Return
/// [`SiftError::Filesystem`] for I/O failures and [`SiftError::Source`] for
/// anything else.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use treesift::{Listing, SiftError, Source};
///
/// struct Flat(Vec<&'static str>);
///
/// impl Source for Flat {
///     fn is_dir(&self, path: &Path) -> bool {
///         path == Path::new("/")
///     }
///
///     fn list(&self, _dir: &Path) -> Result<Vec<Listing>, SiftError> {
///         Ok(self.0.iter().map(|n| Listing::file(*n)).collect())
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Whether `path` denotes an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Turn a root into the absolute form yielded by absolute searches.
    fn resolve(&self, path: &Path) -> Result<PathBuf, SiftError> {
        Ok(path.to_path_buf())
    }

    /// List the direct children of `dir` with their kinds.
    fn list(&self, dir: &Path) -> Result<Vec<Listing>, SiftError>;
}

/// Determines whether an entry is a match.
///
/// [`Query`](crate::Query) is the built-in implementation. Plug a custom one
/// in with [`SearchBuilder::with_matcher`](crate::SearchBuilder::with_matcher).
///
/// # Example
///
/// ```rust
/// use treesift::{Entry, Matcher};
///
/// struct Hidden;
///
/// impl Matcher for Hidden {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.name.starts_with('.')
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be included in results.
    fn is_match(&self, entry: &Entry) -> bool;

    /// Ranking weight of a matching entry. Higher sorts first.
    fn score(&self, entry: &Entry) -> usize {
        usize::from(self.is_match(entry))
    }
}
