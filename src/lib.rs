//! # treesift
//!
//! Keyword search over directory trees: strictness modes, extension
//! filters, lazy results.
//!
//! treesift walks a directory tree one listing at a time and yields the
//! entries whose names (or full paths) satisfy a compiled query. It owns the
//! walker, the query compiler, the error type and the builder API. The
//! filesystem itself sits behind the [`Source`] trait, so anything that can
//! list a directory can be searched.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//! use treesift::{Scope, Strictness};
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("north_nights.mp3"), "").unwrap();
//! fs::write(dir.path().join("north.mp3"), "").unwrap();
//!
//! let hits: Vec<_> = treesift::search(dir.path())
//!     .terms(["north", "nights"])
//!     .strictness(Strictness::AllInOrderTight)
//!     .extensions("mp3")
//!     .scope(Scope::FilesOnly)
//!     .run()
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(hits.len(), 1);
//! assert!(hits[0].ends_with("north_nights.mp3"));
//! ```
//!
//! # Strictness
//!
//! | Mode | Terms must appear |
//! |---|---|
//! | [`Strictness::Any`] | any one of them |
//! | [`Strictness::AllAnyOrderInterrupted`] | all, any order, anything between |
//! | [`Strictness::AllAnyOrderTight`] | all, any order, only gap characters between |
//! | [`Strictness::AllInOrderInterrupted`] | all, given order, anything between |
//! | [`Strictness::AllInOrderTight`] | all, given order, only gap characters between |
//! | [`Strictness::Preformatted`] | the raw string is a regex |
//!
//! Gap characters default to space, underscore and hyphen; see
//! [`MatchPolicy::tight_gap`].
//!
//! # Custom Sources and Matchers
//!
//! Implement [`Source`] to search something other than the local
//! filesystem, and [`Matcher`] to replace the compiled query:
//!
//! ```rust
//! use treesift::{Entry, Matcher};
//!
//! struct Large;
//!
//! impl Matcher for Large {
//!     fn is_match(&self, entry: &Entry) -> bool {
//!         std::fs::metadata(&entry.path)
//!             .map(|m| m.len() > 1 << 20)
//!             .unwrap_or(false)
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod walker;

mod builder;
mod entry;
mod error;
mod extensions;
mod library;
mod policy;
mod query;
mod results;
mod source;
mod terms;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::{Matches, SearchBuilder};
pub use entry::{Entry, EntryKind, Listing};
pub use error::SiftError;
pub use extensions::{ExtensionFilter, DELIMITERS};
pub use library::{Library, LibraryMatches};
pub use policy::{MatchPolicy, DEFAULT_TIGHT_GAP};
pub use query::{Query, MAX_PERMUTED_TERMS};
pub use results::{Hit, Results, ScanStats};
pub use source::FsSource;
pub use terms::{Strictness, Terms};
pub use traits::{Matcher, Source};
pub use walker::{Scope, Walker};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] rooted at `root`.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("invoice.txt"), "").unwrap();
/// std::fs::write(dir.path().join("report.txt"), "").unwrap();
///
/// let found = treesift::search(dir.path())
///     .terms("invoice")
///     .run()
///     .unwrap()
///     .count();
///
/// assert_eq!(found, 1);
/// ```
pub fn search(root: impl Into<std::path::PathBuf>) -> SearchBuilder {
    SearchBuilder::new(root.into())
}
