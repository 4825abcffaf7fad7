//! Lazy depth-first traversal of a directory tree.
//!
//! The [`Walker`] lists one directory at a time, and only when every entry it
//! already listed has been pulled. A directory's direct children are yielded
//! before anything below them; subdirectories are then descended depth-first
//! in the order they were listed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use crate::entry::{Entry, EntryKind};
use crate::error::SiftError;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Which entry kinds a traversal yields. Directories are always descended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    FilesOnly,
    FilesAndDirs,
    DirsOnly,
}

impl Scope {
    pub fn includes(self, kind: EntryKind) -> bool {
        match (self, kind) {
            (Self::FilesAndDirs, _) => true,
            (Self::FilesOnly, EntryKind::File) => true,
            (Self::DirsOnly, EntryKind::Dir) => true,
            _ => false,
        }
    }

    pub fn includes_dirs(self) -> bool {
        self != Self::FilesOnly
    }
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Counts of everything listed so far, matched or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkCounts {
    pub files: usize,
    pub dirs: usize,
}

/// A single, non-restartable traversal of the tree under a root.
///
/// The first error ends the traversal: the failing pull yields `Err` and
/// every later pull yields `None`.
pub struct Walker {
    source: Arc<dyn Source>,
    scope: Scope,
    absolute: bool,
    /// Directories still to list: (filesystem path, display path, depth).
    pending: Vec<(PathBuf, PathBuf, usize)>,
    ready: vec::IntoIter<Entry>,
    counts: WalkCounts,
    done: bool,
}

impl Walker {
    /// Start a traversal of `root`.
    ///
    /// Fails with [`SiftError::NotADirectory`] before any listing if `root`
    /// is not an existing directory. Absolute traversals resolve the root
    /// through [`Source::resolve`] and yield full paths; the others yield
    /// bare names.
    pub fn new(
        source: Arc<dyn Source>,
        root: &Path,
        scope: Scope,
        absolute: bool,
    ) -> Result<Self, SiftError> {
        if !source.is_dir(root) {
            return Err(SiftError::NotADirectory(root.to_path_buf()));
        }

        let root = if absolute {
            source.resolve(root)?
        } else {
            root.to_path_buf()
        };

        Ok(Self {
            source,
            scope,
            absolute,
            pending: vec![(root.clone(), root, 0)],
            ready: Vec::new().into_iter(),
            counts: WalkCounts::default(),
            done: false,
        })
    }

    /// Files and directories listed so far.
    pub fn counts(&self) -> WalkCounts {
        self.counts
    }

    /// List one directory, queue its in-scope children and its subdirectories.
    fn expand(&mut self, dir: &Path, shown: &Path, depth: usize) -> Result<(), SiftError> {
        let listing = self.source.list(dir)?;
        tracing::trace!(dir = %dir.display(), entries = listing.len(), "listed directory");

        let mut ready = Vec::with_capacity(listing.len());
        let mut subdirs = Vec::new();

        for item in listing {
            let fs_path = dir.join(&item.name);
            let path = if self.absolute {
                shown.join(&item.name)
            } else {
                PathBuf::from(&item.name)
            };

            match item.kind {
                EntryKind::Dir => {
                    self.counts.dirs += 1;
                    subdirs.push((fs_path, path.clone(), depth + 1));
                }
                EntryKind::File => self.counts.files += 1,
            }

            if self.scope.includes(item.kind) {
                ready.push(Entry {
                    path,
                    name: item.name.to_string_lossy().into_owned(),
                    kind: item.kind,
                    depth: depth + 1,
                });
            }
        }

        // Stack: first listed subdirectory ends up on top.
        self.pending.extend(subdirs.into_iter().rev());
        self.ready = ready.into_iter();
        Ok(())
    }
}

impl Iterator for Walker {
    type Item = Result<Entry, SiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(entry) = self.ready.next() {
                return Some(Ok(entry));
            }

            let Some((dir, shown, depth)) = self.pending.pop() else {
                self.done = true;
                return None;
            };

            if let Err(e) = self.expand(&dir, &shown, depth) {
                self.done = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

impl std::iter::FusedIterator for Walker {}
