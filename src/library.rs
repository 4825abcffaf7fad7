use std::path::PathBuf;
use std::sync::Arc;
use std::vec;

use crate::builder::Matches;
use crate::entry::Entry;
use crate::error::SiftError;
use crate::policy::MatchPolicy;
use crate::query::Query;
use crate::source::FsSource;
use crate::terms::Terms;
use crate::traits::{Matcher, Source};
use crate::walker::Walker;

/// An ordered set of roots searched as one.
///
/// Roots may be directories or single files. Paths that do not exist when
/// added are dropped.
#[derive(Debug, Clone, Default)]
pub struct Library {
    roots: Vec<PathBuf>,
}

impl Library {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut library = Self::default();
        for path in paths {
            library.push(path);
        }
        library
    }

    /// Add a root. Returns `false` (and keeps nothing) if it does not exist.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "dropping missing library root");
            return false;
        }
        self.roots.push(path);
        true
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Search every root in order with one compiled query.
    ///
    /// Directory roots are walked; file roots are tested against the query
    /// directly. Results are absolute paths, chained lazily root by root.
    pub fn search(
        &self,
        terms: impl Into<Terms>,
        policy: &MatchPolicy,
    ) -> Result<LibraryMatches, SiftError> {
        let query = Arc::new(Query::compile(&terms.into(), policy)?);
        Ok(LibraryMatches {
            roots: self.roots.clone().into_iter(),
            source: Arc::new(FsSource::new()),
            query,
            current: None,
            done: false,
        })
    }
}

/// Lazy results of a [`Library`] search. The first `Err` ends the sequence.
pub struct LibraryMatches {
    roots:   vec::IntoIter<PathBuf>,
    source:  Arc<dyn Source>,
    query:   Arc<Query>,
    current: Option<Matches>,
    done:    bool,
}

impl Iterator for LibraryMatches {
    type Item = Result<PathBuf, SiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(current) = self.current.as_mut() {
                match current.next() {
                    Some(Ok(path)) => return Some(Ok(path)),
                    Some(Err(e)) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }

            let Some(root) = self.roots.next() else {
                self.done = true;
                return None;
            };

            if self.source.is_dir(&root) {
                let scope = self.query.scope();
                match Walker::new(Arc::clone(&self.source), &root, scope, true) {
                    Ok(walker) => {
                        let matcher: Arc<dyn Matcher> = self.query.clone();
                        self.current = Some(Matches::new(walker, matcher));
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            } else {
                let entry = Entry::from_path(root);
                if self.query.scope().includes(entry.kind) && self.query.is_match(&entry) {
                    return Some(Ok(entry.path));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for LibraryMatches {}
