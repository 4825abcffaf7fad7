use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::entry::Entry;
use crate::error::SiftError;
use crate::policy::MatchPolicy;
use crate::query::Query;
use crate::results::{Hit, Results, ScanStats};
use crate::source::FsSource;
use crate::terms::{Strictness, Terms};
use crate::traits::{Matcher, Source};
use crate::walker::{Scope, Walker};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`treesift::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) for a lazy
/// iterator or [`run_ranked()`](SearchBuilder::run_ranked) for a sorted list.
///
/// # Example
///
/// ```rust,ignore
/// let hits = treesift::search("~/music")
///     .terms(["north", "nights"])
///     .strictness(Strictness::AllInOrderTight)
///     .extensions("mp3 flac")
///     .run()?;
/// ```
pub struct SearchBuilder {
    root:     PathBuf,
    terms:    Terms,
    policy:   MatchPolicy,
    absolute: bool,
    source:   Option<Arc<dyn Source>>,
    matcher:  Option<Arc<dyn Matcher>>,
}

impl SearchBuilder {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            terms:    Terms::default(),
            policy:   MatchPolicy::default(),
            absolute: true,
            source:   None,
            matcher:  None,
        }
    }

    // ── Terms ─────────────────────────────────────────────────────────────

    /// Set the search terms.
    ///
    /// A string is split on whitespace; a list is taken word for word.
    /// No terms means every entry matches.
    pub fn terms(mut self, terms: impl Into<Terms>) -> Self {
        self.terms = terms.into();
        self
    }

    // ── Policy ────────────────────────────────────────────────────────────

    /// Replace the whole matching policy.
    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Only accept files with one of these suffixes, e.g. `"jpg png"`.
    pub fn extensions(mut self, spec: impl Into<String>) -> Self {
        self.policy.extensions = spec.into();
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.policy.case_sensitive = yes;
        self
    }

    /// Yield the entries that do not match.
    pub fn negate(mut self, yes: bool) -> Self {
        self.policy.negate = yes;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.policy.scope = scope;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.policy.strictness = strictness;
        self
    }

    /// Match against entry names (the default) or full paths.
    pub fn match_on_name(mut self, yes: bool) -> Self {
        self.policy.match_on_name = yes;
        self
    }

    /// Characters allowed between terms in tight modes.
    pub fn tight_gap(mut self, chars: impl Into<String>) -> Self {
        self.policy.tight_gap = chars.into();
        self
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Yield absolute paths (the default) or bare names.
    pub fn absolute(mut self, yes: bool) -> Self {
        self.absolute = yes;
        self
    }

    /// Walk something other than the local filesystem.
    ///
    /// Defaults to [`FsSource`] in OS listing order.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Arc::new(s));
        self
    }

    /// Replace the compiled query with a custom matcher.
    ///
    /// Terms, extensions, case, negation and strictness are then ignored;
    /// scope and absoluteness still apply.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Arc::new(m));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Start the search and return its lazy result sequence.
    ///
    /// Nothing is listed until the iterator is pulled.
    ///
    /// # Errors
    ///
    /// Query errors ([`SiftError::InvalidFilterSyntax`],
    /// [`SiftError::InvalidPattern`], [`SiftError::TooManyTerms`]) come
    /// first, then [`SiftError::NotADirectory`] if the root is not a
    /// directory. Failures during the walk arrive through the iterator.
    pub fn run(self) -> Result<Matches, SiftError> {
        let matcher: Arc<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None => Arc::new(Query::compile(&self.terms, &self.policy)?),
        };

        let source: Arc<dyn Source> = match self.source {
            Some(s) => s,
            None => Arc::new(FsSource::new()),
        };
        let walker = Walker::new(source, &self.root, self.policy.scope, self.absolute)?;

        tracing::debug!(
            root = %self.root.display(),
            scope = ?self.policy.scope,
            absolute = self.absolute,
            "starting search"
        );

        Ok(Matches::new(walker, matcher))
    }

    /// Run the whole search and rank the matches by score, highest first.
    ///
    /// Unlike [`run()`](SearchBuilder::run) this walks the entire tree before
    /// returning. Equal scores keep walk order.
    ///
    /// # Errors
    ///
    /// Everything [`run()`](SearchBuilder::run) can return, plus the first
    /// failure met during the walk.
    pub fn run_ranked(self) -> Result<Results, SiftError> {
        self.run()?.rank()
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Lazy sequence of matching paths, in walk order.
///
/// The first `Err` ends the sequence.
pub struct Matches {
    walker:  Walker,
    matcher: Arc<dyn Matcher>,
    matched: usize,
    started: Instant,
}

impl Matches {
    pub(crate) fn new(walker: Walker, matcher: Arc<dyn Matcher>) -> Self {
        Self {
            walker,
            matcher,
            matched: 0,
            started: Instant::now(),
        }
    }

    /// Matches yielded so far.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Counts of everything listed so far and the time since the search started.
    pub fn stats(&self) -> ScanStats {
        let counts = self.walker.counts();
        ScanStats::compute(counts.files, counts.dirs, self.started.elapsed())
    }

    /// Yield whole [`Entry`] values instead of paths.
    pub fn into_entries(mut self) -> impl Iterator<Item = Result<Entry, SiftError>> {
        std::iter::from_fn(move || self.next_entry())
    }

    fn next_entry(&mut self) -> Option<Result<Entry, SiftError>> {
        for res in self.walker.by_ref() {
            match res {
                Ok(entry) => {
                    if self.matcher.is_match(&entry) {
                        self.matched += 1;
                        return Some(Ok(entry));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    fn rank(mut self) -> Result<Results, SiftError> {
        let mut hits = Vec::new();
        while let Some(res) = self.next_entry() {
            let entry = res?;
            let score = self.matcher.score(&entry);
            hits.push(Hit {
                path: entry.path,
                score,
            });
        }

        // Stable: ties keep walk order
        hits.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(Results {
            matches: hits.len(),
            hits,
            stats: self.stats(),
        })
    }
}

impl Iterator for Matches {
    type Item = Result<PathBuf, SiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|res| res.map(|entry| entry.path))
    }
}

impl std::iter::FusedIterator for Matches {}
