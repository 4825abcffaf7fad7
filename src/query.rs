//! Compiling terms and a [`MatchPolicy`] into a single entry predicate.
//!
//! Terms become one regular expression. Any-order modes compile the
//! alternation of every distinct permutation of the escaped terms, so the
//! pattern grows factorially with the term count; [`MAX_PERMUTED_TERMS`]
//! caps it. In-order modes compile only the given order. Consecutive terms
//! are joined by `.*` in interrupted modes and by a repeated character class
//! of the policy's gap characters in tight modes.

use std::collections::HashSet;
use std::path::PathBuf;

use regex::{Regex, RegexBuilder};

use crate::entry::{Entry, EntryKind};
use crate::error::SiftError;
use crate::extensions::ExtensionFilter;
use crate::policy::MatchPolicy;
use crate::terms::{Strictness, Terms};
use crate::traits::Matcher;
use crate::walker::Scope;

/// Most terms an any-order mode will permute (6! = 720 alternatives).
pub const MAX_PERMUTED_TERMS: usize = 6;

const LOOSE_GAP: &str = ".*";

/// A compiled search predicate.
#[derive(Debug, Clone)]
pub struct Query {
    pattern: Regex,
    extensions: ExtensionFilter,
    negate: bool,
    scope: Scope,
    match_on_name: bool,
}

impl Query {
    pub fn compile(terms: &Terms, policy: &MatchPolicy) -> Result<Self, SiftError> {
        let extensions = ExtensionFilter::parse(&policy.extensions)?;
        let source = term_pattern(terms, policy.strictness, &policy.tight_gap)?;
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(!policy.case_sensitive)
            .build()
            .map_err(|e| SiftError::InvalidPattern(e.to_string()))?;

        tracing::debug!(
            strictness = ?policy.strictness,
            pattern = %source,
            extensions = ?extensions.suffixes(),
            negate = policy.negate,
            "compiled query"
        );

        Ok(Self {
            pattern,
            extensions,
            negate: policy.negate,
            scope: policy.scope,
            match_on_name: policy.match_on_name,
        })
    }

    /// The compiled term pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn extensions(&self) -> &ExtensionFilter {
        &self.extensions
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Keep the paths, out of any sequence, that this query accepts.
    ///
    /// Each path's kind is read once; kinds outside the query's scope are
    /// dropped.
    pub fn filter_paths<'q, I>(&'q self, paths: I) -> impl Iterator<Item = PathBuf> + 'q
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
        I::IntoIter: 'q,
    {
        paths.into_iter().filter_map(move |path| {
            let entry = Entry::from_path(path.into());
            (self.scope.includes(entry.kind) && self.is_match(&entry)).then_some(entry.path)
        })
    }
}

impl Matcher for Query {
    /// Files must satisfy the term pattern and the extension filter;
    /// directories only the term pattern.
    ///
    /// Negation inverts the whole file result when the scope is files only.
    /// With directories in scope it inverts the term result alone and the
    /// extension filter still applies to files.
    fn is_match(&self, entry: &Entry) -> bool {
        let candidate = entry.candidate(self.match_on_name);
        let term = self.pattern.is_match(&candidate);

        match entry.kind {
            EntryKind::Dir => term != self.negate,
            EntryKind::File => {
                let ext = self.extensions.is_match(&entry.name);
                if self.scope.includes_dirs() {
                    (term != self.negate) && ext
                } else {
                    (term && ext) != self.negate
                }
            }
        }
    }

    /// Number of non-overlapping term-pattern matches in the candidate.
    fn score(&self, entry: &Entry) -> usize {
        let candidate = entry.candidate(self.match_on_name);
        self.pattern.find_iter(&candidate).count()
    }
}

// ---------------------------------------------------------------------------
// Pattern construction
// ---------------------------------------------------------------------------

pub(crate) fn term_pattern(
    terms: &Terms,
    strictness: Strictness,
    tight_gap: &str,
) -> Result<String, SiftError> {
    let escaped: Vec<String> = terms.words().iter().map(|w| regex::escape(w)).collect();
    let gap = gap(strictness, tight_gap);

    Ok(match strictness {
        Strictness::Preformatted => terms.raw().to_owned(),
        Strictness::Any => escaped.join("|"),
        Strictness::AllInOrderInterrupted | Strictness::AllInOrderTight => escaped.join(&gap),
        Strictness::AllAnyOrderInterrupted | Strictness::AllAnyOrderTight => {
            if escaped.len() > MAX_PERMUTED_TERMS {
                return Err(SiftError::TooManyTerms {
                    count: escaped.len(),
                    max: MAX_PERMUTED_TERMS,
                });
            }

            // Repeated terms produce repeated permutations
            let mut seen = HashSet::new();
            permutations(&escaped)
                .into_iter()
                .map(|perm| perm.join(&gap))
                .filter(|alt| seen.insert(alt.clone()))
                .collect::<Vec<_>>()
                .join("|")
        }
    })
}

fn gap(strictness: Strictness, tight_gap: &str) -> String {
    if !strictness.is_tight() {
        return LOOSE_GAP.to_owned();
    }

    let mut seen = HashSet::new();
    let class: String = tight_gap
        .chars()
        .filter(|c| seen.insert(*c))
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();

    if class.is_empty() {
        String::new()
    } else {
        format!("[{class}]*")
    }
}

fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn file(name: &str) -> Entry {
        Entry {
            path: Path::new("/music").join(name),
            name: name.to_owned(),
            kind: EntryKind::File,
            depth: 1,
        }
    }

    fn dir(name: &str) -> Entry {
        Entry {
            kind: EntryKind::Dir,
            ..file(name)
        }
    }

    fn query(terms: impl Into<Terms>, policy: MatchPolicy) -> Query {
        Query::compile(&terms.into(), &policy).unwrap()
    }

    fn strict(s: Strictness) -> MatchPolicy {
        MatchPolicy::new().strictness(s)
    }

    const CANDIDATES: &[&str] = &[
        "north_nights.mp3",
        "nights-north.mp3",
        "north.mp3",
        "nights.mp3",
        "the north at nights.mp3",
        "nights of the north.flac",
        "nightsnorth",
        "North Nights Live.mp3",
        "north - - nights",
        "southern.mp3",
    ];

    fn matching(q: &Query) -> HashSet<&'static str> {
        CANDIDATES
            .iter()
            .copied()
            .filter(|c| q.is_match(&file(c)))
            .collect()
    }

    #[test]
    fn any_matches_a_single_term() {
        let q = query("north nights", strict(Strictness::Any));
        assert!(q.is_match(&file("north.mp3")));
        assert!(q.is_match(&file("nights.mp3")));
        assert!(!q.is_match(&file("southern.mp3")));
    }

    #[test]
    fn any_order_interrupted_needs_every_term() {
        let q = query(["north", "nights"], strict(Strictness::AllAnyOrderInterrupted));
        assert!(q.is_match(&file("nights of the north.flac")));
        assert!(q.is_match(&file("north_nights.mp3")));
        assert!(!q.is_match(&file("north.mp3")));
    }

    #[test]
    fn any_order_tight_allows_only_gap_chars() {
        let q = query(["north", "nights"], strict(Strictness::AllAnyOrderTight));
        assert!(q.is_match(&file("nights-north.mp3")));
        assert!(q.is_match(&file("north - - nights")));
        assert!(q.is_match(&file("nightsnorth")));
        assert!(!q.is_match(&file("nights of the north.flac")));
    }

    #[test]
    fn in_order_interrupted_respects_order() {
        let q = query(["north", "nights"], strict(Strictness::AllInOrderInterrupted));
        assert!(q.is_match(&file("the north at nights.mp3")));
        assert!(!q.is_match(&file("nights of the north.flac")));
    }

    #[test]
    fn in_order_tight_matches_only_the_literal_order() {
        let q = query(["north", "nights"], strict(Strictness::AllInOrderTight));
        assert!(q.is_match(&file("north_nights.mp3")));
        assert!(!q.is_match(&file("north.mp3")));

        let reversed = query(["nights", "north"], strict(Strictness::AllInOrderTight));
        assert!(!reversed.is_match(&file("north_nights.mp3")));
        assert!(!reversed.is_match(&file("north.mp3")));
    }

    #[test]
    fn preformatted_is_compiled_verbatim() {
        let q = query(r"^n\w+s\.mp3$", strict(Strictness::Preformatted));
        assert!(q.is_match(&file("nights.mp3")));
        assert!(!q.is_match(&file("north.mp3")));
    }

    #[test]
    fn preformatted_rejects_bad_regex() {
        let err = Query::compile(&"(unclosed".into(), &strict(Strictness::Preformatted)).unwrap_err();
        assert!(matches!(err, SiftError::InvalidPattern(_)));
    }

    #[test]
    fn terms_are_escaped_outside_preformatted() {
        let q = query("a.b", strict(Strictness::Any));
        assert!(q.is_match(&file("a.b")));
        assert!(!q.is_match(&file("axb")));
    }

    #[test]
    fn case_rule() {
        let insensitive = query("NORTH", strict(Strictness::Any));
        assert!(insensitive.is_match(&file("north.mp3")));

        let sensitive = query("NORTH", strict(Strictness::Any).case_sensitive(true));
        assert!(!sensitive.is_match(&file("north.mp3")));
        assert!(sensitive.is_match(&file("NORTH.mp3")));
    }

    #[test]
    fn empty_terms_match_everything() {
        for level in 0..=4u8 {
            let q = query("", strict(Strictness::try_from(level).unwrap()));
            assert!(q.is_match(&file("whatever")), "level {level}");
        }
    }

    #[test]
    fn too_many_terms_to_permute() {
        let err = Query::compile(&"a b c d e f g".into(), &strict(Strictness::AllAnyOrderTight))
            .unwrap_err();
        assert!(matches!(err, SiftError::TooManyTerms { count: 7, max: 6 }));

        // In-order modes do not permute
        assert!(Query::compile(&"a b c d e f g".into(), &strict(Strictness::AllInOrderTight)).is_ok());
    }

    #[test]
    fn repeated_terms_collapse_permutations() {
        let src = term_pattern(&"a a".into(), Strictness::AllAnyOrderInterrupted, " _-").unwrap();
        assert_eq!(src, "a.*a");
    }

    #[test]
    fn permutation_alternation() {
        let src = term_pattern(&"a b".into(), Strictness::AllAnyOrderTight, " _-").unwrap();
        assert_eq!(src, r"a[ _\-]*b|b[ _\-]*a");
    }

    #[test]
    fn custom_tight_gap() {
        let dotted = strict(Strictness::AllInOrderTight).tight_gap(".");
        let q = query(["north", "nights"], dotted);
        assert!(q.is_match(&file("north.nights")));
        assert!(!q.is_match(&file("north_nights")));

        let adjacent = query(["north", "nights"], strict(Strictness::AllInOrderTight).tight_gap(""));
        assert!(adjacent.is_match(&file("northnights")));
        assert!(!adjacent.is_match(&file("north nights")));
    }

    #[test]
    fn extensions_apply_to_files_only() {
        let policy = strict(Strictness::Any)
            .extensions("mp3")
            .scope(Scope::FilesAndDirs);
        let q = query("north", policy);
        assert!(q.is_match(&file("north.mp3")));
        assert!(!q.is_match(&file("north.flac")));
        assert!(q.is_match(&dir("north")));
    }

    #[test]
    fn negate_files_only_inverts_terms_and_extension() {
        let q = query("north", strict(Strictness::Any).extensions("mp3").negate(true));
        assert!(!q.is_match(&file("north.mp3")));
        assert!(q.is_match(&file("north.flac")));
        assert!(q.is_match(&file("south.mp3")));
    }

    #[test]
    fn negate_with_dirs_inverts_terms_only() {
        let policy = strict(Strictness::Any)
            .extensions("mp3")
            .negate(true)
            .scope(Scope::FilesAndDirs);
        let q = query("north", policy);
        assert!(q.is_match(&file("south.mp3")));
        assert!(!q.is_match(&file("south.flac")));
        assert!(!q.is_match(&file("north.mp3")));
        assert!(q.is_match(&dir("south")));
        assert!(!q.is_match(&dir("north")));
    }

    #[test]
    fn full_path_candidates() {
        let by_name = query("music", strict(Strictness::Any));
        assert!(!by_name.is_match(&file("song.mp3")));

        let by_path = query("music", strict(Strictness::Any).match_on_name(false));
        assert!(by_path.is_match(&file("song.mp3")));
    }

    #[test]
    fn score_counts_non_overlapping_matches() {
        let q = query("an", strict(Strictness::Any));
        assert_eq!(q.score(&file("banana")), 2);
        assert_eq!(q.score(&file("kiwi")), 0);
    }

    #[test]
    fn any_is_a_superset_of_all_modes() {
        let any = matching(&query(["north", "nights"], strict(Strictness::Any)));
        for s in [
            Strictness::AllAnyOrderInterrupted,
            Strictness::AllAnyOrderTight,
            Strictness::AllInOrderInterrupted,
            Strictness::AllInOrderTight,
        ] {
            let narrower = matching(&query(["north", "nights"], strict(s)));
            assert!(narrower.is_subset(&any), "{s:?} matched outside Any");
        }
    }

    #[test]
    fn tight_is_a_subset_of_loose() {
        let pairs = [
            (Strictness::AllAnyOrderTight, Strictness::AllAnyOrderInterrupted),
            (Strictness::AllInOrderTight, Strictness::AllInOrderInterrupted),
        ];
        for (tight, loose) in pairs {
            let tight_set = matching(&query(["north", "nights"], strict(tight)));
            let loose_set = matching(&query(["north", "nights"], strict(loose)));
            assert!(tight_set.is_subset(&loose_set), "{tight:?} vs {loose:?}");
            assert!(!tight_set.is_empty());
        }
    }

    #[test]
    fn filter_paths_reads_kinds() {
        let tmp = tempfile::tempdir().unwrap();
        let song = tmp.path().join("north.mp3");
        std::fs::write(&song, "").unwrap();
        let folder = tmp.path().join("north");
        std::fs::create_dir(&folder).unwrap();

        let q = query("north", strict(Strictness::Any));
        let kept: Vec<PathBuf> = q.filter_paths([song.clone(), folder]).collect();

        assert_eq!(kept, vec![song]);
    }
}
