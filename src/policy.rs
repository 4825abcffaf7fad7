use crate::terms::Strictness;
use crate::walker::Scope;

/// Characters tolerated between terms in tight modes unless configured otherwise.
pub const DEFAULT_TIGHT_GAP: &str = " _-";

/// Everything about a search except the root and the terms.
///
/// Defaults: no extension filter, case-insensitive, not negated, files only,
/// all terms in any order, matched against entry names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPolicy {
    /// Suffix filter, e.g. `"jpg png"`. See [`ExtensionFilter`](crate::ExtensionFilter).
    pub extensions: String,
    pub case_sensitive: bool,
    /// Yield the entries that do *not* match.
    pub negate: bool,
    pub scope: Scope,
    pub strictness: Strictness,
    /// Match against the entry name rather than its whole path.
    pub match_on_name: bool,
    /// Characters allowed between terms in tight modes.
    pub tight_gap: String,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            extensions:     String::new(),
            case_sensitive: false,
            negate:         false,
            scope:          Scope::default(),
            strictness:     Strictness::default(),
            match_on_name:  true,
            tight_gap:      DEFAULT_TIGHT_GAP.to_owned(),
        }
    }
}

impl MatchPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extensions(mut self, spec: impl Into<String>) -> Self {
        self.extensions = spec.into();
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn negate(mut self, yes: bool) -> Self {
        self.negate = yes;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn match_on_name(mut self, yes: bool) -> Self {
        self.match_on_name = yes;
        self
    }

    pub fn tight_gap(mut self, chars: impl Into<String>) -> Self {
        self.tight_gap = chars.into();
        self
    }
}
