use crate::error::SiftError;

/// How search terms must appear in a candidate.
///
/// Tight modes only tolerate the policy's gap characters (space, underscore
/// and hyphen by default) between consecutive terms. Interrupted modes
/// tolerate anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Any single term, anywhere.
    Any,
    /// All terms, in any order, anything in between.
    #[default]
    AllAnyOrderInterrupted,
    /// All terms, in any order, only gap characters in between.
    AllAnyOrderTight,
    /// All terms in the given order, anything in between.
    AllInOrderInterrupted,
    /// All terms in the given order, only gap characters in between.
    AllInOrderTight,
    /// The raw term string is already a regular expression.
    Preformatted,
}

impl Strictness {
    pub fn is_tight(self) -> bool {
        matches!(self, Self::AllAnyOrderTight | Self::AllInOrderTight)
    }

    pub fn is_any_order(self) -> bool {
        matches!(self, Self::AllAnyOrderInterrupted | Self::AllAnyOrderTight)
    }

    /// The historical numeric level, `0..=5`.
    pub fn level(self) -> u8 {
        match self {
            Self::Any => 0,
            Self::AllAnyOrderInterrupted => 1,
            Self::AllAnyOrderTight => 2,
            Self::AllInOrderInterrupted => 3,
            Self::AllInOrderTight => 4,
            Self::Preformatted => 5,
        }
    }
}

impl TryFrom<u8> for Strictness {
    type Error = SiftError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Ok(match level {
            0 => Self::Any,
            1 => Self::AllAnyOrderInterrupted,
            2 => Self::AllAnyOrderTight,
            3 => Self::AllInOrderInterrupted,
            4 => Self::AllInOrderTight,
            5 => Self::Preformatted,
            other => return Err(SiftError::InvalidStrictness(other)),
        })
    }
}

/// Ordered search terms plus the raw string they came from.
///
/// Built from a `&str`, the words are its whitespace-separated pieces and the
/// raw string is kept verbatim for [`Strictness::Preformatted`]. Built from a
/// list, the raw string is the words joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terms {
    words: Vec<String>,
    raw: String,
}

impl Terms {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let raw = words.join(" ");
        Self { words, raw }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The same words, last first.
    pub fn reversed(&self) -> Self {
        Self::new(self.words.iter().rev().cloned())
    }
}

impl From<&str> for Terms {
    fn from(raw: &str) -> Self {
        Self {
            words: raw.split_whitespace().map(str::to_owned).collect(),
            raw: raw.to_owned(),
        }
    }
}

impl From<String> for Terms {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Vec<String>> for Terms {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<&[&str]> for Terms {
    fn from(words: &[&str]) -> Self {
        Self::new(words.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Terms {
    fn from(words: [&str; N]) -> Self {
        Self::new(words)
    }
}
