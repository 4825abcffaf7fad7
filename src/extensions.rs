use regex::{Regex, RegexBuilder};

use crate::error::SiftError;

/// Characters that may separate suffixes in a filter string. One kind per filter.
pub const DELIMITERS: [char; 4] = [',', '`', '*', ' '];

/// Case-insensitive file-name suffix filter.
///
/// Compiled from strings like `"jpg png"` or `"mp3,flac"`. The empty filter
/// accepts every name.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
    pattern: Option<Regex>,
}

impl ExtensionFilter {
    /// Filter that accepts every name.
    pub fn any() -> Self {
        Self {
            suffixes: Vec::new(),
            pattern: None,
        }
    }

    pub fn parse(spec: &str) -> Result<Self, SiftError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Ok(Self::any());
        }

        let used: Vec<char> = DELIMITERS
            .iter()
            .copied()
            .filter(|d| trimmed.contains(*d))
            .collect();

        let parts: Vec<&str> = match used.as_slice() {
            [] => vec![trimmed],
            [delim] => trimmed.split(*delim).collect(),
            _ => {
                return Err(SiftError::InvalidFilterSyntax(format!(
                    "{spec:?} mixes delimiters {used:?}"
                )))
            }
        };

        let mut suffixes = Vec::with_capacity(parts.len());
        for part in parts {
            let suffix = part.strip_prefix('.').unwrap_or(part);
            if suffix.is_empty() {
                return Err(SiftError::InvalidFilterSyntax(format!(
                    "{spec:?} has an empty extension"
                )));
            }
            if suffix.contains(&['/', '\\'][..]) || suffix.chars().any(char::is_whitespace) {
                return Err(SiftError::InvalidFilterSyntax(format!(
                    "{suffix:?} is not a file extension"
                )));
            }
            suffixes.push(suffix.to_owned());
        }

        let alternatives: Vec<String> = suffixes.iter().map(|s| regex::escape(s)).collect();
        let pattern = RegexBuilder::new(&format!(r"\.(?:{})$", alternatives.join("|")))
            .case_insensitive(true)
            .build()
            .map_err(|e| SiftError::InvalidFilterSyntax(e.to_string()))?;

        Ok(Self {
            suffixes,
            pattern: Some(pattern),
        })
    }

    /// The suffixes this filter accepts, without leading dots.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn is_any(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.is_match(name),
            None => true,
        }
    }
}
