use std::path::{Path, PathBuf};
use std::time::Duration;

/// The output of a ranked search.
pub struct Results {
    /// Total number of entries that matched the search criteria.
    pub matches: usize,

    /// Matched entries, highest score first. Equal scores keep walk order.
    pub hits: Vec<Hit>,

    /// Scan performance statistics.
    pub stats: ScanStats,
}

impl Results {
    /// Matched paths in ranked order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.hits.iter().map(|h| h.path.as_path())
    }
}

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub path: PathBuf,

    /// Non-overlapping pattern matches found in the entry's candidate string.
    pub score: usize,
}

/// Performance statistics for a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStats {
    /// Total number of files listed (matched or not).
    pub files: usize,

    /// Total number of directories listed.
    pub dirs: usize,

    /// Wall-clock time since the search started.
    pub duration: Duration,

    /// Total entries scanned per second. Equals
    /// `(files + dirs) / duration.as_secs_f64()`, clamped to 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Compute `entries_per_sec` from raw counts and duration.
    pub(crate) fn compute(files: usize, dirs: usize, duration: Duration) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            duration,
            entries_per_sec: eps,
        }
    }
}
