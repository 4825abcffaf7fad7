use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{EntryKind, Listing};
use crate::error::SiftError;
use crate::traits::Source;

/// [`Source`] backed by the local filesystem.
///
/// Each listing is a depth-1 walk with every ignore-file filter disabled, so
/// hidden and git-ignored entries are listed like any other.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    sorted: bool,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// List each directory sorted by file name instead of in OS order.
    pub fn sorted(mut self, yes: bool) -> Self {
        self.sorted = yes;
        self
    }
}

impl Source for FsSource {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, SiftError> {
        std::fs::canonicalize(path).map_err(|e| SiftError::io(path, e))
    }

    fn list(&self, dir: &Path) -> Result<Vec<Listing>, SiftError> {
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1));

        if self.sorted {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        let mut listing = Vec::new();
        for res in builder.build() {
            let entry = res.map_err(|e| map_ignore_error(dir, e))?;

            // Skip the directory itself
            if entry.depth() == 0 {
                continue;
            }

            listing.push(Listing {
                name: entry.file_name().to_os_string(),
                kind: classify(&entry),
            });
        }

        Ok(listing)
    }
}

/// Symlinks are classified by their target; a dangling link is a file.
fn classify(entry: &DirEntry) -> EntryKind {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Dir,
        Some(ft) if ft.is_symlink() => match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::Dir,
            _ => EntryKind::File,
        },
        _ => EntryKind::File,
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SiftError
// ---------------------------------------------------------------------------

fn map_ignore_error(dir: &Path, e: ignore::Error) -> SiftError {
    match e {
        ignore::Error::WithPath { path, err } => at_path(path, *err),
        ignore::Error::WithDepth { err, .. } => map_ignore_error(dir, *err),
        ignore::Error::Loop { child, .. } => {
            SiftError::io(child, std::io::Error::other("symlink loop"))
        }
        ignore::Error::Io(io_err) => SiftError::io(dir, io_err),
        other => SiftError::Source(other.to_string()),
    }
}

/// Unwrap whatever `ignore` nested under a path, keeping the outermost path.
fn at_path(path: PathBuf, e: ignore::Error) -> SiftError {
    match e {
        ignore::Error::Io(io_err) => SiftError::io(path, io_err),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            at_path(path, *err)
        }
        ignore::Error::WithPath { err, .. } => at_path(path, *err),
        other => SiftError::Source(format!("{}: {}", path.display(), other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_direct_children_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.txt"), "").unwrap();

        let listing = FsSource::new().sorted(true).list(dir.path()).unwrap();

        assert_eq!(listing, vec![Listing::file("a.txt"), Listing::dir("sub")]);
    }

    #[test]
    fn lists_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::write(dir.path().join(".gitignore"), "*\n").unwrap();

        let listing = FsSource::new().sorted(true).list(dir.path()).unwrap();

        assert_eq!(
            listing,
            vec![Listing::file(".gitignore"), Listing::file(".hidden")]
        );
    }

    #[test]
    fn missing_directory_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        let err = FsSource::new().list(&gone).unwrap_err();

        assert!(matches!(err, SiftError::Filesystem { .. }), "got {err:?}");
        assert_eq!(err.path(), Some(&gone));
    }

    // macOS refuses to create names that are not UTF-8
    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn keeps_names_that_are_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let odd = OsStr::from_bytes(b"bad\xff");
        fs::create_dir(dir.path().join(odd)).unwrap();

        let listing = FsSource::new().list(dir.path()).unwrap();

        assert_eq!(listing, vec![Listing::dir(odd)]);
        assert!(dir.path().join(&listing[0].name).is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_counts_as_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let listing = FsSource::new().sorted(true).list(dir.path()).unwrap();

        assert_eq!(
            listing,
            vec![
                Listing::file("dangling"),
                Listing::dir("link"),
                Listing::dir("real"),
            ]
        );
    }
}
