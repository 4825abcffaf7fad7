use std::ffi::OsString;
use std::path::PathBuf;

/// A single file or directory produced by the walker.
///
/// `kind` is resolved once, when the parent directory is listed. Nothing
/// downstream asks the filesystem again to ask what an entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path for absolute searches, the bare name otherwise.
    pub path: PathBuf,

    /// The entry's final path segment, lossily converted to UTF-8.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep below the search root this entry was found. Direct children = 1.
    pub depth: usize,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Build an entry for an arbitrary path, reading its kind once.
    pub(crate) fn from_path(path: PathBuf) -> Self {
        let kind = if path.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        };
        Self {
            path,
            name,
            kind,
            depth: 0,
        }
    }

    /// The string a query is matched against: the name, or the whole path.
    pub fn candidate(&self, match_on_name: bool) -> std::borrow::Cow<'_, str> {
        if match_on_name {
            std::borrow::Cow::Borrowed(self.name.as_str())
        } else {
            self.path.to_string_lossy()
        }
    }
}

/// The kind of a traversed entry.
///
/// Symlinks are classified by what they point to; anything that is not a
/// directory (devices, sockets, dangling links) counts as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Anything that is not a directory.
    File,

    /// A directory.
    Dir,
}

/// One row of a directory listing, as reported by a [`Source`](crate::Source).
///
/// `name` is the OS name exactly as listed, so it can always be joined back
/// onto its parent even when it is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: OsString,
    pub kind: EntryKind,
}

impl Listing {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }
}
