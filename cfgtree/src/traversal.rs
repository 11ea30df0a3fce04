//! Directory traversal producing a [`DirectoryMap`].
//!
//! Each level lists its accepted files and its subdirectories, sorted by
//! file name so that repeated loads of an unchanged tree are identical.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Hook invoked with every directory visited and every file accepted.
pub type ProgressCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// One directory level: its files and its subdirectory maps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryMap {
    /// Path of this directory.
    pub path: PathBuf,
    /// Accepted files directly inside this directory.
    pub files: Vec<PathBuf>,
    /// Subdirectories, each mapped recursively (empty past the depth limit).
    pub directories: Vec<DirectoryMap>,
}

impl DirectoryMap {
    /// Name of this directory's last path component.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Which files a traversal keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    /// Keep files whose final extension is one of these (without dots).
    Extensions(Vec<String>),
    /// Keep only `*.<prefix>.<ext>` files with one of these extensions.
    Convention {
        /// The naming-convention segment.
        prefix: String,
        /// Accepted extensions (without dots).
        extensions: Vec<String>,
    },
}

impl FileFilter {
    /// Returns true if the file at `path` passes the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::traversal::FileFilter;
    /// use std::path::Path;
    ///
    /// let filter = FileFilter::Convention {
    ///     prefix: "app".to_string(),
    ///     extensions: vec!["json".to_string()],
    /// };
    /// assert!(filter.accepts(Path::new("/conf/db.app.json")));
    /// assert!(!filter.accepts(Path::new("/conf/db.json")));
    /// ```
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        match self {
            Self::Extensions(extensions) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e == ext)),
            Self::Convention { prefix, extensions } => extensions.iter().any(|ext| {
                let suffix = format!(".{prefix}.{ext}");
                name.len() > suffix.len() && name.ends_with(&suffix)
            }),
        }
    }
}

/// Traversal settings.
#[derive(Clone)]
pub struct TraversalOptions {
    /// Which files to list.
    pub filter: FileFilter,
    /// Levels to descend below the root; `Some(0)` lists subdirectories empty.
    pub max_depth: Option<usize>,
    /// Progress hook.
    pub progress: Option<ProgressCallback>,
}

impl fmt::Debug for TraversalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalOptions")
            .field("filter", &self.filter)
            .field("max_depth", &self.max_depth)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl TraversalOptions {
    fn notify(&self, path: &Path) {
        if let Some(progress) = &self.progress {
            progress(path);
        }
    }
}

/// Map the directory tree under `root`.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `root` is not a directory and
/// [`Error::Traversal`] if a directory cannot be listed.
pub fn traverse(root: &Path, options: &TraversalOptions) -> Result<DirectoryMap> {
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    walk_level(root, 0, options)
}

fn walk_level(dir: &Path, depth: usize, options: &TraversalOptions) -> Result<DirectoryMap> {
    options.notify(dir);
    let mut map = DirectoryMap {
        path: dir.to_path_buf(),
        ..DirectoryMap::default()
    };

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if options.max_depth.is_some_and(|max| depth >= max) {
                log::trace!("depth limit reached at {}", path.display());
                map.directories.push(DirectoryMap {
                    path: path.to_path_buf(),
                    ..DirectoryMap::default()
                });
            } else {
                map.directories.push(walk_level(path, depth + 1, options)?);
            }
        } else if entry.file_type().is_symlink() && path.is_dir() {
            log::debug!("not following directory symlink {}", path.display());
        } else if path.is_file() && options.filter.accepts(path) {
            options.notify(path);
            map.files.push(path.to_path_buf());
        }
    }

    Ok(map)
}
