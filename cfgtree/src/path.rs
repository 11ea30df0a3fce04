//! Normalization of user-supplied configuration paths.
//!
//! Roots and base paths may be given as `~/conf`, `./conf` or `conf/../x`.
//! They are turned into absolute, `.`/`..`-free paths before loading, without
//! following symlinks, so that base paths built from them stay predictable.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` or `~/` to the home directory.
///
/// Any other path, including `~conf` or a non-UTF-8 path, is returned as-is.
///
/// # Errors
///
/// Returns an error when the path starts with `~` and the home directory
/// cannot be determined.
///
/// # Examples
///
/// ```
/// use cfgtree::path::expand_tilde;
/// use std::path::Path;
///
/// assert!(expand_tilde(Path::new("~/conf")).unwrap().is_absolute());
/// assert_eq!(expand_tilde(Path::new("/etc/app")).unwrap(), Path::new("/etc/app"));
/// assert_eq!(expand_tilde(Path::new("~conf/app")).unwrap(), Path::new("~conf/app"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "cannot determine home directory".to_string(),
            })?;
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                Ok(home)
            } else {
                Ok(home.join(rest))
            }
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Make `path` absolute and resolve `.` and `..` lexically.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory is
/// unavailable, or `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use cfgtree::path::normalize;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// assert_eq!(normalize(Path::new("/srv/./conf/../app")).unwrap(), Path::new("/srv/app"));
/// assert!(normalize(Path::new("conf")).unwrap().is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .map_err(|e| Error::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("cannot get current directory: {e}"),
            })?
            .join(expanded)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                resolved.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if resolved.parent().is_none() || !resolved.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }
    Ok(resolved)
}
