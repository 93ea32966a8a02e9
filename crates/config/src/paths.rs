//! Path resolution against the config directory

use std::path::{Component, Path, PathBuf};

/// Resolves configured paths against a base directory
pub struct PathResolver;

impl PathResolver {
    /// Resolve `candidate` against `base_dir`
    ///
    /// Returns `None` when either input is empty or the candidate is absent.
    /// Absolute candidates are returned unchanged; relative ones are joined
    /// onto `base_dir` and lexically normalized. The filesystem is never
    /// touched.
    ///
    /// # Examples
    /// ```
    /// use origin_sync_config::PathResolver;
    /// use std::path::{Path, PathBuf};
    ///
    /// assert_eq!(
    ///     PathResolver::resolve(Path::new("/proj"), Some("dist")),
    ///     Some(PathBuf::from("/proj/dist"))
    /// );
    /// assert_eq!(PathResolver::resolve(Path::new("/proj"), Some("")), None);
    /// assert_eq!(PathResolver::resolve(Path::new("/proj"), None), None);
    /// ```
    pub fn resolve(base_dir: &Path, candidate: Option<&str>) -> Option<PathBuf> {
        let candidate = candidate.filter(|c| !c.is_empty())?;
        if base_dir.as_os_str().is_empty() {
            return None;
        }

        let candidate = Path::new(candidate);
        if candidate.is_absolute() {
            return Some(candidate.to_path_buf());
        }

        Some(Self::normalize(&base_dir.join(candidate)))
    }

    /// Collapse `.` and `..` components without consulting the filesystem
    pub fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => match normalized.components().next_back() {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    // `..` above the root stays at the root
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => normalized.push(".."),
                },
                other => normalized.push(other.as_os_str()),
            }
        }

        if normalized.as_os_str().is_empty() {
            normalized.push(".");
        }

        normalized
    }
}
