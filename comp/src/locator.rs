//! Template file lookup
//!
//! A [`Locator`] maps a relative candidate path such as `components/Card.hbs`
//! to the first existing file across its search roots.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Maps a relative template path to an existing file
pub trait Locator: Send + Sync {
    /// Return the first existing file matching `relative`, or `None`
    fn locate(&self, relative: &Path) -> Option<PathBuf>;
}

/// Filesystem locator over an ordered list of search roots
///
/// Roots are checked in order, so the first root (conventionally the child
/// theme) overrides later ones (the parent theme).
#[derive(Debug, Clone, Default)]
pub struct FsLocator {
    roots: Vec<PathBuf>,
}

impl FsLocator {
    /// Create a locator searching the given roots in order
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a locator for a child theme that falls back to its parent
    pub fn themed(child: impl Into<PathBuf>, parent: impl Into<PathBuf>) -> Self {
        let child = child.into();
        let parent = parent.into();
        if child == parent {
            Self::new([child])
        } else {
            Self::new([child, parent])
        }
    }

    /// Search roots in lookup order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl Locator for FsLocator {
    fn locate(&self, relative: &Path) -> Option<PathBuf> {
        // Joining an absolute path would replace the root
        if relative
            .components()
            .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
        {
            debug!(relative = %relative.display(), "FsLocator::locate: not relative to a root");
            return None;
        }
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "FsLocator::locate: found");
                return Some(candidate);
            }
        }
        debug!(relative = %relative.display(), roots = self.roots.len(), "FsLocator::locate: no match");
        None
    }
}

/// Ensure a directory path ends with exactly one `/`
///
/// An empty directory stays empty so the candidate remains relative to the
/// search roots.
pub fn trailing_slash(dir: &str) -> String {
    let trimmed = dir.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_trailing_slash() {
        assert_eq!(trailing_slash("components"), "components/");
        assert_eq!(trailing_slash("components/"), "components/");
        assert_eq!(trailing_slash("components//"), "components/");
        assert_eq!(trailing_slash("parts\\"), "parts/");
        assert_eq!(trailing_slash(""), "");
        assert_eq!(trailing_slash("/"), "");
    }

    #[test]
    fn test_locate_prefers_first_root() {
        let child = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        for dir in [&child, &parent] {
            fs::create_dir_all(dir.path().join("components")).unwrap();
            fs::write(dir.path().join("components/Card.hbs"), "card").unwrap();
        }

        let locator = FsLocator::themed(child.path(), parent.path());
        let found = locator.locate(Path::new("components/Card.hbs"));

        assert_eq!(found, Some(child.path().join("components/Card.hbs")));
    }

    #[test]
    fn test_locate_falls_back_to_parent() {
        let child = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        fs::create_dir_all(parent.path().join("components")).unwrap();
        fs::write(parent.path().join("components/Logo.hbs"), "logo").unwrap();

        let locator = FsLocator::themed(child.path(), parent.path());

        assert_eq!(
            locator.locate(Path::new("components/Logo.hbs")),
            Some(parent.path().join("components/Logo.hbs"))
        );
    }

    #[test]
    fn test_locate_ignores_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("components/Card.hbs")).unwrap();

        let locator = FsLocator::new([root.path()]);
        assert!(locator.locate(Path::new("components/Card.hbs")).is_none());
    }

    #[test]
    fn test_locate_rejects_absolute_paths() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("Card.hbs"), "outside").unwrap();

        let locator = FsLocator::new([root.path()]);
        assert!(locator.locate(&outside.path().join("Card.hbs")).is_none());
        assert!(locator.locate(Path::new("/Card.hbs")).is_none());
    }

    #[test]
    fn test_themed_same_root_is_searched_once() {
        let locator = FsLocator::themed("/srv/theme", "/srv/theme");
        assert_eq!(locator.roots().len(), 1);
    }
}
