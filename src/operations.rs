//! Filesystem queries behind a trait so steps can be unit-tested without a
//! prepared home directory.
//!
//! Steps only ever *query* the filesystem; every change goes through the
//! command runner. Production code uses [`SystemFileSystemOps`]; tests use
//! `MockFileSystemOps`.

use std::path::Path;

/// Read-only filesystem queries used by steps.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// ```ignore
/// let fs = MockFileSystemOps::new().with_dir("/home/test/.oh-my-zsh");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    files: Vec<std::path::PathBuf>,
    dirs: Vec<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create a mock where nothing exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Mark `path` as an existing directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dirs.push(path.into());
        self
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.files.iter().chain(&self.dirs).any(|p| p == path)
    }
}
