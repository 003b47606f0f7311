//! File system access used by the settings store.
//!
//! # Testability
//!
//! The [`FileSystem`] trait lets unit tests inject failures (a working
//! directory that cannot be created, an unreadable file) without touching
//! real permissions.  Production code uses [`StdFileSystem`].

use std::fs;
use std::io;
use std::path::Path;

/// Blocking file operations required by [`crate::infrastructure::SettingsStore`].
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Returns `true` if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Creates or truncates the file at `path` and writes `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Creates a single directory with the given Unix permission bits.
    fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()>;
    /// Removes `path` and, for a directory, everything beneath it.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        set_mode(&mut builder, mode);
        builder.create(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        // symlink_metadata so a link to a directory removes the link only.
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[cfg(unix)]
fn set_mode(builder: &mut fs::DirBuilder, mode: u32) {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(mode);
}

#[cfg(not(unix))]
fn set_mode(_builder: &mut fs::DirBuilder, _mode: u32) {}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_truncates_existing_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("realize.yaml");
        std::fs::write(&path, "a much longer original body").unwrap();

        // Act
        StdFileSystem.write(&path, b"short").unwrap();

        // Assert
        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = StdFileSystem.read(&dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_create_dir_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        assert!(StdFileSystem.create_dir(&nested, 0o775).is_err());
    }

    #[test]
    fn test_create_dir_fails_when_a_file_is_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".realize");
        std::fs::write(&path, "").unwrap();

        let err = StdFileSystem.create_dir(&path, 0o775).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(!StdFileSystem.is_dir(&path));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_dir_applies_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".realize");

        // Act
        StdFileSystem.create_dir(&path, 0o775).unwrap();

        // Assert: the umask may clear group write, never adds other write
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o700, 0o700);
        assert_eq!(mode & 0o002, 0);
    }

    #[test]
    fn test_remove_all_deletes_directory_tree() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".realize");
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::write(root.join("nested").join("file.log"), "x").unwrap();

        // Act
        StdFileSystem.remove_all(&root).unwrap();

        // Assert
        assert!(!StdFileSystem.exists(&root));
    }

    #[test]
    fn test_remove_all_deletes_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("realize.yaml");
        std::fs::write(&path, "x").unwrap();

        StdFileSystem.remove_all(&path).unwrap();

        assert!(!path.exists());
    }
}
