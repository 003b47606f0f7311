//! YAML persistence for [`Settings`].
//!
//! The config file lives in a dedicated working directory next to the watched
//! project:
//!
//! ```text
//! <base>/.realize/realize.yaml   preferred location, written by `record`
//! <base>/realize.yaml            flat location from older releases
//! ```
//!
//! Reads prefer the working-directory copy whenever it exists.  Writes go
//! there too, creating the directory on demand; if the directory cannot be
//! created the file is written to the flat location instead of failing.
//!
//! The directory name, permission bits and base path are carried by a
//! [`StoreLayout`] value so tests can point the store at a temporary
//! directory.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::Settings;
use crate::error::SettingsError;
use crate::infrastructure::fs::{FileSystem, StdFileSystem};

/// Name of the working directory holding the config file.
pub const DEFAULT_DIRECTORY: &str = ".realize";
/// Permission bits used when the working directory is created.
pub const DEFAULT_PERMISSION: u32 = 0o775;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where the store looks for and writes the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    base: PathBuf,
    directory: PathBuf,
    permission: u32,
}

impl Default for StoreLayout {
    /// Working directory `.realize` (mode `0775`) relative to the process's
    /// current directory.
    fn default() -> Self {
        Self {
            base: PathBuf::new(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            permission: DEFAULT_PERMISSION,
        }
    }
}

impl StoreLayout {
    /// Same as [`StoreLayout::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every path relative to `base` instead of the current directory.
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = base.into();
        self
    }

    /// Uses `directory` as the working-directory name.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Uses `permission` when creating the working directory.
    pub fn with_permission(mut self, permission: u32) -> Self {
        self.permission = permission;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn permission(&self) -> u32 {
        self.permission
    }

    /// `<base>/<directory>`.
    pub fn working_dir(&self) -> PathBuf {
        self.base.join(&self.directory)
    }

    /// `<base>/<directory>/<name>`.
    pub fn nested_path(&self, name: &Path) -> PathBuf {
        self.working_dir().join(name)
    }

    /// `<base>/<name>`.
    pub fn flat_path(&self, name: &Path) -> PathBuf {
        self.base.join(name)
    }
}

/// Picks the config file to read.
///
/// Returns the working-directory location when `exists` reports it present,
/// otherwise the flat location.  The check is the caller's, so this stays a
/// pure function of its inputs.
pub fn resolve_config_path(
    layout: &StoreLayout,
    name: &Path,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    let nested = layout.nested_path(name);
    if exists(&nested) {
        nested
    } else {
        layout.flat_path(name)
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Outcome of [`SettingsStore::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path existed and was deleted.
    Removed,
    /// Nothing existed at the path.
    NotFound,
}

/// Reads, records and removes settings files.
#[derive(Debug, Clone)]
pub struct SettingsStore<F = StdFileSystem> {
    layout: StoreLayout,
    fs: F,
}

impl SettingsStore<StdFileSystem> {
    /// Creates a store on the real file system.
    pub fn new(layout: StoreLayout) -> Self {
        Self::with_file_system(layout, StdFileSystem)
    }
}

impl Default for SettingsStore<StdFileSystem> {
    fn default() -> Self {
        Self::new(StoreLayout::default())
    }
}

impl<F: FileSystem> SettingsStore<F> {
    /// Creates a store on a custom [`FileSystem`].
    pub fn with_file_system(layout: StoreLayout, fs: F) -> Self {
        Self { layout, fs }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// The file [`read`](Self::read) would load for `settings` right now.
    pub fn config_path(&self, settings: &Settings) -> PathBuf {
        resolve_config_path(&self.layout, &settings.resources.config, |p| {
            self.fs.exists(p)
        })
    }

    /// Loads the config file named by `settings.resources.config` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read and
    /// [`SettingsError::Parse`] if it is not valid YAML for `T`.
    pub fn read<T: DeserializeOwned>(&self, settings: &Settings) -> Result<T, SettingsError> {
        let path = self.config_path(settings);
        debug!("reading settings from {}", path.display());

        let content = self
            .fs
            .read(&path)
            .map_err(|source| SettingsError::io(&path, source))?;
        serde_yaml::from_slice(&content).map_err(SettingsError::Parse)
    }

    /// Loads the config file as [`Settings`], keeping the runtime-only
    /// `create` flag and config file name of `settings`.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn load(&self, settings: &Settings) -> Result<Settings, SettingsError> {
        let mut loaded: Settings = self.read(settings)?;
        loaded.config.create = settings.config.create;
        loaded.resources.config = settings.resources.config.clone();
        Ok(loaded)
    }

    /// Writes `source` as YAML when `settings.config.create` is set.
    ///
    /// Returns the path written, or `None` when creation is disabled (in which
    /// case the file system is not touched).  The working directory is created
    /// if missing; should that fail, the file goes to the flat location.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Serialize`] if `source` cannot be encoded
    /// (nothing is written) and [`SettingsError::Io`] if the write fails.
    pub fn record<T: Serialize + ?Sized>(
        &self,
        settings: &Settings,
        source: &T,
    ) -> Result<Option<PathBuf>, SettingsError> {
        if !settings.config.create {
            debug!("settings file creation disabled, skipping record");
            return Ok(None);
        }

        let yaml = serde_yaml::to_string(source).map_err(SettingsError::Serialize)?;
        let name = settings.resources.config.as_path();
        let working_dir = self.layout.working_dir();

        let path = if self.fs.is_dir(&working_dir) {
            self.layout.nested_path(name)
        } else {
            match self.fs.create_dir(&working_dir, self.layout.permission) {
                Ok(()) => {
                    info!("created working directory {}", working_dir.display());
                    self.layout.nested_path(name)
                }
                Err(e) => {
                    warn!(
                        "cannot create working directory {}: {e}; writing flat config file",
                        working_dir.display()
                    );
                    self.layout.flat_path(name)
                }
            }
        };

        self.fs
            .write(&path, yaml.as_bytes())
            .map_err(|source| SettingsError::io(&path, source))?;
        debug!("recorded settings to {}", path.display());
        Ok(Some(path))
    }

    /// Recursively deletes `path`.
    ///
    /// A path that is already absent is reported as [`Removal::NotFound`],
    /// not as an error, so removing twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the deletion itself fails.
    pub fn remove(&self, path: impl AsRef<Path>) -> Result<Removal, SettingsError> {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            debug!("{} already absent", path.display());
            return Ok(Removal::NotFound);
        }

        match self.fs.remove_all(path) {
            Ok(()) => {
                info!("removed {}", path.display());
                Ok(Removal::Removed)
            }
            // Deleted by someone else between the check and the removal.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Removal::NotFound),
            Err(source) => Err(SettingsError::io(path, source)),
        }
    }
}

// ── Settings shortcuts ────────────────────────────────────────────────────────

/// Shortcuts using the default layout on the real file system.
impl Settings {
    /// See [`SettingsStore::read`].
    pub fn read<T: DeserializeOwned>(&self) -> Result<T, SettingsError> {
        SettingsStore::new(StoreLayout::default()).read(self)
    }

    /// See [`SettingsStore::record`].
    pub fn record<T: Serialize + ?Sized>(
        &self,
        source: &T,
    ) -> Result<Option<PathBuf>, SettingsError> {
        SettingsStore::new(StoreLayout::default()).record(self, source)
    }

    /// See [`SettingsStore::remove`].
    pub fn remove(&self, path: impl AsRef<Path>) -> Result<Removal, SettingsError> {
        SettingsStore::new(StoreLayout::default()).remove(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
