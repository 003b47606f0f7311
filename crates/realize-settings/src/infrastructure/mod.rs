//! Infrastructure layer: file system access and process limits.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by it.

pub mod fs;
pub mod limits;
pub mod store;

pub use fs::{FileSystem, StdFileSystem};
pub use store::{
    resolve_config_path, Removal, SettingsStore, StoreLayout, DEFAULT_DIRECTORY,
    DEFAULT_PERMISSION,
};
