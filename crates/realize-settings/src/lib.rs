//! # realize-settings
//!
//! Settings persistence for the Realize file watcher: loads the YAML config
//! file into typed structs, writes it back when the user asks for it, and
//! cleans up the tool's working directory.
//!
//! ```no_run
//! use realize_settings::{Settings, SettingsStore, StoreLayout};
//!
//! let mut settings = Settings::default();
//! settings.config.create = true;
//!
//! let store = SettingsStore::new(StoreLayout::default());
//! store.record(&settings, &settings)?;          // writes .realize/realize.yaml
//! let loaded = store.load(&settings)?;          // reads it back
//! assert_eq!(loaded.resources, settings.resources);
//! # Ok::<(), realize_settings::SettingsError>(())
//! ```
//!
//! - **`domain`** – The settings schema and its YAML encoding.  No I/O.
//! - **`infrastructure`** – Reading, writing and removing files, plus the
//!   `flimit` file-descriptor limit.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{Config, Legacy, Resources, Server, Settings};
pub use error::SettingsError;
pub use infrastructure::{resolve_config_path, Removal, SettingsStore, StoreLayout};
