//! Domain layer: the settings schema and its YAML encoding.
//!
//! Nothing here touches the file system; reading and writing the config file
//! lives in [`crate::infrastructure`].

pub mod duration;
pub mod settings;

pub use settings::{
    Config, Legacy, Resources, Server, Settings, DEFAULT_CONFIG_FILE, DEFAULT_ERRORS_FILE,
    DEFAULT_LOGS_FILE, DEFAULT_OUTPUTS_FILE,
};
