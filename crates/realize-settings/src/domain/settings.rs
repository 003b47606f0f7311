//! Settings schema stored in the watcher's YAML config file.
//!
//! ```yaml
//! flimit: 4096
//! legacy:
//!   status: true
//!   interval: 1s
//! resources:
//!   outputs: outputs.log
//!   logs: logs.log
//!   errors: errors.log
//! server:
//!   status: true
//!   open: false
//!   host: localhost
//!   port: 5002
//! ```
//!
//! [`Config`] is flattened into the top level of the document, so `flimit`
//! and `legacy` sit next to `resources` rather than under a `config` key.
//! Runtime-only fields (`Config::create`, `Resources::config`) are never
//! written and take their defaults when a file is read.
//!
//! Every struct is `#[serde(default)]`, so missing keys fall back to the
//! values of [`Default`].  An empty file therefore loads as
//! `Settings::default()` (minus the runtime-only fields).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the config file when the caller does not choose one.
pub const DEFAULT_CONFIG_FILE: &str = "realize.yaml";
/// Default file capturing the watched commands' standard output.
pub const DEFAULT_OUTPUTS_FILE: &str = "outputs.log";
/// Default file capturing the watcher's own log lines.
pub const DEFAULT_LOGS_FILE: &str = "logs.log";
/// Default file capturing the watched commands' standard error.
pub const DEFAULT_ERRORS_FILE: &str = "errors.log";

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level settings aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub config: Config,
    pub resources: Resources,
    /// Omitted from the file while every field holds its zero value.
    #[serde(skip_serializing_if = "Server::is_empty")]
    pub server: Server,
}

/// General options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether `record` may create or overwrite the config file.
    ///
    /// Decided by the caller at runtime; never stored.
    #[serde(skip)]
    pub create: bool,
    /// Soft limit on open file descriptors.  Zero leaves the limit alone.
    #[serde(skip_serializing_if = "is_zero")]
    pub flimit: i64,
    #[serde(skip_serializing_if = "Legacy::is_empty")]
    pub legacy: Legacy,
}

/// Polling watcher configuration, kept for filesystems without native events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legacy {
    pub status: bool,
    #[serde(with = "crate::domain::duration")]
    pub interval: Duration,
}

/// Files the watcher reads or generates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Name of the config file itself.  Supplied by the caller; never stored.
    #[serde(skip)]
    pub config: PathBuf,
    pub outputs: String,
    #[serde(alias = "log")]
    pub logs: String,
    #[serde(alias = "error")]
    pub errors: String,
}

/// Embedded web panel settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub status: bool,
    /// Open the panel in a browser once the server is up.
    pub open: bool,
    pub host: String,
    pub port: u16,
}

// ── Defaults and emptiness ────────────────────────────────────────────────────

impl Default for Resources {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            outputs: DEFAULT_OUTPUTS_FILE.to_string(),
            logs: DEFAULT_LOGS_FILE.to_string(),
            errors: DEFAULT_ERRORS_FILE.to_string(),
        }
    }
}

impl Legacy {
    /// `true` when both fields hold their zero value.
    pub fn is_empty(&self) -> bool {
        !self.status && self.interval.is_zero()
    }
}

impl Server {
    /// `true` when every field holds its zero value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
