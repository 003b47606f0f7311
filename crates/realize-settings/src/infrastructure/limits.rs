//! Applies `flimit` to the process's open file descriptor limit.
//!
//! Watching large trees opens one descriptor per watched directory on some
//! platforms, so the watcher raises `RLIMIT_NOFILE` before it starts.

use crate::domain::Config;
use crate::error::SettingsError;

impl Config {
    /// Sets the soft `RLIMIT_NOFILE` limit to `flimit`.
    ///
    /// Returns `Ok(false)` without touching anything when `flimit` is zero or
    /// negative, or on platforms without resource limits.  The hard limit is
    /// only raised when `flimit` exceeds it, which normally needs privileges.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Limit`] if the current limits cannot be read
    /// or the new limit is rejected.
    pub fn apply_flimit(&self) -> Result<bool, SettingsError> {
        if self.flimit <= 0 {
            return Ok(false);
        }
        set_nofile_limit(self.flimit as u64)
    }
}

#[cfg(unix)]
fn set_nofile_limit(limit: u64) -> Result<bool, SettingsError> {
    use nix::libc::rlim_t;
    use nix::sys::resource::{getrlimit, setrlimit, Resource};

    let (_, hard) = getrlimit(Resource::RLIMIT_NOFILE)
        .map_err(|e| SettingsError::Limit(format!("getrlimit: {e}")))?;
    let soft = limit as rlim_t;

    setrlimit(Resource::RLIMIT_NOFILE, soft, hard.max(soft))
        .map_err(|e| SettingsError::Limit(format!("setrlimit to {limit}: {e}")))?;
    tracing::debug!("open file limit set to {limit}");
    Ok(true)
}

#[cfg(not(unix))]
fn set_nofile_limit(limit: u64) -> Result<bool, SettingsError> {
    tracing::warn!("flimit {limit} ignored: resource limits are not supported on this platform");
    Ok(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_flimit_is_a_no_op() {
        let config = Config::default();
        assert!(!config.apply_flimit().unwrap());
    }

    #[test]
    fn test_negative_flimit_is_a_no_op() {
        let config = Config {
            flimit: -1,
            ..Config::default()
        };
        assert!(!config.apply_flimit().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_flimit_equal_to_current_soft_limit_is_applied() {
        use nix::sys::resource::{getrlimit, Resource};

        // Arrange: reapplying the current soft limit is always permitted
        let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE).unwrap();
        let Ok(flimit) = i64::try_from(soft) else {
            // RLIM_INFINITY does not fit in the settings field
            return;
        };
        let config = Config {
            flimit,
            ..Config::default()
        };

        // Act
        let applied = config.apply_flimit().unwrap();

        // Assert
        assert!(applied);
        assert_eq!(getrlimit(Resource::RLIMIT_NOFILE).unwrap(), (soft, hard));
    }
}
