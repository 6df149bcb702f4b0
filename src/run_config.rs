//! Immutable per-run configuration for the lookup client's tests.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// File extension used for seeded cookie files.
pub const COOKIE_FILE_EXT: &str = "json";

/// Errors raised while finalising a run configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RunConfigError {
    /// Raised when a required field is missing or empty.
    #[error("missing or empty field: {0}")]
    Validation(String),
    /// Raised when a per-run directory is not under the run root.
    #[error("{dir} must live under the run root {root}")]
    OutsideRunRoot {
        /// Directory that violated the invariant.
        dir: Utf8PathBuf,
        /// Run root the directory must live under.
        root: Utf8PathBuf,
    },
}

/// Immutable description of one provisioned test run.
///
/// Values are only produced by [`RunConfigurationBuilder::finalize`], which
/// guarantees every field is populated and every directory sits under the
/// run root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfiguration {
    username: String,
    config_dir: Utf8PathBuf,
    data_dir: Utf8PathBuf,
    log_dir: Utf8PathBuf,
    is_debug: bool,
    test_root_folder: Utf8PathBuf,
}

impl RunConfiguration {
    /// Starts a builder for a [`RunConfiguration`].
    #[must_use]
    pub fn builder() -> RunConfigurationBuilder {
        RunConfigurationBuilder::new()
    }

    /// Account identity declared by the run's fixture.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Per-run configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Per-run data directory holding the seeded cookie file.
    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Per-run log directory.
    #[must_use]
    pub fn log_dir(&self) -> &Utf8Path {
        &self.log_dir
    }

    /// Whether debug mode was requested through the environment.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.is_debug
    }

    /// Root directory of this run's workspace.
    #[must_use]
    pub fn test_root_folder(&self) -> &Utf8Path {
        &self.test_root_folder
    }

    /// Path of the cookie file seeded for this run.
    #[must_use]
    pub fn cookie_file_path(&self) -> Utf8PathBuf {
        self.data_dir.join(cookie_file_name(&self.username))
    }
}

/// Name of the cookie file for an account: uppercase username plus the
/// [`COOKIE_FILE_EXT`] extension.
#[must_use]
pub fn cookie_file_name(username: &str) -> String {
    format!("{}.{COOKIE_FILE_EXT}", username.to_uppercase())
}

/// Builder collecting run configuration fields before finalisation.
///
/// Replaces late assignment of the run root on a constructed value: all
/// fields, the root included, must be supplied before [`Self::finalize`]
/// hands out an immutable [`RunConfiguration`].
#[derive(Clone, Debug, Default)]
pub struct RunConfigurationBuilder {
    username: String,
    config_dir: Option<Utf8PathBuf>,
    data_dir: Option<Utf8PathBuf>,
    log_dir: Option<Utf8PathBuf>,
    is_debug: bool,
    test_root_folder: Option<Utf8PathBuf>,
}

impl RunConfigurationBuilder {
    /// Creates an empty builder; fields must be populated before finalize.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account username.
    #[must_use]
    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = value.into();
        self
    }

    /// Sets the per-run configuration directory.
    #[must_use]
    pub fn config_dir(mut self, value: impl Into<Utf8PathBuf>) -> Self {
        self.config_dir = Some(value.into());
        self
    }

    /// Sets the per-run data directory.
    #[must_use]
    pub fn data_dir(mut self, value: impl Into<Utf8PathBuf>) -> Self {
        self.data_dir = Some(value.into());
        self
    }

    /// Sets the per-run log directory.
    #[must_use]
    pub fn log_dir(mut self, value: impl Into<Utf8PathBuf>) -> Self {
        self.log_dir = Some(value.into());
        self
    }

    /// Sets the debug flag.
    #[must_use]
    pub const fn is_debug(mut self, value: bool) -> Self {
        self.is_debug = value;
        self
    }

    /// Sets the run root directory.
    #[must_use]
    pub fn test_root_folder(mut self, value: impl Into<Utf8PathBuf>) -> Self {
        self.test_root_folder = Some(value.into());
        self
    }

    /// Finalises the builder into an immutable [`RunConfiguration`].
    ///
    /// # Errors
    ///
    /// Returns [`RunConfigError::Validation`] when a required field is
    /// missing or blank and [`RunConfigError::OutsideRunRoot`] when a
    /// directory does not sit under the run root.
    pub fn finalize(self) -> Result<RunConfiguration, RunConfigError> {
        if self.username.trim().is_empty() {
            return Err(RunConfigError::Validation("username".to_owned()));
        }
        let test_root_folder = self
            .test_root_folder
            .ok_or_else(|| RunConfigError::Validation("test_root_folder".to_owned()))?;
        let config_dir = require_dir(self.config_dir, "config_dir", &test_root_folder)?;
        let data_dir = require_dir(self.data_dir, "data_dir", &test_root_folder)?;
        let log_dir = require_dir(self.log_dir, "log_dir", &test_root_folder)?;

        Ok(RunConfiguration {
            username: self.username,
            config_dir,
            data_dir,
            log_dir,
            is_debug: self.is_debug,
            test_root_folder,
        })
    }
}

fn require_dir(
    value: Option<Utf8PathBuf>,
    field: &str,
    root: &Utf8Path,
) -> Result<Utf8PathBuf, RunConfigError> {
    let dir = value.ok_or_else(|| RunConfigError::Validation(field.to_owned()))?;
    if !dir.starts_with(root) {
        return Err(RunConfigError::OutsideRunRoot {
            dir,
            root: root.to_path_buf(),
        });
    }
    Ok(dir)
}
