//! Layered testbed settings via `ortho-config`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogSettings;

/// Testbed settings merged from defaults, configuration files, and
/// `CALLERID_TESTBED`-prefixed environment variables.
///
/// The quirky provisioning variables (`IS_DEBUG` and the root hints) are
/// read directly from the process environment instead; their semantics are
/// not configuration layering.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "CALLERID_TESTBED")]
pub struct TestbedSettings {
    /// Directory searched for the fixture file. Defaults to the project
    /// root above this crate.
    pub fixture_dir: Option<String>,
    /// Attach a console logging layer for the run.
    #[ortho_config(default = false)]
    pub console_log: bool,
}

impl TestbedSettings {
    /// Loads settings without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("callerid-testbed")])
            .map_err(|err| SettingsError::Parse(err.to_string()))
    }

    /// Logger options implied by these settings.
    #[must_use]
    pub const fn log_settings(&self) -> LogSettings {
        LogSettings {
            console: self.console_log,
            filter: None,
        }
    }
}

/// Errors raised while loading testbed settings.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SettingsError {
    /// Raised when settings parsing fails.
    #[error("testbed settings parsing failed: {0}")]
    Parse(String),
}
