//! Test-environment provisioning orchestration.
//!
//! A [`Provisioner`] turns the process environment and the fixture file into
//! a ready-to-use run workspace: it resolves a writable root, creates the
//! per-run directory tree, seeds the cookie file, and returns the immutable
//! run configuration. The fixture is loaded before anything is written, so
//! a missing fixture leaves no directories behind.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;
use tracing::debug;

use crate::fixture::{Fixture, FixtureError, default_fixture_dir};
use crate::run_config::{RunConfigError, RunConfiguration, cookie_file_name};
use crate::run_env::{
    FsProbe, RUN_PARENT_DIR, RunEnvError, WritabilityProbe, derive_run_id, is_debug_from_env,
    resolve_run_root,
};
use crate::settings::{SettingsError, TestbedSettings};

/// Name of the per-run configuration subdirectory.
pub const CONFIG_DIR_NAME: &str = "Config";

/// Name of the per-run data subdirectory holding the cookie file.
pub const DATA_DIR_NAME: &str = "Data";

/// Name of the per-run log subdirectory.
pub const LOG_DIR_NAME: &str = "Log";

/// Errors raised while provisioning a run workspace.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Raised when the fixture cannot be loaded.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
    /// Raised when layered settings cannot be loaded.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    /// Raised when the run root cannot be resolved.
    #[error("run environment error: {0}")]
    RunEnv(#[from] RunEnvError),
    /// Raised when directory creation or file writes fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the fixture cookies cannot be rendered as JSON text.
    #[error("failed to render cookie payload: {message}")]
    SerializeCookies {
        /// Serialiser error message.
        message: String,
    },
    /// Raised when the run configuration fails finalisation.
    #[error("run configuration error: {0}")]
    Config(#[from] RunConfigError),
}

/// Inputs controlling one provisioning call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProvisionRequest {
    /// Directory containing the fixture file. Overrides the settings value
    /// and the project-root default.
    pub fixture_dir: Option<Utf8PathBuf>,
    /// Run identifier override. Defaults to CI metadata or a timestamp.
    pub run_id: Option<String>,
}

/// Result of a successful provisioning call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProvisionOutcome {
    /// Immutable configuration describing the provisioned run.
    pub config: RunConfiguration,
    /// Identifier naming the run's workspace directory.
    pub run_id: String,
    /// Path of the seeded cookie file.
    pub cookie_path: Utf8PathBuf,
}

/// Provisions per-run filesystem state for the lookup client's tests.
#[derive(Clone, Debug)]
pub struct Provisioner<P = FsProbe> {
    settings: TestbedSettings,
    probe: P,
}

impl Provisioner<FsProbe> {
    /// Builds a provisioner with layered settings and the real filesystem
    /// probe.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Settings`] when settings cannot be loaded.
    pub fn from_environment() -> Result<Self, ProvisionError> {
        Ok(Self::new(TestbedSettings::load_without_cli_args()?, FsProbe))
    }
}

impl<P> Provisioner<P>
where
    P: WritabilityProbe,
{
    /// Builds a provisioner from explicit settings and a writability probe.
    #[must_use]
    pub const fn new(settings: TestbedSettings, probe: P) -> Self {
        Self { settings, probe }
    }

    /// Provisions a run workspace and returns its configuration.
    ///
    /// Creating the directory tree is idempotent; repeating a call with the
    /// same run identifier reuses the tree and rewrites the cookie file.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Fixture`] when the fixture is missing or
    /// malformed (nothing has been written at that point), and the other
    /// [`ProvisionError`] variants when filesystem work or finalisation
    /// fails.
    pub fn provision(&self, request: &ProvisionRequest) -> Result<ProvisionOutcome, ProvisionError> {
        let is_debug = is_debug_from_env();
        let fixture_dir = self.fixture_dir(request);
        let fixture = Fixture::load_from_dir(&fixture_dir)?;
        debug!(username = %fixture.username, "loaded fixture");

        let root = resolve_run_root(&self.probe)?;
        let run_id = request.run_id.clone().unwrap_or_else(derive_run_id);
        let run_root = root.join(RUN_PARENT_DIR).join(&run_id);

        let config_dir = run_root.join(CONFIG_DIR_NAME);
        let data_dir = run_root.join(DATA_DIR_NAME);
        let log_dir = run_root.join(LOG_DIR_NAME);
        for dir in [&config_dir, &data_dir, &log_dir] {
            create_dir_all(dir)?;
        }
        debug!(run_root = %run_root, "created run directory tree");

        let cookie_path = write_cookie_file(&data_dir, &fixture)?;
        debug!(cookie_path = %cookie_path, "seeded cookie file");

        let config = RunConfiguration::builder()
            .username(fixture.username)
            .config_dir(config_dir)
            .data_dir(data_dir)
            .log_dir(log_dir)
            .is_debug(is_debug)
            .test_root_folder(run_root)
            .finalize()?;

        Ok(ProvisionOutcome {
            config,
            run_id,
            cookie_path,
        })
    }

    fn fixture_dir(&self, request: &ProvisionRequest) -> Utf8PathBuf {
        request
            .fixture_dir
            .clone()
            .or_else(|| self.settings.fixture_dir.clone().map(Utf8PathBuf::from))
            .unwrap_or_else(default_fixture_dir)
    }
}

fn create_dir_all(dir: &Utf8Path) -> Result<(), ProvisionError> {
    Dir::create_ambient_dir_all(dir, ambient_authority()).map_err(|err| ProvisionError::Io {
        path: dir.to_path_buf(),
        message: err.to_string(),
    })
}

fn write_cookie_file(data_dir: &Utf8Path, fixture: &Fixture) -> Result<Utf8PathBuf, ProvisionError> {
    let rendered =
        serde_json::to_string(&fixture.cookies).map_err(|err| ProvisionError::SerializeCookies {
            message: err.to_string(),
        })?;

    let file_name = cookie_file_name(&fixture.username);
    let path = data_dir.join(&file_name);
    let handle =
        Dir::open_ambient_dir(data_dir, ambient_authority()).map_err(|err| ProvisionError::Io {
            path: data_dir.to_path_buf(),
            message: err.to_string(),
        })?;
    handle
        .write(&file_name, rendered)
        .map_err(|err| ProvisionError::Io {
            path: path.clone(),
            message: err.to_string(),
        })?;
    Ok(path)
}
