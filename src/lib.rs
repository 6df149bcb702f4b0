//! Test-environment provisioning for a caller-identification lookup client.
//!
//! The crate resolves a writable root directory from environment hints,
//! creates a per-run `Config`/`Data`/`Log` tree, seeds a cookie file from a
//! JSON fixture, and hands back an immutable [`RunConfiguration`] together
//! with an explicit, releasable logging handle.

pub mod cases;
pub mod fixture;
pub mod logging;
pub mod provision;
pub mod run_config;
pub mod run_env;
pub mod settings;
pub mod test_support;

pub use cases::{ExpectedOutcome, LookupCase, builtin_cases};
pub use fixture::{FIXTURE_FILE_NAME, Fixture, FixtureError};
pub use logging::{LogSettings, LoggerHandle};
pub use provision::{
    CONFIG_DIR_NAME, DATA_DIR_NAME, LOG_DIR_NAME, ProvisionError, ProvisionOutcome,
    ProvisionRequest, Provisioner,
};
pub use run_config::{
    COOKIE_FILE_EXT, RunConfigError, RunConfiguration, RunConfigurationBuilder, cookie_file_name,
};
pub use run_env::{
    CI_JOB_NUMBER_VAR, FsProbe, IS_DEBUG_VAR, ROOT_HINT_VARS, RUN_PARENT_DIR, RunEnvError,
    WritabilityProbe, derive_run_id, is_debug_from_env, resolve_run_root,
};
pub use settings::{SettingsError, TestbedSettings};
