//! Shared fixtures for provisioning BDD scenarios.

use std::sync::Arc;

use callerid_testbed::test_support::ScriptedProbe;
use callerid_testbed::{ProvisionOutcome, ProvisionRequest};
use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use rstest::fixture;
use tempfile::TempDir;
use thiserror::Error;

/// Shared state threaded through provisioning steps.
#[derive(Clone, Debug)]
pub struct ProvisionContext {
    pub workspace: Utf8PathBuf,
    pub fixture_dir: Utf8PathBuf,
    pub probe: ScriptedProbe,
    pub request: ProvisionRequest,
    pub env_sets: Vec<(String, String)>,
    pub env_unsets: Vec<String>,
    pub outcome: Option<ProvisionResult>,
    pub(crate) _tmp: Arc<TempDir>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProvisionFailureKind {
    FixtureNotFound,
    Fixture,
    Settings,
    RunEnv,
    Io,
    SerializeCookies,
    Config,
}

#[derive(Clone, Debug)]
pub struct ProvisionFailure {
    pub kind: ProvisionFailureKind,
    pub message: String,
    pub missing_fixture_path: Option<Utf8PathBuf>,
}

#[derive(Clone, Debug)]
pub enum ProvisionResult {
    Success(ProvisionOutcome),
    Failure(ProvisionFailure),
}

#[derive(Clone, Debug, Error)]
pub enum ProvisionTestError {
    #[error("failed to prepare workspace: {0}")]
    Workspace(String),
}

pub type ProvisionContextResult = Result<ProvisionContext, ProvisionTestError>;

#[fixture]
pub fn provision_context_result() -> ProvisionContextResult {
    build_provision_context()
}

#[fixture]
pub fn provision_context(provision_context_result: ProvisionContextResult) -> ProvisionContext {
    provision_context_result
        .unwrap_or_else(|err| panic!("provision context fixture should initialise: {err}"))
}

fn build_provision_context() -> ProvisionContextResult {
    let tmp = TempDir::new()
        .map_err(|err| ProvisionTestError::Workspace(format!("tempdir: {err}")))?;
    let tmp_path = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).map_err(|path| {
        ProvisionTestError::Workspace(format!("temp dir should be utf8: {}", path.display()))
    })?;

    let workspace = tmp_path.join("workspace");
    let fixture_dir = tmp_path.join("fixtures");
    for dir in [&workspace, &fixture_dir] {
        Dir::create_ambient_dir_all(dir, ambient_authority()).map_err(|err| {
            ProvisionTestError::Workspace(format!("create {dir}: {err}"))
        })?;
    }

    Ok(ProvisionContext {
        workspace: workspace.clone(),
        fixture_dir: fixture_dir.clone(),
        probe: ScriptedProbe::new(),
        request: ProvisionRequest {
            fixture_dir: Some(fixture_dir),
            run_id: None,
        },
        env_sets: vec![(String::from("TRAVIS_BUILD_DIR"), workspace.into_string())],
        env_unsets: vec![
            String::from("TMPDIR"),
            String::from("TMP"),
            String::from("TRAVIS_JOB_NUMBER"),
            String::from("IS_DEBUG"),
        ],
        outcome: None,
        _tmp: Arc::new(tmp),
    })
}
