//! Process-environment discovery for a test run.
//!
//! Resolves the writable root directory used to host run workspaces, derives
//! the run identifier, and reads the debug flag. All lookups go through the
//! process environment; filesystem writability is answered by a
//! [`WritabilityProbe`] so the walk stays testable.

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use thiserror::Error;

/// Environment variables scanned, in order, for a usable root directory.
pub const ROOT_HINT_VARS: [&str; 3] = ["TRAVIS_BUILD_DIR", "TMPDIR", "TMP"];

/// CI variable whose value is used verbatim as the run identifier.
pub const CI_JOB_NUMBER_VAR: &str = "TRAVIS_JOB_NUMBER";

/// Variable enabling debug mode when present with a non-empty value.
pub const IS_DEBUG_VAR: &str = "IS_DEBUG";

/// Directory created under the resolved root to hold all run workspaces.
pub const RUN_PARENT_DIR: &str = "logs";

const RUN_ID_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S-%6f";

/// Errors raised while discovering the run environment.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RunEnvError {
    /// Raised when no hint matched and the working directory is unavailable.
    #[error("failed to resolve the current directory: {message}")]
    CurrentDir {
        /// Human-readable description of the failure.
        message: String,
    },
}

/// Answers whether a directory is writable for the current user.
pub trait WritabilityProbe {
    /// Returns true when `path` exists and is writable.
    fn is_writable(&self, path: &Utf8Path) -> bool;
}

/// Probe backed by real filesystem access checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsProbe;

impl WritabilityProbe for FsProbe {
    fn is_writable(&self, path: &Utf8Path) -> bool {
        writable(path)
    }
}

#[cfg(unix)]
fn writable(path: &Utf8Path) -> bool {
    nix::unistd::access(path.as_std_path(), nix::unistd::AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn writable(path: &Utf8Path) -> bool {
    std::fs::metadata(path.as_std_path()).is_ok_and(|meta| !meta.permissions().readonly())
}

/// Resolves the root directory that hosts run workspaces.
///
/// Scans [`ROOT_HINT_VARS`] in order; for the first hint naming a writable
/// directory, walks upward while the parent is also writable and returns the
/// topmost writable ancestor. Hints naming unwritable directories fall
/// through to the next variable. When no hint resolves, the current working
/// directory is used.
///
/// # Errors
///
/// Returns [`RunEnvError::CurrentDir`] when the fallback working directory
/// cannot be determined or is not valid UTF-8.
pub fn resolve_run_root<P>(probe: &P) -> Result<Utf8PathBuf, RunEnvError>
where
    P: WritabilityProbe + ?Sized,
{
    for var_name in ROOT_HINT_VARS {
        let Some(raw) = env::var_os(var_name) else {
            continue;
        };
        let Some(candidate) = raw.to_str().map(Utf8PathBuf::from) else {
            continue;
        };
        if let Some(found) = topmost_writable(candidate, probe) {
            return Ok(found);
        }
    }
    current_dir_fallback()
}

/// Walks upward from `candidate`, stopping at the first unwritable parent or
/// at the filesystem root. Returns `None` when `candidate` itself is not
/// writable, so the caller can try the next hint.
fn topmost_writable<P>(candidate: Utf8PathBuf, probe: &P) -> Option<Utf8PathBuf>
where
    P: WritabilityProbe + ?Sized,
{
    let mut current = candidate;
    loop {
        if !probe.is_writable(&current) {
            return None;
        }
        let next = current
            .parent()
            .filter(|parent| probe.is_writable(parent))
            .map(Utf8Path::to_path_buf);
        match next {
            Some(parent) => current = parent,
            None => return Some(current),
        }
    }
}

fn current_dir_fallback() -> Result<Utf8PathBuf, RunEnvError> {
    let cwd = env::current_dir().map_err(|err| RunEnvError::CurrentDir {
        message: err.to_string(),
    })?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|path| RunEnvError::CurrentDir {
        message: format!("path is not valid UTF-8: {}", path.display()),
    })
}

/// Derives the identifier naming this run's workspace directory.
///
/// Uses [`CI_JOB_NUMBER_VAR`] verbatim when present, otherwise a UTC
/// timestamp with microsecond precision.
#[must_use]
pub fn derive_run_id() -> String {
    env::var(CI_JOB_NUMBER_VAR).unwrap_or_else(|_| timestamp_run_id())
}

fn timestamp_run_id() -> String {
    Utc::now().format(RUN_ID_TIMESTAMP_FORMAT).to_string()
}

/// Returns true when [`IS_DEBUG_VAR`] is present with any non-empty value.
///
/// The contract is string truthiness: `IS_DEBUG=false` still enables debug
/// mode, while an empty value does not.
#[must_use]
pub fn is_debug_from_env() -> bool {
    env::var_os(IS_DEBUG_VAR).is_some_and(|value| !value.is_empty())
}
