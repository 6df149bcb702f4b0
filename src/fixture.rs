//! Fixture loading for testbed runs.
//!
//! A fixture is a static JSON document supplying the account identity and
//! session cookies for a run. Only the absence of the file is a
//! distinguished failure; everything else surfaces the underlying error.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;
use thiserror::Error;

/// File name of the fixture consulted for every run.
pub const FIXTURE_FILE_NAME: &str = "TestVariables.json";

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Raised when the fixture file does not exist.
    #[error("fixture file not found at {path}")]
    NotFound {
        /// Path that was attempted.
        path: Utf8PathBuf,
    },
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the fixture content is not the expected JSON shape.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the fixture declares a blank username.
    #[error("fixture {path} declares an empty username")]
    MissingUsername {
        /// Path of the offending fixture.
        path: Utf8PathBuf,
    },
}

/// Identity and session data read from the fixture file.
///
/// Additional top-level keys in the document are ignored; `cookies` is kept
/// as raw JSON and written back without transformation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fixture {
    /// Account identity used to derive the cookie file name.
    pub username: String,
    /// Session cookies persisted verbatim into the run's data directory.
    pub cookies: serde_json::Value,
}

impl Fixture {
    /// Loads the fixture named [`FIXTURE_FILE_NAME`] from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NotFound`] when the file (or `dir` itself) is
    /// absent, [`FixtureError::Io`] when reading fails,
    /// [`FixtureError::Parse`] when the content is not valid fixture JSON,
    /// and [`FixtureError::MissingUsername`] when the declared username is
    /// blank.
    pub fn load_from_dir(dir: &Utf8Path) -> Result<Self, FixtureError> {
        let path = dir.join(FIXTURE_FILE_NAME);
        let handle = match Dir::open_ambient_dir(dir, ambient_authority()) {
            Ok(handle) => handle,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(FixtureError::NotFound { path });
            }
            Err(err) => {
                return Err(FixtureError::Io {
                    path: dir.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };

        let exists = handle
            .try_exists(FIXTURE_FILE_NAME)
            .map_err(|err| FixtureError::Io {
                path: path.clone(),
                message: err.to_string(),
            })?;
        if !exists {
            return Err(FixtureError::NotFound { path });
        }

        let contents = handle
            .read_to_string(FIXTURE_FILE_NAME)
            .map_err(|err| FixtureError::Io {
                path: path.clone(),
                message: err.to_string(),
            })?;

        let fixture: Self =
            serde_json::from_str(&contents).map_err(|err| FixtureError::Parse {
                path: path.clone(),
                message: err.to_string(),
            })?;

        if fixture.username.trim().is_empty() {
            return Err(FixtureError::MissingUsername { path });
        }
        Ok(fixture)
    }
}

/// Default directory searched for the fixture file.
///
/// The fixture lives at the project root, one level above this crate's
/// manifest directory. When the crate sits at a filesystem root the manifest
/// directory itself is used.
#[must_use]
pub fn default_fixture_dir() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map_or_else(|| manifest_dir.to_path_buf(), Utf8Path::to_path_buf)
}
