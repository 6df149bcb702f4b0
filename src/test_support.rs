//! Test support utilities shared across unit and integration tests.

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};

use crate::run_env::WritabilityProbe;

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    #[must_use]
    pub fn set_vars(pairs: &[(&str, &str)]) -> Self {
        Self::scoped(pairs, &[])
    }

    /// Sets and clears environment variables while holding a global mutex.
    #[must_use]
    pub fn scoped(set: &[(&str, &str)], unset: &[&str]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                set.iter()
                    .map(|(key, _)| *key)
                    .chain(unset.iter().copied())
                    .all(|key| seen.insert(key))
            },
            "duplicate environment variable keys passed to EnvGuard::scoped"
        );

        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(set.len() + unset.len());
        for (key, value) in set {
            previous.push(((*key).to_owned(), env::var_os(key)));
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
        }
        for key in unset {
            previous.push(((*key).to_owned(), env::var_os(key)));
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::remove_var(key) };
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

/// Scripted writability probe answering from a pre-seeded allow list.
///
/// Records every checked path so walk order can be asserted without
/// touching real filesystem permissions.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProbe {
    writable: std::rc::Rc<std::cell::RefCell<BTreeSet<Utf8PathBuf>>>,
    checks: std::rc::Rc<std::cell::RefCell<Vec<Utf8PathBuf>>>,
}

impl ScriptedProbe {
    /// Creates a probe that reports every path as unwritable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a path as writable.
    pub fn allow(&self, path: impl Into<Utf8PathBuf>) {
        self.writable.borrow_mut().insert(path.into());
    }

    /// Returns a snapshot of all paths checked so far.
    #[must_use]
    pub fn checks(&self) -> Vec<Utf8PathBuf> {
        self.checks.borrow().clone()
    }
}

impl WritabilityProbe for ScriptedProbe {
    fn is_writable(&self, path: &Utf8Path) -> bool {
        self.checks.borrow_mut().push(path.to_path_buf());
        self.writable.borrow().contains(path)
    }
}

/// Renders a minimal fixture document for seeding test directories.
#[must_use]
pub fn fixture_json(username: &str, cookies_json: &str) -> String {
    format!("{{\"username\":\"{username}\",\"cookies\":{cookies_json}}}")
}
