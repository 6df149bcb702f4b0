//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file
//! in `tests/`). Placing shared constants under `tests/common/` avoids
//! creating an additional integration test binary while still allowing reuse
//! via:
//!
//! ```rust
//! #[path = "common/fixture_constants.rs"]
//! mod fixture_constants;
//! ```

/// Username declared by the canonical test fixture.
pub const FIXTURE_USERNAME: &str = "tester";

/// Cookie payload written by the canonical test fixture.
pub const FIXTURE_COOKIES: &str = "{\"a\":1}";
