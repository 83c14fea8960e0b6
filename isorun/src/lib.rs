//! Isolated test-session bootstrap.
//!
//! This crate prepares a throwaway environment for one test run: a fresh
//! temporary home directory (with `.config` and `.cache` inside) and a
//! module search path pointing at the repository root. It then delegates to
//! the external test runner and relays its outcome. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (environment map, outcome
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, process execution).
//!   Isolated to enable scripted runners in tests.
//!
//! The [`session`] module coordinates core logic with I/O to implement the
//! CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
