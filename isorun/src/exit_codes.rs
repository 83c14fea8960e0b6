//! Stable exit codes for isorun commands.

/// Delegated run succeeded; temporary home released.
pub const OK: i32 = 0;
/// Delegated run failed or timed out (temporary home preserved), or setup
/// errored before delegation.
pub const FAILED: i32 = 1;
