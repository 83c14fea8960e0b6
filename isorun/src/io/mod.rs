//! I/O helpers for bootstrap commands.

pub mod config;
pub mod home;
pub mod process;
pub mod root;
