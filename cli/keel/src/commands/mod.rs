//! CLI command implementations.

pub mod init;
pub mod modules;
pub mod plan;
pub mod target;
