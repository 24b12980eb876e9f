//! CLI commands

pub mod batch;
pub mod generate;
pub mod init;
