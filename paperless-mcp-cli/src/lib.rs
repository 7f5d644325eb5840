//! Library interface for the Paperless MCP CLI
//!
//! Exposes the argument parser and exit codes so integration tests can
//! drive the CLI surface without spawning a process.

pub mod cli;
pub mod exit_codes;
