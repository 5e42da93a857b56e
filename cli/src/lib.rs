//! Command-line front end for the place publishing engine.
//!
//! This crate sources publish inputs from flags, GitHub Actions environment
//! variables, and an optional TOML file, reads the place file, runs the
//! `place-publish` engine, and reports the outcome for people, scripts, and
//! workflow runners.
//!
//! # Modules
//!
//! - [`artifact`] - Reading the place file into a publish request
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layering flag, environment, and file inputs
//! - [`error`] - CLI plumbing errors
//! - [`logging`] - Logger installation
//! - [`publish_flow`] - The end-to-end run
//! - [`report`] - Human, JSON, and GitHub Actions reporting

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod publish_flow;
pub mod report;
