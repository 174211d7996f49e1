//! Shared configuration values for the grading engine and its callers.
//!
//! - [`config`]: settings for the optional AI-assisted grading layer, read from the environment.
//! - [`grading_config`]: the full grading configuration, loadable from JSON with per-field defaults.

pub mod config;
pub mod grading_config;
