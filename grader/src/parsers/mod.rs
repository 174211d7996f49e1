//! # Parsers
//!
//! - [`analysis_parser`]: splits a candidate's free-form bug analysis into [`ClaimedEntry`](crate::types::ClaimedEntry)s.

pub mod analysis_parser;
