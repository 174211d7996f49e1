//! # Utilities
//!
//! Small text helpers shared by the parser and the scorers.
//!
//! - [`text_normalization`]: canonical lower-cased, whitespace-collapsed form of free text.

pub mod text_normalization;
