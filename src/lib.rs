//! giftwise library crate
//!
//! Exposes the suggestion pipeline so the CLI, benchmarks and tests can drive
//! it without going through argument parsing.

pub mod config;
pub mod recipient;
pub mod render;
pub mod suggest;
pub mod util;

pub use recipient::Recipient;
pub use suggest::{GiftSuggestion, SuggestionEngine, SuggestionOutcome};
