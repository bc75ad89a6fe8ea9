pub mod client;
pub mod models;
pub mod parse;
pub mod prompts;

pub use client::{ClientSettings, GeminiClient, GenerateFuture, GenerationService};
pub use models::{Model, Usage};
pub use parse::{extract_suggestion_array, normalize_suggestion, normalize_suggestions};
pub use prompts::{gift_ideas_prompt, DEFAULT_IDEA_COUNT};
