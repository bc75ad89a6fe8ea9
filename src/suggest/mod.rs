//! Suggestion engine for giftwise
//!
//! One pass per questionnaire submission: validate, prompt, call the
//! generation service, salvage the JSON array from its reply, normalize.
//! Any failure after validation collapses into a single sentinel suggestion,
//! so callers always get something renderable.

pub mod error;
pub mod llm;
pub mod static_catalog;
pub mod validate;


use crate::recipient::Recipient;
use error::PipelineError;
use llm::GenerationService;
use serde::{Deserialize, Serialize};

pub const SENTINEL_TITLE: &str = "Error";
pub const SENTINEL_DESCRIPTION: &str =
    "Sorry, we couldn't generate suggestions at this time. Please try again.";
pub const SENTINEL_REASONING: &str = "AI service error.";
pub const SENTINEL_PRICE: &str = "$0";

/// One gift recommendation. All fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftSuggestion {
    pub title: String,
    pub description: String,
    pub reasoning: String,
    /// Currency-prefixed, e.g. "$40"
    pub estimated_price: String,
}

impl GiftSuggestion {
    /// The fixed card shown when generation fails
    pub fn sentinel() -> Self {
        Self {
            title: SENTINEL_TITLE.to_string(),
            description: SENTINEL_DESCRIPTION.to_string(),
            reasoning: SENTINEL_REASONING.to_string(),
            estimated_price: SENTINEL_PRICE.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }
}

/// What happened during one pipeline run.
#[derive(Debug)]
pub enum SuggestionOutcome {
    /// Questionnaire incomplete; no request was made.
    Skipped { missing: Vec<&'static str> },
    Generated(Vec<GiftSuggestion>),
    /// The request failed; `suggestions` holds only the sentinel.
    Fallback {
        error: PipelineError,
        suggestions: Vec<GiftSuggestion>,
    },
}

impl SuggestionOutcome {
    pub fn suggestions(&self) -> &[GiftSuggestion] {
        match self {
            SuggestionOutcome::Skipped { .. } => &[],
            SuggestionOutcome::Generated(suggestions) => suggestions,
            SuggestionOutcome::Fallback { suggestions, .. } => suggestions,
        }
    }

    pub fn into_suggestions(self) -> Vec<GiftSuggestion> {
        match self {
            SuggestionOutcome::Skipped { .. } => Vec::new(),
            SuggestionOutcome::Generated(suggestions) => suggestions,
            SuggestionOutcome::Fallback { suggestions, .. } => suggestions,
        }
    }
}

/// Orchestrates a single suggestion request. Holds no per-request state, so
/// one engine can serve concurrent submissions.
pub struct SuggestionEngine<S> {
    service: S,
    idea_count: usize,
}

impl<S: GenerationService> SuggestionEngine<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            idea_count: llm::DEFAULT_IDEA_COUNT,
        }
    }

    pub fn with_idea_count(mut self, idea_count: usize) -> Self {
        self.idea_count = idea_count.max(1);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Suggestions for `recipient`. Empty when the questionnaire is incomplete,
    /// the single sentinel when anything goes wrong. Never fails.
    pub async fn generate(&self, recipient: &Recipient) -> Vec<GiftSuggestion> {
        self.run(recipient).await.into_suggestions()
    }

    pub async fn run(&self, recipient: &Recipient) -> SuggestionOutcome {
        let missing = validate::missing_fields(recipient);
        if !missing.is_empty() {
            log::warn!(
                "Skipping AI call: incomplete questionnaire (missing {})",
                missing.join(", ")
            );
            return SuggestionOutcome::Skipped { missing };
        }

        match self.request(recipient).await {
            Ok(suggestions) => {
                log::info!("Generated {} gift suggestions", suggestions.len());
                SuggestionOutcome::Generated(suggestions)
            }
            Err(error) => {
                log::error!("Error generating suggestions: {}", error);
                SuggestionOutcome::Fallback {
                    error,
                    suggestions: vec![GiftSuggestion::sentinel()],
                }
            }
        }
    }

    async fn request(&self, recipient: &Recipient) -> Result<Vec<GiftSuggestion>, PipelineError> {
        let prompt = llm::gift_ideas_prompt(recipient, self.idea_count);
        let reply = self.service.generate(&prompt).await?;
        let items = llm::extract_suggestion_array(&reply)?;
        Ok(llm::normalize_suggestions(&items))
    }
}
