//! Plain-text rendering of suggestion lists for the terminal.

use crate::suggest::GiftSuggestion;
use crate::util::truncate;
use std::fmt::Write;

/// Longest title shown before truncating
const MAX_TITLE_CHARS: usize = 72;

/// Numbered cards: title and price, then description and reasoning.
pub fn render_cards(suggestions: &[GiftSuggestion]) -> String {
    let mut out = String::new();
    if suggestions.is_empty() {
        return out;
    }

    let _ = writeln!(out, "Gift Ideas");
    let _ = writeln!(out, "==========");
    for (idx, gift) in suggestions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {}  ({})",
            idx + 1,
            truncate(&gift.title, MAX_TITLE_CHARS),
            gift.estimated_price
        );
        let _ = writeln!(out, "   {}", gift.description);
        let _ = writeln!(out, "   Why: {}", gift.reasoning);
    }
    out
}

pub fn render_json(suggestions: &[GiftSuggestion]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(suggestions)
}
