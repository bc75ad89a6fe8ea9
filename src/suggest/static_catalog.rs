//! Locally known gift ideas (no network, no LLM cost)
//!
//! Opt-in substitute for the AI pipeline. It is not consulted when the AI
//! call fails.

use super::GiftSuggestion;

struct CatalogEntry {
    title: &'static str,
    description: &'static str,
    reasoning: &'static str,
    /// List price in dollars
    price: f64,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        title: "Premium Wireless Headphones",
        description: "High-quality noise-canceling headphones with excellent sound quality and comfort",
        reasoning: "Perfect for music lovers and commuters, offering both style and functionality",
        price: 299.0,
    },
    CatalogEntry {
        title: "Personalized Photo Album",
        description: "Custom-made photo album with high-quality prints and elegant design",
        reasoning: "A thoughtful way to preserve memories and show care through personalization",
        price: 75.0,
    },
    CatalogEntry {
        title: "Experience Gift Box",
        description: "Curated box of activities and experiences tailored to recipient's interests",
        reasoning: "Provides memorable experiences rather than just material items",
        price: 150.0,
    },
];

/// Every catalog entry, priced at its list price capped to `budget`.
///
/// The filter runs on the rendered two-decimal price, so a budget that rounds
/// up (74.999 -> "$75.00") drops entries capped to it.
pub fn suggestions_for_budget(budget: f64) -> Vec<GiftSuggestion> {
    if !(budget.is_finite() && budget > 0.0) {
        return Vec::new();
    }

    CATALOG
        .iter()
        .map(|entry| GiftSuggestion {
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            reasoning: entry.reasoning.to_string(),
            estimated_price: format!("${:.2}", entry.price.min(budget)),
        })
        .filter(|s| price_value(&s.estimated_price).is_some_and(|price| price <= budget))
        .collect()
}

fn price_value(price: &str) -> Option<f64> {
    price.trim_start_matches('$').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(budget: f64) -> Vec<String> {
        suggestions_for_budget(budget)
            .into_iter()
            .map(|s| s.title)
            .collect()
    }

    #[test]
    fn test_large_budget_returns_everything_in_order() {
        assert_eq!(
            titles(500.0),
            vec![
                "Premium Wireless Headphones",
                "Personalized Photo Album",
                "Experience Gift Box"
            ]
        );
    }

    fn prices(budget: f64) -> Vec<String> {
        suggestions_for_budget(budget)
            .into_iter()
            .map(|s| s.estimated_price)
            .collect()
    }

    #[test]
    fn test_prices_are_capped_to_budget() {
        assert_eq!(prices(80.0), vec!["$80.00", "$75.00", "$80.00"]);
        assert_eq!(prices(20.0), vec!["$20.00", "$20.00", "$20.00"]);
        assert_eq!(prices(500.0), vec!["$299.00", "$75.00", "$150.00"]);
    }

    #[test]
    fn test_small_budget_still_lists_whole_catalog() {
        assert_eq!(titles(80.0).len(), 3);
    }

    #[test]
    fn test_rounded_up_price_is_filtered_out() {
        assert_eq!(prices(74.999), Vec::<String>::new());
    }

    #[test]
    fn test_prices_are_currency_prefixed() {
        let suggestions = suggestions_for_budget(100.0);
        assert_eq!(suggestions[1].estimated_price, "$75.00");
    }

    #[test]
    fn test_non_positive_budget_is_empty() {
        assert!(suggestions_for_budget(0.0).is_empty());
        assert!(suggestions_for_budget(-10.0).is_empty());
        assert!(suggestions_for_budget(f64::NAN).is_empty());
    }
}
