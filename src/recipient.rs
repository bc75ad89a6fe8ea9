//! The person a gift is for, as captured by the questionnaire.

use serde::{Deserialize, Serialize};

/// Occasions offered by the questionnaire. Free text is accepted too.
pub const OCCASIONS: &[&str] = &[
    "Birthday",
    "Anniversary",
    "Wedding",
    "Graduation",
    "Christmas",
    "Housewarming",
    "Baby Shower",
    "Other",
];

/// Relationships offered by the questionnaire. Free text is accepted too.
pub const RELATIONSHIPS: &[&str] = &[
    "Family",
    "Friend",
    "Colleague",
    "Partner",
    "Acquaintance",
    "Other",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub age: u32,
    pub occasion: String,
    pub relationship: String,
    /// Insertion order is kept; use `add_interest` to keep entries unique.
    pub interests: Vec<String>,
    /// Single currency (dollars).
    pub budget: f64,
}

impl Recipient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = occasion.into();
        self
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for interest in interests {
            self.add_interest(interest.as_ref());
        }
        self
    }

    /// Append a trimmed interest. Returns false for blanks and duplicates.
    pub fn add_interest(&mut self, interest: &str) -> bool {
        let interest = interest.trim();
        if interest.is_empty() || self.interests.iter().any(|i| i == interest) {
            return false;
        }
        self.interests.push(interest.to_string());
        true
    }

    pub fn remove_interest(&mut self, interest: &str) -> bool {
        let before = self.interests.len();
        self.interests.retain(|i| i != interest);
        self.interests.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_interest_trims_and_dedupes() {
        let mut recipient = Recipient::new("Sam");
        assert!(recipient.add_interest("  chess "));
        assert!(!recipient.add_interest("chess"));
        assert!(!recipient.add_interest("   "));
        assert!(recipient.add_interest("coffee"));
        assert_eq!(recipient.interests, vec!["chess", "coffee"]);
    }

    #[test]
    fn test_remove_interest() {
        let mut recipient = Recipient::new("Sam").with_interests(["chess", "coffee"]);
        assert!(recipient.remove_interest("chess"));
        assert!(!recipient.remove_interest("chess"));
        assert_eq!(recipient.interests, vec!["coffee"]);
    }

    #[test]
    fn test_with_interests_keeps_order() {
        let recipient = Recipient::new("Sam").with_interests(["b", "a", "b", "c"]);
        assert_eq!(recipient.interests, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_presets_contain_other() {
        assert!(OCCASIONS.contains(&"Other"));
        assert!(RELATIONSHIPS.contains(&"Other"));
    }
}
