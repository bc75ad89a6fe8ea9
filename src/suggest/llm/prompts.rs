use crate::recipient::Recipient;

/// How many ideas to ask for when the config does not say otherwise
pub const DEFAULT_IDEA_COUNT: usize = 5;

/// Reply contract appended to every gift prompt. The field names and the
/// "array of objects" framing are what `parse::extract_suggestion_array` and
/// `parse::normalize_suggestions` depend on.
pub const GIFT_IDEAS_FORMAT: &str = r#"Format the response as a JSON array of objects with:
- title (string)
- description (string)
- reasoning (string)
- estimatedPrice (string)

Ensure the response is valid JSON with no extra text."#;

fn interest_list(recipient: &Recipient) -> String {
    recipient
        .interests
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the instruction sent to the generation service.
pub fn gift_ideas_prompt(recipient: &Recipient, idea_count: usize) -> String {
    format!(
        "Provide {count} unique gift ideas based on:\n\
         Occasion: {occasion}\n\
         Relationship: {relationship}\n\
         Interests: {interests}\n\
         Budget: ${budget}\n\n\
         {format}",
        count = idea_count.max(1),
        occasion = recipient.occasion,
        relationship = recipient.relationship,
        interests = interest_list(recipient),
        budget = recipient.budget,
        format = GIFT_IDEAS_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Recipient {
        Recipient::new("Sam")
            .with_occasion("Birthday")
            .with_relationship("Friend")
            .with_interests(["chess", "coffee"])
            .with_budget(50.0)
    }

    #[test]
    fn test_prompt_contains_recipient_fields() {
        let prompt = gift_ideas_prompt(&recipient(), DEFAULT_IDEA_COUNT);
        assert!(prompt.contains("Occasion: Birthday"));
        assert!(prompt.contains("Relationship: Friend"));
        assert!(prompt.contains("Interests: chess, coffee"));
        assert!(prompt.contains("Budget: $50\n"));
        assert!(prompt.starts_with("Provide 5 unique gift ideas"));
    }

    #[test]
    fn test_prompt_names_every_output_field() {
        let prompt = gift_ideas_prompt(&recipient(), 3);
        for field in ["title", "description", "reasoning", "estimatedPrice"] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains("JSON array of objects"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = gift_ideas_prompt(&recipient(), 5);
        let b = gift_ideas_prompt(&recipient(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractional_budget_renders_verbatim() {
        let prompt = gift_ideas_prompt(&recipient().with_budget(49.5), 5);
        assert!(prompt.contains("Budget: $49.5\n"));
    }

    #[test]
    fn test_blank_interests_are_left_out() {
        let mut recipient = recipient();
        recipient.interests = vec![" chess ".into(), "  ".into(), "coffee".into()];
        let prompt = gift_ideas_prompt(&recipient, 5);
        assert!(prompt.contains("Interests: chess, coffee\n"));
    }

    #[test]
    fn test_zero_idea_count_still_asks_for_one() {
        let prompt = gift_ideas_prompt(&recipient(), 0);
        assert!(prompt.starts_with("Provide 1 unique gift ideas"));
    }
}
