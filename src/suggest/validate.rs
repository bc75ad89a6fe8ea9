//! Completeness guard run before any network call.

use crate::recipient::Recipient;

/// Required questionnaire fields that are still missing, in form order.
pub fn missing_fields(recipient: &Recipient) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if recipient.occasion.trim().is_empty() {
        missing.push("occasion");
    }
    if recipient.relationship.trim().is_empty() {
        missing.push("relationship");
    }
    if recipient.interests.iter().all(|i| i.trim().is_empty()) {
        missing.push("interests");
    }
    if !(recipient.budget.is_finite() && recipient.budget > 0.0) {
        missing.push("budget");
    }
    missing
}

pub fn is_valid(recipient: &Recipient) -> bool {
    missing_fields(recipient).is_empty()
}
