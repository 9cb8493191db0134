use std::sync::Arc;

use serde::Deserialize;

use cardwise_core::domain::profile::{
    CardOwnership, CreditScoreBand, FieldKind, FieldValue, PreferredBenefit, SpendingCategory,
    UserProfile,
};
use cardwise_core::textjson;

use crate::llm::LanguageOracle;

/// Layered field extraction: deterministic heuristics first, oracle second.
///
/// Returns candidate updates; the caller merges them through
/// [`UserProfile::set`], so an already-resolved field can never be removed
/// or overwritten regardless of what a message or the oracle claims.
pub struct FieldExtractor {
    oracle: Arc<dyn LanguageOracle>,
}

impl FieldExtractor {
    pub fn new(oracle: Arc<dyn LanguageOracle>) -> Self {
        Self { oracle }
    }

    pub async fn extract(&self, message: &str, profile: &UserProfile) -> Vec<FieldValue> {
        if let Some(update) = heuristic_update(message, profile) {
            return vec![update];
        }

        match self.oracle.complete(&extraction_prompt(message)).await {
            Ok(reply) => oracle_updates(&reply, profile),
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.extractor.oracle_failed",
                    error = %error,
                    "oracle extraction failed, continuing without updates"
                );
                Vec::new()
            }
        }
    }
}

/// Fast-path extraction over the lowercased message. At most one field per
/// call, tested in fixed priority order; a check only fires while its field
/// is unset, so a keyword for a resolved field falls through to later checks.
pub fn heuristic_update(message: &str, profile: &UserProfile) -> Option<FieldValue> {
    let message = message.trim().to_ascii_lowercase();

    // Digit concatenation is deliberately crude: separators, decimal points,
    // and unit suffixes are stripped, so "60k" reads as 60 and "1,200" as
    // 1200. Known limitation of the collection flow.
    if message.chars().any(|ch| ch.is_ascii_digit()) && !profile.is_set(FieldKind::Income) {
        let digits: String = message.chars().filter(char::is_ascii_digit).collect();
        if let Ok(income) = digits.parse::<u64>() {
            return Some(FieldValue::Income(income));
        }
    }

    if !profile.is_set(FieldKind::Spending) {
        for category in SpendingCategory::ALL {
            if message.contains(category.perk_tag()) {
                return Some(FieldValue::Spending(category));
            }
        }
    }

    if !profile.is_set(FieldKind::Benefits) {
        for benefit in PreferredBenefit::ALL {
            if message.contains(benefit.perk_tag()) {
                return Some(FieldValue::Benefits(benefit));
            }
        }
    }

    // "yes" before "no", and the cards sweep before the score sweep: the
    // priority order is fixed even where vocabularies overlap as substrings.
    if !profile.is_set(FieldKind::Cards) {
        if message.contains("yes") {
            return Some(FieldValue::Cards(CardOwnership::Yes));
        }
        if message.contains("no") {
            return Some(FieldValue::Cards(CardOwnership::None));
        }
    }

    if !profile.is_set(FieldKind::Score) {
        for band in CreditScoreBand::ALL {
            if message.contains(band.as_str()) {
                return Some(FieldValue::Score(band));
            }
        }
    }

    None
}

fn extraction_prompt(message: &str) -> String {
    format!(
        "You are helping a user choose a credit card.\n\
         Extract the following fields from the user's message as JSON:\n\
         - income (number only)\n\
         - spending (fuel, groceries, travel, dining)\n\
         - benefits (cashback, lounge access, travel points)\n\
         - cards (yes or none)\n\
         - score (good, low, unknown)\n\
         Respond only in JSON. Use null if not found.\n\
         \n\
         User: {message}\n"
    )
}

/// The oracle's JSON contract. Every key is nullable and anything
/// unrecognizable is dropped rather than surfaced as an error.
#[derive(Debug, Default, Deserialize)]
struct OracleExtraction {
    #[serde(default)]
    income: Option<serde_json::Value>,
    #[serde(default)]
    spending: Option<String>,
    #[serde(default)]
    benefits: Option<String>,
    #[serde(default)]
    cards: Option<String>,
    #[serde(default)]
    score: Option<String>,
}

fn oracle_updates(reply: &str, profile: &UserProfile) -> Vec<FieldValue> {
    let Some(extraction) = textjson::parse_embedded::<OracleExtraction>(reply) else {
        tracing::warn!(
            event_name = "agent.extractor.malformed_oracle_reply",
            "no JSON object found in oracle reply"
        );
        return Vec::new();
    };

    let mut updates = Vec::new();

    if !profile.is_set(FieldKind::Income) {
        if let Some(income) = extraction.income.as_ref().and_then(coerce_income) {
            updates.push(FieldValue::Income(income));
        }
    }
    if !profile.is_set(FieldKind::Spending) {
        if let Some(category) = extraction.spending.as_deref().and_then(SpendingCategory::parse) {
            updates.push(FieldValue::Spending(category));
        }
    }
    if !profile.is_set(FieldKind::Benefits) {
        if let Some(benefit) = extraction.benefits.as_deref().and_then(PreferredBenefit::parse) {
            updates.push(FieldValue::Benefits(benefit));
        }
    }
    if !profile.is_set(FieldKind::Cards) {
        if let Some(ownership) = extraction.cards.as_deref().and_then(CardOwnership::parse) {
            updates.push(FieldValue::Cards(ownership));
        }
    }
    if !profile.is_set(FieldKind::Score) {
        if let Some(band) = extraction.score.as_deref().and_then(CreditScoreBand::parse) {
            updates.push(FieldValue::Score(band));
        }
    }

    updates
}

/// The oracle is asked for a bare number but returns numbers, numeric
/// strings, or fractions depending on its mood. Coerce to an integer.
fn coerce_income(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|parsed| *parsed >= 0.0).map(|parsed| parsed as u64)),
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            trimmed.parse::<u64>().ok().or_else(|| {
                trimmed.parse::<f64>().ok().filter(|parsed| *parsed >= 0.0).map(|parsed| parsed as u64)
            })
        }
        _ => None,
    }
}
