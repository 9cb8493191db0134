use std::sync::Arc;

use cardwise_core::domain::profile::{FieldKind, UserProfile};

use crate::llm::LanguageOracle;

/// Decides what to ask next. `None` means every required field is resolved
/// and the caller can hand off to the recommendation engine.
pub struct QuestionPlanner {
    oracle: Arc<dyn LanguageOracle>,
}

impl QuestionPlanner {
    pub fn new(oracle: Arc<dyn LanguageOracle>) -> Self {
        Self { oracle }
    }

    /// Produces exactly one follow-up question while fields are missing.
    /// The oracle sees the full missing list; on failure or a blank reply
    /// the static question for the first missing field is used instead.
    pub async fn next_prompt(&self, profile: &UserProfile) -> Option<String> {
        let missing = profile.missing_fields();
        let first_missing = *missing.first()?;

        match self.oracle.complete(&followup_prompt(&missing)).await {
            Ok(question) if !question.trim().is_empty() => Some(question.trim().to_string()),
            Ok(_) => Some(fallback_question(first_missing).to_string()),
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.planner.oracle_failed",
                    error = %error,
                    field = first_missing.wire_name(),
                    "oracle question generation failed, using static question"
                );
                Some(fallback_question(first_missing).to_string())
            }
        }
    }
}

fn followup_prompt(missing: &[FieldKind]) -> String {
    let names: Vec<&str> = missing.iter().map(|field| field.wire_name()).collect();
    format!(
        "You are an assistant helping someone choose a credit card.\n\
         They have not told you: {}.\n\
         Ask a simple, friendly question to get the next one. Ask only one thing.\n",
        names.join(", ")
    )
}

/// Canned questions used whenever the oracle cannot supply one.
pub fn fallback_question(field: FieldKind) -> &'static str {
    match field {
        FieldKind::Income => "What is your monthly income?",
        FieldKind::Spending => "Where do you spend the most: fuel, groceries, travel, or dining?",
        FieldKind::Benefits => {
            "Which benefit matters most to you: cashback, lounge access, or travel points?"
        }
        FieldKind::Cards => "Do you already have any credit cards?",
        FieldKind::Score => "How would you rate your credit score: good, low, or unknown?",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use cardwise_core::domain::profile::{
        CardOwnership, CreditScoreBand, FieldValue, PreferredBenefit, SpendingCategory, UserProfile,
    };

    use super::QuestionPlanner;
    use crate::llm::{DisabledOracle, LanguageOracle, OracleError};

    struct StubOracle {
        reply: &'static str,
    }

    #[async_trait]
    impl LanguageOracle for StubOracle {
        async fn complete(&self, _prompt: &str) -> Result<String, OracleError> {
            Ok(self.reply.to_string())
        }
    }

    fn complete_profile() -> UserProfile {
        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(45_000));
        profile.set(FieldValue::Spending(SpendingCategory::Groceries));
        profile.set(FieldValue::Benefits(PreferredBenefit::Cashback));
        profile.set(FieldValue::Cards(CardOwnership::None));
        profile.set(FieldValue::Score(CreditScoreBand::Good));
        profile
    }

    #[tokio::test]
    async fn complete_profile_needs_no_question() {
        let planner = QuestionPlanner::new(Arc::new(DisabledOracle));

        assert_eq!(planner.next_prompt(&complete_profile()).await, None);
    }

    #[tokio::test]
    async fn oracle_question_is_used_when_available() {
        let planner =
            QuestionPlanner::new(Arc::new(StubOracle { reply: "  How much do you earn?  \n" }));

        let question = planner.next_prompt(&UserProfile::new()).await;

        assert_eq!(question.as_deref(), Some("How much do you earn?"));
    }

    #[tokio::test]
    async fn oracle_failure_falls_back_to_static_question_for_first_missing_field() {
        let planner = QuestionPlanner::new(Arc::new(DisabledOracle));

        let question = planner.next_prompt(&UserProfile::new()).await;

        assert_eq!(question.as_deref(), Some("What is your monthly income?"));
    }

    #[tokio::test]
    async fn blank_oracle_reply_falls_back_to_static_question() {
        let planner = QuestionPlanner::new(Arc::new(StubOracle { reply: "   " }));
        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(45_000));

        let question = planner.next_prompt(&profile).await;

        assert_eq!(
            question.as_deref(),
            Some("Where do you spend the most: fuel, groceries, travel, or dining?")
        );
    }
}
