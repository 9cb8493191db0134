use std::sync::Arc;

use cardwise_core::domain::profile::UserProfile;

use crate::extractor::FieldExtractor;
use crate::llm::LanguageOracle;
use crate::planner::QuestionPlanner;

/// Reply sent once every slot is resolved and ranking can run.
pub const COMPLETION_MESSAGE: &str = "Thanks! I'm ready to recommend cards now.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    FollowUp(String),
    ReadyToRecommend,
}

impl TurnOutcome {
    pub fn reply(&self) -> &str {
        match self {
            Self::FollowUp(question) => question,
            Self::ReadyToRecommend => COMPLETION_MESSAGE,
        }
    }
}

/// One conversation turn: extract fields from the message, merge them into
/// the profile, then decide whether to ask again or hand off to ranking.
///
/// The oracle is strictly a translator here. Which fields exist, what gets
/// asked, and what gets recommended are deterministic decisions.
pub struct ConversationRuntime {
    extractor: FieldExtractor,
    planner: QuestionPlanner,
}

impl ConversationRuntime {
    pub fn new(oracle: Arc<dyn LanguageOracle>) -> Self {
        Self {
            extractor: FieldExtractor::new(oracle.clone()),
            planner: QuestionPlanner::new(oracle),
        }
    }

    pub async fn advance(&self, profile: &mut UserProfile, message: &str) -> TurnOutcome {
        for update in self.extractor.extract(message, profile).await {
            profile.set(update);
        }

        match self.planner.next_prompt(profile).await {
            Some(question) => TurnOutcome::FollowUp(question),
            None => TurnOutcome::ReadyToRecommend,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cardwise_core::domain::profile::UserProfile;

    use super::{ConversationRuntime, TurnOutcome, COMPLETION_MESSAGE};
    use crate::llm::DisabledOracle;

    #[tokio::test]
    async fn heuristic_only_conversation_reaches_recommendation() {
        let runtime = ConversationRuntime::new(Arc::new(DisabledOracle));
        let mut profile = UserProfile::new();

        let script =
            ["50000", "mostly travel", "lounge access please", "yes I have one", "good I think"];

        for (index, message) in script.iter().enumerate() {
            let outcome = runtime.advance(&mut profile, message).await;
            if index + 1 < script.len() {
                assert!(
                    matches!(outcome, TurnOutcome::FollowUp(_)),
                    "turn {index} should keep asking"
                );
            } else {
                assert_eq!(outcome, TurnOutcome::ReadyToRecommend);
                assert_eq!(outcome.reply(), COMPLETION_MESSAGE);
            }
        }

        assert!(profile.is_complete());
        assert_eq!(profile.income(), Some(50_000));
    }

    #[tokio::test]
    async fn unparseable_message_keeps_asking_without_losing_state() {
        let runtime = ConversationRuntime::new(Arc::new(DisabledOracle));
        let mut profile = UserProfile::new();

        runtime.advance(&mut profile, "75000").await;
        let outcome = runtime.advance(&mut profile, "hard to say really").await;

        assert!(matches!(outcome, TurnOutcome::FollowUp(_)));
        assert_eq!(profile.income(), Some(75_000));
        assert!(!profile.is_complete());
    }
}
