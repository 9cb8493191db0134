//! Conversational layer: natural language in, resolved profile fields out.
//!
//! The crate turns each free-text message into typed field updates and
//! decides what to ask next:
//! 1. **Field extraction** (`extractor`) - deterministic heuristics first,
//!    oracle JSON fallback second; resolved fields are never overwritten.
//! 2. **Question planning** (`planner`) - one follow-up per turn, with a
//!    static question table when the oracle is unavailable.
//! 3. **Turn orchestration** (`runtime`) - extract, merge, plan.
//!
//! The language oracle (`llm`, `oracle`) is an injected capability, so all
//! of the above is testable with deterministic stubs and keeps working in a
//! degraded heuristic-only mode when no oracle is configured.

pub mod extractor;
pub mod llm;
pub mod oracle;
pub mod planner;
pub mod runtime;

pub use extractor::FieldExtractor;
pub use llm::{DisabledOracle, LanguageOracle, OracleError};
pub use oracle::OracleClient;
pub use planner::QuestionPlanner;
pub use runtime::{ConversationRuntime, TurnOutcome, COMPLETION_MESSAGE};
