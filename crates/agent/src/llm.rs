use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle is disabled")]
    Disabled,
    #[error("oracle request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("oracle transport failure: {0}")]
    Transport(String),
    #[error("oracle returned status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("oracle response was malformed: {0}")]
    MalformedResponse(String),
}

/// The natural-language service behind the conversation: text prompt in,
/// free text out. Injected so the extraction and planning logic can be
/// exercised with deterministic stubs.
#[async_trait]
pub trait LanguageOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Stand-in used when no oracle is configured. Every call fails, which
/// drops callers onto their heuristic/static fallback paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledOracle;

#[async_trait]
impl LanguageOracle for DisabledOracle {
    async fn complete(&self, _prompt: &str) -> Result<String, OracleError> {
        Err(OracleError::Disabled)
    }
}
