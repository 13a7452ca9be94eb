use crate::gateway::error::GatewayError;
use crate::models::ChatTurn;
use async_trait::async_trait;

/// Transport seam to the external language model.
///
/// Implementations send an ordered, non-empty turn list and return the first
/// completion's text. An empty completion list is a valid empty string, not
/// an error. No retries happen at this level; retry policy belongs to the
/// caller.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Perform one chat-completion call and return the raw text.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, GatewayError>;

    /// Identifier of the model this gateway targets
    fn model_name(&self) -> &str;
}

/// Synchronous accessor for the current API credential.
///
/// The secret store itself (keychain, env, config file) lives outside the
/// core; rotation is the store's problem, the gateway just reads the current
/// value per call.
pub trait CredentialStore: Send + Sync {
    fn api_key(&self) -> String;
}
