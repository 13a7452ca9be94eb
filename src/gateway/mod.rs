pub mod error;
pub mod openai;
pub mod traits;

pub use error::GatewayError;
pub use openai::{GatewayConfig, OpenAiGateway};
pub use traits::{ChatGateway, CredentialStore};
