pub mod cache;
pub mod gateway;
pub mod models;
pub mod parsers;
pub mod prompts;
pub mod service;

pub use gateway::{ChatGateway, CredentialStore, GatewayConfig, GatewayError, OpenAiGateway};
pub use service::InsightService;
