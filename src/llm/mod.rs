pub mod agent;
pub mod client;

pub use agent::{Agent, SmsResponder};
pub use client::LlmClient;
