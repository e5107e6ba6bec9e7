//! Chat-completion routing for the legal-information assistant: the fixed
//! bilingual system prompts plus a mock/live client for a hosted
//! `generateContent`-style LLM API.

mod prompt;
mod router;

pub use prompt::system_prompt;
pub use router::{ChatError, ChatRouter, LlmMode};
