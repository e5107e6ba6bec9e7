//! Shared types used across all assistant crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display languages supported by the assistant. English is the dataset's
/// primary language; Hindi fields carry the localized rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Parses a raw language tag from a query string or request body.
    /// Anything other than `"hi"` resolves to English — an unrecognized tag
    /// is degraded input, not an error.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("hi") => Language::Hi,
            _ => Language::En,
        }
    }

    /// Wire tag for this language.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

/// Role of a chat participant, as sent by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn exchanged between the UI and the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Global application configuration (gateway + identity). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application identity shown in `/v1/status` and logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Base directory for the sled profile store.
    pub storage_path: String,
    /// LLM mode ("mock" or "live").
    pub llm_mode: String,
    /// Path to the bilingual knowledge dataset (JSON).
    pub knowledge_path: String,
    /// Language used when a chat request does not specify one.
    #[serde(default)]
    pub default_language: Language,

    /// If true, the gateway serves the static UI from `frontend/`. (Config alias: `ui_enabled`)
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
}

impl AppConfig {
    /// Load config from file and environment. Precedence: env `NYAYA_CONFIG`
    /// path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("NYAYA_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Nyaya Sahayak Gateway")?
            .set_default("port", 8001_i64)?
            .set_default("storage_path", "./data")?
            .set_default("llm_mode", "mock")?
            .set_default("knowledge_path", "config/legal_knowledge.json")?
            .set_default("default_language", "en")?
            .set_default("frontend_enabled", false)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("NYAYA").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_language_tags_resolve_to_english() {
        assert_eq!(Language::parse_or_default(Some("hi")), Language::Hi);
        assert_eq!(Language::parse_or_default(Some("en")), Language::En);
        assert_eq!(Language::parse_or_default(Some("fr")), Language::En);
        assert_eq!(Language::parse_or_default(Some("")), Language::En);
        assert_eq!(Language::parse_or_default(None), Language::En);
    }

    #[test]
    fn language_round_trips_through_serde() {
        let hi: Language = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(hi, Language::Hi);
        assert_eq!(serde_json::to_string(&Language::Hi).unwrap(), "\"hi\"");
        assert_eq!(Language::default().as_tag(), "en");
    }

    #[test]
    fn chat_message_deserializes_from_ui_payload() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"user","content":"What is Article 14?"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What is Article 14?");
    }
}
