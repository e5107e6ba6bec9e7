//! Chat router: sends the conversation to an LLM (mock or live API) and
//! returns the buffered generated text.

use nyaya_core::{ChatMessage, Language, Role};

use crate::prompt::system_prompt;

const ENV_LLM_MODE: &str = "NYAYA_LLM_MODE";
const ENV_LLM_API_URL: &str = "NYAYA_LLM_API_URL";
const ENV_LLM_API_KEY: &str = "NYAYA_LLM_API_KEY";

const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("conversation contains no user message")]
    EmptyConversation,
    #[error("LLM API key not configured (set NYAYA_LLM_API_KEY)")]
    MissingApiKey,
    #[error("LLM request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("LLM response malformed: {0}")]
    Malformed(String),
}

/// Mode for LLM invocation: mock (deterministic canned reply) or live (calls
/// the configured hosted API).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmMode {
    #[default]
    Mock,
    Live,
}

impl LlmMode {
    fn from_env() -> Self {
        match std::env::var(ENV_LLM_MODE).as_deref() {
            Ok("live") => LlmMode::Live,
            _ => LlmMode::Mock,
        }
    }
}

/// Routes a conversation to the model. The full reply is buffered before it
/// is returned; the transport decides how to deliver it.
pub struct ChatRouter {
    mode: LlmMode,
    client: reqwest::Client,
}

impl ChatRouter {
    pub fn new() -> Self {
        Self::with_mode(LlmMode::from_env())
    }

    pub fn with_mode(mode: LlmMode) -> Self {
        Self {
            mode,
            client: reqwest::Client::new(),
        }
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    /// Generates an assistant reply for the conversation in the requested
    /// language. The system prompt for that language is prepended on every
    /// call; the conversation itself carries no system turns.
    pub async fn generate(
        &self,
        messages: &[ChatMessage],
        language: Language,
    ) -> Result<String, ChatError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .ok_or(ChatError::EmptyConversation)?;

        match self.mode {
            LlmMode::Mock => Ok(mock_generate(&last_user.content, language)),
            LlmMode::Live => self.live_generate(messages, language).await,
        }
    }

    async fn live_generate(
        &self,
        messages: &[ChatMessage],
        language: Language,
    ) -> Result<String, ChatError> {
        let url =
            std::env::var(ENV_LLM_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let key = std::env::var(ENV_LLM_API_KEY).map_err(|_| ChatError::MissingApiKey)?;

        tracing::info!(
            target: "nyaya::chat",
            turns = messages.len(),
            lang = language.as_tag(),
            "Forwarding conversation to hosted model"
        );

        let body = build_request_body(messages, language);
        let response = self
            .client
            .post(&url)
            .query(&[("key", key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: serde_json::Value = response.json().await?;

        extract_generated_text(&payload)
            .ok_or_else(|| ChatError::Malformed("no candidate text in response".to_string()))
    }
}

impl Default for ChatRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock LLM: a deterministic reply echoing the question, in the requested
/// language, ending with the same disclaimer shape as the live prompts ask
/// for. Used by default and in tests so no API key is ever required.
fn mock_generate(question: &str, language: Language) -> String {
    let preview: String = question.chars().take(80).collect();
    match language {
        Language::En => format!(
            "[Generated – Mock LLM]\n\nYou asked about \"{preview}\". Under Indian law this is \
             general information only: the Constitution and the relevant statutes set out the \
             rights and procedures that apply, and the details depend on your specific situation.\n\n\
             Disclaimer: this is general legal information, not legal advice. Please consult a \
             qualified lawyer for your specific case."
        ),
        Language::Hi => format!(
            "[Generated – Mock LLM]\n\nआपने \"{preview}\" के बारे में पूछा। भारतीय कानून के तहत यह \
             केवल सामान्य जानकारी है: संविधान और संबंधित कानून लागू अधिकार और प्रक्रियाएं निर्धारित \
             करते हैं, और विवरण आपकी विशिष्ट स्थिति पर निर्भर करता है।\n\n\
             अस्वीकरण: यह सामान्य कानूनी जानकारी है, कानूनी सलाह नहीं। कृपया अपने विशिष्ट मामले के \
             लिए योग्य वकील से सलाह लें।"
        ),
    }
}

/// Builds a `generateContent` request: the fixed system instruction plus the
/// conversation as alternating user/model turns.
fn build_request_body(messages: &[ChatMessage], language: Language) -> serde_json::Value {
    let contents: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            serde_json::json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    serde_json::json!({
        "system_instruction": { "parts": [{ "text": system_prompt(language) }] },
        "contents": contents,
    })
}

/// Pulls the generated text out of a `generateContent` response payload,
/// concatenating multi-part candidates.
fn extract_generated_text(payload: &serde_json::Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
