//! Pure pieces of the three text-generation backends.
//!
//! Everything that turns inputs into command arguments or request bodies,
//! and raw outputs back into values, lives here so it can be tested without
//! spawning processes or opening sockets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature sent to the chat-completions API.
pub const OPENAI_TEMPERATURE: f32 = 0.7;

/// Token ceiling sent to the chat-completions API.
pub const OPENAI_MAX_TOKENS: u32 = 800;

/// Which mechanism turns a prompt into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Local model served by `ollama run`.
    #[default]
    Ollama,
    /// OpenAI chat-completions API.
    OpenAi,
    /// Google's `gemini` command-line tool.
    Gemini,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendChoice::Ollama => write!(f, "ollama"),
            BackendChoice::OpenAi => write!(f, "openai"),
            BackendChoice::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "ollama" | "local" => Ok(BackendChoice::Ollama),
            "openai" => Ok(BackendChoice::OpenAi),
            "gemini" => Ok(BackendChoice::Gemini),
            other => Err(format!(
                "Unknown backend: {other}. Expected ollama, openai or gemini."
            )),
        }
    }
}

/// Collapse a multi-line prompt into the single line the Gemini CLI takes
/// as its `-p` argument.
pub fn flatten_prompt(prompt: &str) -> String {
    prompt.trim().replace("\r\n", " ").replace('\n', " ")
}

/// Extract model names from the table printed by `ollama list`.
///
/// The first column of every row is the model name. Blank lines and header
/// rows (starting with `NAME`, `TAG`, `MODEL` or `SIZE`) are skipped.
pub fn parse_ollama_list(output: &str) -> Vec<String> {
    const HEADERS: [&str; 4] = ["name", "tag", "model", "size"];

    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let lower = line.to_lowercase();
            !HEADERS.iter().any(|header| lower.starts_with(header))
        })
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// A one-message user request with the fixed sampling settings.
    pub fn user(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: OPENAI_TEMPERATURE,
            max_tokens: OPENAI_MAX_TOKENS,
        }
    }
}

/// The parts of a chat-completions response that are read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Trimmed text of the first choice, if the response has one.
pub fn chat_content(response: &ChatResponse) -> Option<String> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .map(|content| content.trim().to_string())
}
