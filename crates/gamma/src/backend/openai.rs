use gamma_core::backend::{chat_content, ChatRequest, ChatResponse};

use super::BackendError;

/// OpenAI (or compatible) chat-completions API.
#[derive(Clone)]
pub struct OpenAi {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAi")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAi {
    /// Send `prompt` as a single user message and return the first choice.
    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest::user(&self.model, prompt))
            .send()
            .await
            .map_err(|e| BackendError::Api(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api(format!("HTTP {status}: {}", body.trim())));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Api(format!("failed to parse response: {e}")))?;

        chat_content(&body)
            .ok_or_else(|| BackendError::Api("response contained no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk-test");

        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Incorrect API key provided"}})),
            );
        }

        // Echo the request back so the test can inspect what was sent.
        let content = format!(
            "  model={} temperature={} max_tokens={} prompt={}  ",
            body["model"].as_str().unwrap_or_default(),
            body["temperature"],
            body["max_tokens"],
            body["messages"][0]["content"].as_str().unwrap_or_default(),
        );

        (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
            })),
        )
    }

    async fn mock_api() -> String {
        let router = Router::new().route("/v1/chat/completions", post(completions));
        format!("{}/v1", serve(router).await)
    }

    #[tokio::test]
    async fn test_generate_sends_chat_request() {
        let backend = OpenAi {
            base_url: mock_api().await,
            api_key: "sk-test".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        };

        let output = backend.generate("Make a quiz").await.unwrap();
        assert_eq!(
            output,
            "model=gpt-3.5-turbo temperature=0.7 max_tokens=800 prompt=Make a quiz"
        );
    }

    #[tokio::test]
    async fn test_generate_reports_http_errors() {
        let backend = OpenAi {
            base_url: format!("{}/", mock_api().await),
            api_key: "sk-wrong".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        };

        match backend.generate("Make a quiz").await {
            Err(BackendError::Api(message)) => {
                assert!(message.starts_with("HTTP 401"));
                assert!(message.contains("Incorrect API key provided"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let backend = OpenAi {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "sk-secret".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        };

        assert!(!format!("{backend:?}").contains("sk-secret"));
    }
}
