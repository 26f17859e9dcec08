pub mod config;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::CompletionError;
use crate::llm::config::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Языковая модель: один промпт на входе, текст на выходе
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Клиент OpenAI Chat Completions. Повторов нет: ошибка сразу уходит наверх.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str, base_url: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Transport(format!("HTTP {}: {}", status, text)));
        }

        let response = serde_json::from_str::<ChatCompletionResponse>(&text)
            .map_err(|e| CompletionError::Transport(format!("malformed completion response: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::Transport("empty completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new("sk-test", "gpt-4o-mini", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_as_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "Що таке веселка?" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": "Оптичне явище." } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client_for(&server).complete("Що таке веселка?").await.unwrap();
        assert_eq!(answer, "Оптичне явище.");
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("привіт").await.unwrap_err();
        assert!(matches!(err, CompletionError::RateLimited));
    }

    #[tokio::test]
    async fn server_error_is_transport_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("привіт").await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("привіт").await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
