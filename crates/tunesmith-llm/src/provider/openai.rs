//! OpenAI-compatible chat completions (Groq, OpenAI).

use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{pump_sse, status_error, LlmClient, LlmRequest, LlmResponse, StreamEvent};
use crate::config::ProviderConfig;
use crate::error::{LlmError, LlmResult};
use crate::stream::ChunkStream;

/// Client for `{base}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    provider_id: &'static str,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatibleClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            provider_id: config.kind.id(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url().to_string(),
        }
    }

    fn payload(&self, request: &LlmRequest, stream: bool) -> Value {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        json!({
            "model": model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "stream": stream,
        })
    }

    async fn post(&self, payload: &Value) -> LlmResult<reqwest::Response> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response)
    }
}

impl LlmClient for OpenAiCompatibleClient {
    fn provider_id(&self) -> &str {
        self.provider_id
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let response = self.post(&self.payload(request, false)).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let text = parse_completion(&body)?;
        debug!(provider = self.provider_id, chars = text.len(), "completion received");
        Ok(LlmResponse {
            text,
            status: Some(status),
        })
    }

    async fn stream(&self, request: &LlmRequest, cancel: CancellationToken) -> LlmResult<ChunkStream> {
        let response = self.post(&self.payload(request, true)).await?;
        let (tx, stream) = ChunkStream::channel(cancel);
        tokio::spawn(pump_sse(response, tx, parse_stream_event));
        Ok(stream)
    }
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<Message>,
    delta: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Extracts `choices[0].message.content`.
pub(crate) fn parse_completion(body: &str) -> LlmResult<String> {
    let completion: Completion =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(format!("{}: {}", e, body)))?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| LlmError::Parse(format!("missing choices[0].message.content: {}", body)))
}

/// Extracts `choices[0].delta.content` from one stream event.
pub(crate) fn parse_stream_event(data: &str) -> LlmResult<StreamEvent> {
    if data.trim() == "[DONE]" {
        return Ok(StreamEvent::Done);
    }
    let chunk: Completion =
        serde_json::from_str(data).map_err(|e| LlmError::Parse(format!("{}: {}", e, data)))?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .map_or(StreamEvent::Skip, StreamEvent::Delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"[Calm, Ambient]"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "[Calm, Ambient]");
    }

    #[test]
    fn test_parse_completion_missing_content() {
        assert!(matches!(parse_completion(r#"{"choices":[]}"#), Err(LlmError::Parse(_))));
        assert!(matches!(parse_completion("not json"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_stream_events() {
        let delta = r#"{"choices":[{"index":0,"delta":{"content":"Genre"}}]}"#;
        assert_eq!(parse_stream_event(delta).unwrap(), StreamEvent::Delta("Genre".into()));
        let role = r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_stream_event(role).unwrap(), StreamEvent::Skip);
        assert_eq!(parse_stream_event("[DONE]").unwrap(), StreamEvent::Done);
    }

    #[test]
    fn test_payload_uses_client_model_when_unset() {
        let config = ProviderConfig::new(ProviderKind::Groq, "k").with_model("mixtral");
        let client = OpenAiCompatibleClient::new(reqwest::Client::new(), &config);
        let payload = client.payload(&LlmRequest::new("", "sys", "hi"), true);
        assert_eq!(payload["model"], "mixtral");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["stream"], true);
    }
}
