//! Anthropic messages API.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{pump_sse, status_error, LlmClient, LlmRequest, LlmResponse, StreamEvent};
use crate::config::ProviderConfig;
use crate::error::{LlmError, LlmResult};
use crate::stream::ChunkStream;

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for `{base}/messages`.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
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
            "system": request.system,
            "messages": [ { "role": "user", "content": request.prompt } ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "stream": stream,
        })
    }

    async fn post(&self, payload: &Value) -> LlmResult<reqwest::Response> {
        let url = format!("{}/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response)
    }
}

impl LlmClient for AnthropicClient {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let response = self.post(&self.payload(request, false)).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let text = parse_message(&body)?;
        debug!(provider = "anthropic", chars = text.len(), "completion received");
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
struct Message {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Joins the text blocks of a message response.
pub(crate) fn parse_message(body: &str) -> LlmResult<String> {
    let message: Message =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(format!("{}: {}", e, body)))?;
    let text: String = message
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();
    if text.is_empty() {
        return Err(LlmError::Parse(format!("no text content blocks: {}", body)));
    }
    Ok(text)
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(rename = "type")]
    kind: String,
    delta: Option<Delta>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct Delta {
    text: Option<String>,
}

/// Maps one streamed event: `content_block_delta` carries text,
/// `message_stop` ends the stream, `error` fails it.
pub(crate) fn parse_stream_event(data: &str) -> LlmResult<StreamEvent> {
    let chunk: StreamChunk =
        serde_json::from_str(data).map_err(|e| LlmError::Parse(format!("{}: {}", e, data)))?;
    match chunk.kind.as_str() {
        "content_block_delta" => Ok(chunk
            .delta
            .and_then(|d| d.text)
            .map_or(StreamEvent::Skip, StreamEvent::Delta)),
        "message_stop" => Ok(StreamEvent::Done),
        "error" => Err(LlmError::Parse(format!(
            "stream error: {}",
            chunk.error.unwrap_or(Value::Null)
        ))),
        _ => Ok(StreamEvent::Skip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_parse_message_joins_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"[Dark, "},{"type":"text","text":"Techno]"}]}"#;
        assert_eq!(parse_message(body).unwrap(), "[Dark, Techno]");
        assert!(parse_message(r#"{"content":[]}"#).is_err());
    }

    #[test]
    fn test_parse_stream_events() {
        let delta = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"BPM"}}"#;
        assert_eq!(parse_stream_event(delta).unwrap(), StreamEvent::Delta("BPM".into()));
        assert_eq!(parse_stream_event(r#"{"type":"ping"}"#).unwrap(), StreamEvent::Skip);
        assert_eq!(parse_stream_event(r#"{"type":"message_stop"}"#).unwrap(), StreamEvent::Done);
        assert!(parse_stream_event(r#"{"type":"error","error":{"type":"overloaded_error"}}"#).is_err());
    }

    #[test]
    fn test_payload_carries_system_separately() {
        let config = ProviderConfig::new(ProviderKind::Anthropic, "k");
        let client = AnthropicClient::new(reqwest::Client::new(), &config);
        let payload = client.payload(&LlmRequest::new("", "be terse", "hi"), false);
        assert_eq!(payload["system"], "be terse");
        assert_eq!(payload["messages"][0]["content"], "hi");
        assert_eq!(payload["model"], "claude-3-5-haiku-latest");
    }
}
