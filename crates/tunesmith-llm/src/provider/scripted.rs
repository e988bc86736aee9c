//! In-memory client that replays canned replies.
//!
//! Used by tests and offline demos. Replies are consumed in order; once the
//! script is exhausted every call fails with [`LlmError::EmptyResponse`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{LlmClient, LlmRequest, LlmResponse};
use crate::error::{LlmError, LlmResult};
use crate::stream::ChunkStream;

/// One canned reply.
#[derive(Debug)]
pub enum ScriptedReply {
    Text(String),
    Fail(LlmError),
    /// Delivers the text, then fails. A blocking call sees only the error.
    Partial(String, LlmError),
    /// Waits before producing the inner reply.
    Delayed(Duration, Box<ScriptedReply>),
}

impl ScriptedReply {
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Text(text.into())
    }

    pub fn fail(error: LlmError) -> Self {
        ScriptedReply::Fail(error)
    }

    pub fn partial(text: impl Into<String>, error: LlmError) -> Self {
        ScriptedReply::Partial(text.into(), error)
    }

    pub fn delayed(delay: Duration, reply: ScriptedReply) -> Self {
        ScriptedReply::Delayed(delay, Box::new(reply))
    }
}

/// A client that answers from a script and records every request.
#[derive(Debug)]
pub struct ScriptedClient {
    model: String,
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            model: "scripted".to_string(),
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client with no replies; every call fails.
    pub fn empty() -> Self {
        Self {
            model: "scripted".to_string(),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that answers each call with the given texts, in order.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(ScriptedReply::text))
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn next_reply(&self, request: &LlmRequest) -> Option<ScriptedReply> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies.lock().ok().and_then(|mut r| r.pop_front())
    }
}

/// Waits out any delay and returns the text to deliver plus the error that
/// follows it, if any.
async fn play(reply: Option<ScriptedReply>) -> LlmResult<(String, Option<LlmError>)> {
    let mut reply = reply.ok_or(LlmError::EmptyResponse)?;
    loop {
        match reply {
            ScriptedReply::Text(text) => return Ok((text, None)),
            ScriptedReply::Partial(text, error) => return Ok((text, Some(error))),
            ScriptedReply::Fail(error) => return Err(error),
            ScriptedReply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                reply = *inner;
            }
        }
    }
}

impl LlmClient for ScriptedClient {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        match play(self.next_reply(request)).await? {
            (_, Some(error)) => Err(error),
            (text, None) => Ok(LlmResponse::new(text)),
        }
    }

    /// Streams the reply word by word.
    async fn stream(&self, request: &LlmRequest, cancel: CancellationToken) -> LlmResult<ChunkStream> {
        let (text, failure) = play(self.next_reply(request)).await?;
        let (tx, stream) = ChunkStream::channel(cancel);
        let chunks: Vec<String> = text.split_inclusive(' ').map(str::to_string).collect();
        tokio::spawn(async move {
            for chunk in chunks {
                if !tx.send(Ok(chunk)).await {
                    return;
                }
            }
            if let Some(error) = failure {
                tx.send(Err(error)).await;
            }
        });
        Ok(stream)
    }
}
