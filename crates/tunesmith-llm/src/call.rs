//! Bounded LLM calls: per-attempt timeout, retries with backoff, and
//! cancellation.
//!
//! Every call the orchestrator makes goes through [`call_with_retry`]. The
//! caller's token cancels the whole call; each attempt runs under a child
//! token that is cancelled when the attempt times out, so only that attempt
//! is abandoned.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tunesmith_spec::trace::{LlmCallEvent, LlmResponseRecord, LlmTelemetry};
use tunesmith_spec::TraceCollector;

use crate::config::CallOptions;
use crate::error::{LlmError, LlmResult};
use crate::provider::{LlmClient, LlmRequest, LlmResponse};

/// How the response text is delivered.
pub enum Delivery<'a> {
    /// One blocking completion.
    Complete,
    /// Streamed; every chunk is passed to the observer as it arrives.
    Stream(&'a mut (dyn FnMut(&str) + Send)),
}

impl Delivery<'_> {
    fn is_stream(&self) -> bool {
        matches!(self, Delivery::Stream(_))
    }
}

/// What happened during one bounded call.
#[derive(Debug)]
pub struct CallOutcome {
    pub result: LlmResult<String>,
    pub attempts: u32,
    /// Wall time across all attempts, backoff included.
    pub latency_ms: u64,
    /// True if the last attempt timed out.
    pub timed_out: bool,
    pub status: Option<u16>,
}

impl CallOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The trace record of this call.
    pub fn to_event(&self, provider: &str, step: &str, request: &LlmRequest) -> LlmCallEvent {
        LlmCallEvent {
            seq: 0,
            provider: provider.to_string(),
            step: step.to_string(),
            request: request.record(),
            response: self.result.as_ref().ok().map(|text| LlmResponseRecord { text: text.clone() }),
            telemetry: LlmTelemetry {
                latency_ms: self.latency_ms,
                ok: self.result.is_ok(),
                timed_out: self.timed_out,
                status: self.status,
            },
            attempts: self.attempts,
        }
    }
}

/// Runs one LLM call with retries.
///
/// Transport errors, timeouts, 429 and 5xx are retried up to
/// `options.max_retries` times with doubling backoff. A blank response is
/// an error and is not retried. A streamed call is not retried once any
/// chunk has reached the observer.
pub async fn call_with_retry<C: LlmClient>(
    client: &C,
    request: &LlmRequest,
    options: &CallOptions,
    cancel: &CancellationToken,
    mut delivery: Delivery<'_>,
) -> CallOutcome {
    let started = Instant::now();
    let mut attempts = 0;
    let mut timed_out;
    let mut status = None;

    let result = loop {
        attempts += 1;
        let attempt_token = cancel.child_token();
        let mut delivered = false;

        let attempt = run_attempt(client, request, &attempt_token, &mut delivery, &mut delivered);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LlmError::Cancelled),
            timed = tokio::time::timeout(options.timeout, attempt) => match timed {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout(options.timeout)),
            },
        };
        attempt_token.cancel();

        timed_out = matches!(outcome, Err(LlmError::Timeout(_)));
        let outcome = outcome.and_then(|response| {
            status = response.status.or(status);
            if response.text.trim().is_empty() {
                Err(LlmError::EmptyResponse)
            } else {
                Ok(response.text)
            }
        });

        let error = match outcome {
            Ok(text) => break Ok(text),
            Err(e) => e,
        };
        status = error.status().or(status);

        let retry = attempts - 1;
        let can_retry = error.is_retryable() && retry < options.max_retries && !delivered;
        if !can_retry {
            break Err(error);
        }
        let backoff = options.backoff_for(retry + 1);
        warn!(
            model = %request.model,
            attempt = attempts,
            error = %error,
            backoff_ms = backoff.as_millis() as u64,
            "LLM call failed, retrying"
        );
        if sleep_or_cancel(backoff, cancel).await {
            break Err(LlmError::Cancelled);
        }
    };

    let latency_ms = started.elapsed().as_millis() as u64;
    debug!(
        attempts,
        latency_ms,
        ok = result.is_ok(),
        stream = delivery.is_stream(),
        "LLM call finished"
    );
    CallOutcome {
        result,
        attempts,
        latency_ms,
        timed_out,
        status,
    }
}

async fn run_attempt<C: LlmClient>(
    client: &C,
    request: &LlmRequest,
    token: &CancellationToken,
    delivery: &mut Delivery<'_>,
    delivered: &mut bool,
) -> LlmResult<LlmResponse> {
    match delivery {
        Delivery::Complete => client.complete(request).await,
        Delivery::Stream(observer) => {
            let stream = client.stream(request, token.clone()).await?;
            let text = stream
                .collect_with(|chunk| {
                    *delivered = true;
                    (*observer)(chunk);
                })
                .await?;
            Ok(LlmResponse::new(text))
        }
    }
}

/// A bounded call whose failure is not fatal.
///
/// The call is recorded in the trace under `step`. On failure a warning is
/// logged, an error event is recorded, and `None` is returned.
pub async fn soft_call<C: LlmClient>(
    client: &C,
    request: &LlmRequest,
    options: &CallOptions,
    cancel: &CancellationToken,
    step: &str,
    trace: &mut TraceCollector,
) -> Option<String> {
    let outcome = call_with_retry(client, request, options, cancel, Delivery::Complete).await;
    trace.llm_call(outcome.to_event(client.provider_id(), step, request));
    match outcome.result {
        Ok(text) => {
            debug!(step, chars = text.chars().count(), "sub-call succeeded");
            Some(text.trim().to_string())
        }
        Err(e) => {
            warn!(step, error = %e, "sub-call failed, keeping previous result");
            trace.error(e.kind(), format!("{}: {}", step, e), e.status());
            None
        }
    }
}

/// Sleeps for `duration`. Returns true if cancelled first.
async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ScriptedClient, ScriptedReply};

    fn fast_options() -> CallOptions {
        CallOptions {
            max_retries: 2,
            timeout: Duration::from_millis(200),
            backoff_initial: Duration::from_millis(1),
            backoff_max: Duration::from_millis(4),
        }
    }

    fn request() -> LlmRequest {
        LlmRequest::new("m", "sys", "prompt")
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let client = ScriptedClient::with_texts(["[Calm, Ambient]"]);
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert_eq!(outcome.result.unwrap(), "[Calm, Ambient]");
        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let client = ScriptedClient::new([
            ScriptedReply::fail(LlmError::bad_status(503, "busy")),
            ScriptedReply::fail(LlmError::bad_status(429, "slow down")),
            ScriptedReply::text("ok"),
        ]);
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert_eq!(outcome.result.unwrap(), "ok");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.status, Some(429));
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let client = ScriptedClient::new((0..5).map(|_| ScriptedReply::fail(LlmError::bad_status(500, ""))));
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert!(matches!(outcome.result, Err(LlmError::BadStatus { status: 500, .. })));
        assert_eq!(outcome.attempts, 3);
        assert_eq!(client.remaining(), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let client = ScriptedClient::new([
            ScriptedReply::fail(LlmError::bad_status(401, "bad key")),
            ScriptedReply::text("never"),
        ]);
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert!(outcome.result.is_err());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.status, Some(401));
    }

    #[tokio::test]
    async fn test_blank_response_is_an_error() {
        let client = ScriptedClient::with_texts(["   \n", "later"]);
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert!(matches!(outcome.result, Err(LlmError::EmptyResponse)));
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_timeout_then_retry() {
        let client = ScriptedClient::new([
            ScriptedReply::delayed(Duration::from_secs(5), ScriptedReply::text("too late")),
            ScriptedReply::text("in time"),
        ]);
        let outcome = call_with_retry(&client, &request(), &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        assert_eq!(outcome.result.unwrap(), "in time");
        assert_eq!(outcome.attempts, 2);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn test_every_attempt_times_out() {
        let options = CallOptions {
            max_retries: 1,
            timeout: Duration::from_millis(20),
            ..fast_options()
        };
        let client = ScriptedClient::new((0..2).map(|_| {
            ScriptedReply::delayed(Duration::from_secs(5), ScriptedReply::text("x"))
        }));
        let outcome = call_with_retry(&client, &request(), &options, &CancellationToken::new(), Delivery::Complete).await;
        assert!(matches!(outcome.result, Err(LlmError::Timeout(_))));
        assert!(outcome.timed_out);
        assert_eq!(outcome.attempts, 2);
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_call() {
        let client = ScriptedClient::new([ScriptedReply::delayed(
            Duration::from_secs(5),
            ScriptedReply::text("x"),
        )]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = call_with_retry(&client, &request(), &fast_options(), &cancel, Delivery::Complete).await;
        assert!(matches!(outcome.result, Err(LlmError::Cancelled)));
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_stream_delivery_reaches_observer() {
        let client = ScriptedClient::with_texts(["Genre: Dark Techno"]);
        let mut seen = String::new();
        let mut observer = |chunk: &str| seen.push_str(chunk);
        let outcome = call_with_retry(
            &client,
            &request(),
            &fast_options(),
            &CancellationToken::new(),
            Delivery::Stream(&mut observer),
        )
        .await;
        assert_eq!(outcome.result.unwrap(), "Genre: Dark Techno");
        assert_eq!(seen, "Genre: Dark Techno");
    }

    #[tokio::test]
    async fn test_stream_not_retried_after_delivery() {
        let client = ScriptedClient::new([
            ScriptedReply::partial("Genre: ", LlmError::bad_status(503, "dropped")),
            ScriptedReply::text("Genre: Techno"),
        ]);
        let mut seen = Vec::new();
        let mut observer = |chunk: &str| seen.push(chunk.to_string());
        let outcome = call_with_retry(
            &client,
            &request(),
            &fast_options(),
            &CancellationToken::new(),
            Delivery::Stream(&mut observer),
        )
        .await;
        assert!(matches!(outcome.result, Err(LlmError::BadStatus { status: 503, .. })));
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.status, Some(503));
        assert_eq!(seen, vec!["Genre: ".to_string()]);
        assert_eq!(client.remaining(), 1);
    }

    #[tokio::test]
    async fn test_stream_retried_before_delivery() {
        let client = ScriptedClient::new([
            ScriptedReply::fail(LlmError::bad_status(503, "busy")),
            ScriptedReply::text("Genre: Techno"),
        ]);
        let mut seen = String::new();
        let mut observer = |chunk: &str| seen.push_str(chunk);
        let outcome = call_with_retry(
            &client,
            &request(),
            &fast_options(),
            &CancellationToken::new(),
            Delivery::Stream(&mut observer),
        )
        .await;
        assert_eq!(outcome.result.unwrap(), "Genre: Techno");
        assert_eq!(outcome.attempts, 2);
        assert_eq!(seen, "Genre: Techno");
    }

    #[tokio::test]
    async fn test_outcome_event() {
        let client = ScriptedClient::with_texts(["text"]);
        let req = request();
        let outcome = call_with_retry(&client, &req, &fast_options(), &CancellationToken::new(), Delivery::Complete).await;
        let event = outcome.to_event("scripted", "generate", &req);
        assert_eq!(event.step, "generate");
        assert_eq!(event.response.unwrap().text, "text");
        assert!(event.telemetry.ok);
        assert_eq!(event.attempts, 1);
    }
}
