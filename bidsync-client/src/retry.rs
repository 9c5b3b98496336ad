//! Retry loop with linear backoff.

use crate::transport::{ApiRequest, Transport};
use bidsync_core::{SyncConfig, SyncError, SyncResult};
use serde_json::Value;
use std::time::Duration;

/// Wraps a [`Transport`] with a fixed attempt budget.
///
/// An attempt fails if the transport errors or the HTTP status falls outside
/// 200–299. Between failed attempts the client sleeps
/// `backoff_base * attempt_number` (linear, no jitter, no circuit breaker).
/// After the final failed attempt the last error is returned as-is; no
/// aggregate error is constructed.
pub struct RetryingClient<T: Transport> {
    transport: T,
    attempts: u32,
    backoff_base: Duration,
}

impl<T: Transport> RetryingClient<T> {
    pub fn new(transport: T, config: &SyncConfig) -> Self {
        Self {
            transport,
            attempts: config.retry_attempts,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Issue a request, retrying transient failures. Returns the parsed
    /// JSON body of the first successful response.
    pub async fn request(&self, request: &ApiRequest) -> SyncResult<Value> {
        let operation = request.operation();
        let mut last_error = SyncError::transport(&operation, "no attempts made");

        for attempt in 1..=self.attempts {
            match self.transport.execute(request).await {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => {
                    last_error = SyncError::Transport {
                        operation: operation.clone(),
                        attempts: attempt,
                        reason: format!("HTTP {}", response.status),
                    };
                }
                Err(err) => {
                    last_error = err;
                }
            }

            tracing::warn!(
                operation = %operation,
                attempt,
                max_attempts = self.attempts,
                error = %last_error,
                "Request attempt failed"
            );

            if attempt < self.attempts {
                tokio::time::sleep(self.backoff_base * attempt).await;
            }
        }

        tracing::error!(
            operation = %operation,
            attempts = self.attempts,
            error = %last_error,
            "Request failed, attempts exhausted"
        );
        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ApiResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::time::Instant;

    /// Scripted transport: pops one canned result per attempt, repeating
    /// the last one when the script runs out.
    struct ScriptedTransport {
        script: RefCell<Vec<SyncResult<ApiResponse>>>,
        calls: RefCell<u32>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<SyncResult<ApiResponse>>) -> Self {
            Self {
                script: RefCell::new(script),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.borrow()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn execute(&self, _request: &ApiRequest) -> SyncResult<ApiResponse> {
            *self.calls.borrow_mut() += 1;
            let mut script = self.script.borrow_mut();
            if script.len() > 1 {
                script.remove(0)
            } else {
                script[0].clone()
            }
        }
    }

    fn fast_config(attempts: u32, backoff_base_ms: u64) -> SyncConfig {
        SyncConfig {
            retry_attempts: attempts,
            backoff_base_ms,
            ..SyncConfig::default()
        }
    }

    fn ok(body: Value) -> SyncResult<ApiResponse> {
        Ok(ApiResponse { status: 200, body })
    }

    fn http_error(status: u16) -> SyncResult<ApiResponse> {
        Ok(ApiResponse {
            status,
            body: Value::Null,
        })
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_makes_one_call() {
        let transport = ScriptedTransport::new(vec![ok(json!({"success": true}))]);
        let client = RetryingClient::new(transport, &fast_config(3, 1));

        let body = client.request(&ApiRequest::get("/companies")).await.unwrap();
        assert_eq!(body, json!({"success": true}));
        assert_eq!(client.transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_always_failing_makes_exactly_configured_attempts() {
        let transport = ScriptedTransport::new(vec![Err(SyncError::transport(
            "GET /companies",
            "connection refused",
        ))]);
        let client = RetryingClient::new(transport, &fast_config(3, 1));

        let err = client
            .request(&ApiRequest::get("/companies"))
            .await
            .unwrap_err();
        assert_eq!(client.transport.calls(), 3);
        // The last error is surfaced, not an aggregate.
        assert!(matches!(err, SyncError::Transport { .. }));
        assert!(format!("{}", err).contains("connection refused"));
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_retried() {
        let transport = ScriptedTransport::new(vec![
            http_error(503),
            http_error(502),
            ok(json!({"success": true, "data": []})),
        ]);
        let client = RetryingClient::new(transport, &fast_config(3, 1));

        let body = client.request(&ApiRequest::get("/companies")).await.unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(client.transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_last_http_status() {
        let transport = ScriptedTransport::new(vec![http_error(500)]);
        let client = RetryingClient::new(transport, &fast_config(2, 1));

        let err = client
            .request(&ApiRequest::get("/companies"))
            .await
            .unwrap_err();
        assert!(format!("{}", err).contains("HTTP 500"));
        assert_eq!(client.transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_backoff_is_linear_in_attempt_number() {
        // Waits are base*1 then base*2: 30ms total across three attempts.
        let transport = ScriptedTransport::new(vec![http_error(500)]);
        let client = RetryingClient::new(transport, &fast_config(3, 10));

        let started = Instant::now();
        let _ = client.request(&ApiRequest::get("/companies")).await;
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(client.transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_no_backoff_after_final_attempt() {
        // Single attempt: failure returns without sleeping at all.
        let transport = ScriptedTransport::new(vec![http_error(500)]);
        let client = RetryingClient::new(transport, &fast_config(1, 10_000));

        let started = Instant::now();
        let _ = client.request(&ApiRequest::get("/companies")).await;
        assert!(started.elapsed() < Duration::from_millis(1_000));
        assert_eq!(client.transport.calls(), 1);
    }
}
