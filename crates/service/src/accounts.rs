//! Gateway to the bank-accounts microservice.
//!
//! The accounts service is the sole source of the "has active accounts" fact.
//! Each call is a fresh synchronous round trip: no retries, no caching. When
//! the answer cannot be confirmed the error is surfaced so callers fail
//! closed instead of deleting a customer a flaky upstream still protects.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport failure, timeout, or a non-2xx status. The underlying error
    /// text is kept for diagnostics but never parsed.
    #[error("accounts service unavailable: {0}")]
    Unavailable(String),
    /// The upstream answered 2xx with an empty, null, or non-boolean body.
    /// Never read as "no active accounts".
    #[error("accounts service returned an unusable payload for customer {0}")]
    InvalidPayload(i32),
}

/// Answers whether a customer currently holds any active bank account.
#[async_trait]
pub trait AccountsGateway: Send + Sync {
    async fn has_active_accounts(&self, customer_id: i32) -> Result<bool, GatewayError>;
}

/// reqwest-backed gateway issuing `GET {base}/accounts/customer/{id}/active`.
/// The request timeout is owned by the client; callers see a bounded call.
pub struct HttpAccountsGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAccountsGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl AccountsGateway for HttpAccountsGateway {
    async fn has_active_accounts(&self, customer_id: i32) -> Result<bool, GatewayError> {
        let url = format!("{}/accounts/customer/{}/active", self.base_url, customer_id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Unavailable(format!("unexpected status {status} from {url}")));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        if body.is_empty() {
            return Err(GatewayError::InvalidPayload(customer_id));
        }
        match serde_json::from_slice::<Option<bool>>(&body) {
            Ok(Some(active)) => Ok(active),
            Ok(None) | Err(_) => Err(GatewayError::InvalidPayload(customer_id)),
        }
    }
}

/// Scriptable gateway for tests: fixed answer or error, plus an invocation
/// counter so tests can assert the gateway was (not) consulted.
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    pub struct MockAccountsGateway {
        reply: Mutex<Result<bool, GatewayError>>,
        calls: AtomicUsize,
    }

    impl MockAccountsGateway {
        pub fn replying(active: bool) -> Self {
            Self { reply: Mutex::new(Ok(active)), calls: AtomicUsize::new(0) }
        }

        pub fn failing(err: GatewayError) -> Self {
            Self { reply: Mutex::new(Err(err)), calls: AtomicUsize::new(0) }
        }

        pub fn set_reply(&self, reply: Result<bool, GatewayError>) {
            *self.reply.lock().unwrap() = reply;
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccountsGateway for MockAccountsGateway {
        async fn has_active_accounts(&self, _customer_id: i32) -> Result<bool, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.lock().unwrap().clone()
        }
    }
}
