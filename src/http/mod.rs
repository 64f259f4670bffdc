//! Resilient HTTP client used for every outbound provider call.
//!
//! Wraps a `reqwest::Client` with user-agent injection, a token-bucket rate
//! limiter, and a circuit breaker. Providers never talk to the raw client:
//! going through this wrapper is what keeps a misbehaving vendor endpoint
//! from being hammered and keeps our own call rate inside its quota.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{anyhow, Context};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::{HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;

use crate::breaker::{CallOutcome, CircuitBreaker};
use crate::errors::TopographerError;

/// User agent sent when the caller did not set one.
pub const DEFAULT_USER_AGENT: &str = concat!("topographer/", env!("CARGO_PKG_VERSION"));

const DEFAULT_OPEN_THRESHOLD: u32 = 5;
const DEFAULT_HALF_OPEN_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RESET_FAILURES_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the underlying `reqwest` client with the given request timeout.
/// reqwest attaches the deadline to every request it executes, so the
/// wrapper does not manage deadlines itself.
pub fn default_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::ClientBuilder::new().timeout(timeout).build()
}

/// HTTP client with rate limiting and a circuit breaker bolted on.
pub struct ResilientClient {
    client: reqwest::Client,
    user_agent: String,
    limiter: DefaultDirectRateLimiter,
    breaker: CircuitBreaker,
}

impl ResilientClient {
    /// Wraps `client`. The limiter replenishes one token per
    /// `rate_interval` and holds at most `rate_burst` tokens; the circuit
    /// breaker starts with the default thresholds.
    pub fn new(
        client: reqwest::Client,
        user_agent: impl Into<String>,
        rate_interval: Duration,
        rate_burst: u32,
    ) -> anyhow::Result<Self> {
        Self::with_breaker(
            client,
            user_agent,
            rate_interval,
            rate_burst,
            CircuitBreaker::new(
                DEFAULT_OPEN_THRESHOLD,
                DEFAULT_HALF_OPEN_TIMEOUT,
                DEFAULT_RESET_FAILURES_TIMEOUT,
            ),
        )
    }

    /// Same as [`ResilientClient::new`] with an explicit breaker.
    pub fn with_breaker(
        client: reqwest::Client,
        user_agent: impl Into<String>,
        rate_interval: Duration,
        rate_burst: u32,
        breaker: CircuitBreaker,
    ) -> anyhow::Result<Self> {
        let quota = Quota::with_period(rate_interval)
            .context("rate limiter interval must be non-zero")?
            .allow_burst(
                NonZeroU32::new(rate_burst).context("rate limiter burst must be non-zero")?,
            );

        Ok(ResilientClient {
            client,
            user_agent: user_agent.into(),
            limiter: RateLimiter::direct(quota),
            breaker,
        })
    }

    /// Starts a request builder on the wrapped client.
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client.request(method, url)
    }

    /// Executes one request through the breaker and the rate limiter.
    ///
    /// Cancellation while waiting (for the response or for a limiter token)
    /// surfaces as [`TopographerError::Cancelled`] and is invisible to the
    /// breaker; HTTP transport errors and ≥400 statuses are counted
    /// failures. Error-path bodies are drained so the connection can be
    /// reused.
    pub async fn execute(
        &self,
        mut request: reqwest::Request,
        cancel: &CancellationToken,
    ) -> anyhow::Result<reqwest::Response> {
        if !request.headers().contains_key(USER_AGENT) {
            request.headers_mut().insert(
                USER_AGENT,
                HeaderValue::from_str(&self.user_agent)
                    .context("user agent is not a valid header value")?,
            );
        }

        self.breaker
            .call(|| async move {
                let response = tokio::select! {
                    _ = cancel.cancelled() => {
                        return Err(CallOutcome::Ignore(TopographerError::Cancelled.into()));
                    }
                    response = self.client.execute(request) => response,
                };

                // Pay the rate-limiter toll before the result is examined,
                // so a burst of failures is paced the same as a burst of
                // successes. Running dry under cancellation is not the
                // endpoint's fault and must not trip the breaker.
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return Err(CallOutcome::Ignore(
                            anyhow!(TopographerError::Cancelled).context("rate limited"),
                        ));
                    }
                    _ = self.limiter.until_ready() => {}
                }

                let response = match response {
                    Ok(response) => response,
                    Err(err) => return Err(CallOutcome::Failure(err.into())),
                };

                let status = response.status();
                if status.as_u16() >= 400 {
                    let _ = response.bytes().await;
                    return Err(CallOutcome::Failure(anyhow!(
                        "netloc responded with {status}"
                    )));
                }

                Ok(response)
            })
            .await
    }
}

impl std::fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient")
            .field("user_agent", &self.user_agent)
            .field("breaker", &self.breaker)
            .finish()
    }
}
