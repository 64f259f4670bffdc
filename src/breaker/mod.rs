//! Three-state circuit breaker for outbound provider calls.
//!
//! Prevents a failing remote endpoint from being hammered: after a run of
//! failures the circuit opens and rejects calls outright, then admits a
//! single probe once a recovery window has passed. A successful probe closes
//! the circuit again; a failed one re-opens it.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::errors::TopographerError;

const STATE_CLOSED: u8 = 0;
const STATE_HALF_OPEN: u8 = 1;
const STATE_OPEN: u8 = 2;

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Normal traffic; failures are being counted.
    Closed,
    /// One probe call is allowed through; everything else fails fast.
    HalfOpen,
    /// All calls are rejected until the recovery window elapses.
    Open,
}

/// How a failed callback should be treated by the breaker.
#[derive(Debug)]
pub enum CallOutcome {
    /// A real failure: counted toward opening the circuit.
    Failure(anyhow::Error),
    /// Reported to the caller but invisible to the breaker. Used for
    /// caller-side conditions (rate-limiter saturation, cancellation) that
    /// say nothing about the remote endpoint's health.
    Ignore(anyhow::Error),
}

struct Transitions {
    failures: u32,
    last_failure_at: Option<Instant>,
    opened_at: Option<Instant>,
}

/// The breaker itself. Cheap to share behind an `Arc`; the common paths are
/// an atomic state load plus, on completion, a short mutex section.
pub struct CircuitBreaker {
    open_threshold: u32,
    half_open_timeout: Duration,
    reset_failures_timeout: Duration,

    state: AtomicU8,
    probe_in_flight: AtomicBool,
    transitions: Mutex<Transitions>,
}

impl CircuitBreaker {
    /// Creates a closed breaker.
    ///
    /// `open_threshold` is the number of counted failures that is still
    /// tolerated: the circuit opens on failure `open_threshold + 1`. A quiet
    /// period of `reset_failures_timeout` (or any success) forgets the
    /// accumulated failures; `half_open_timeout` is how long an open circuit
    /// waits before admitting a probe.
    pub fn new(
        open_threshold: u32,
        half_open_timeout: Duration,
        reset_failures_timeout: Duration,
    ) -> Self {
        CircuitBreaker {
            open_threshold,
            half_open_timeout,
            reset_failures_timeout,
            state: AtomicU8::new(STATE_CLOSED),
            probe_in_flight: AtomicBool::new(false),
            transitions: Mutex::new(Transitions {
                failures: 0,
                last_failure_at: None,
                opened_at: None,
            }),
        }
    }

    /// Current state, resolving an expired open window to `HalfOpen`.
    pub fn state(&self) -> BreakerState {
        match self.state.load(Ordering::SeqCst) {
            STATE_CLOSED => BreakerState::Closed,
            STATE_HALF_OPEN => BreakerState::HalfOpen,
            _ => {
                let mut transitions = self.transitions.lock().expect("breaker lock poisoned");
                if self.open_window_expired(&transitions) {
                    self.switch_to(STATE_HALF_OPEN, &mut transitions);
                    BreakerState::HalfOpen
                } else {
                    BreakerState::Open
                }
            }
        }
    }

    /// Runs `callback` under the breaker's admission policy.
    ///
    /// Rejected calls fail with [`TopographerError::CircuitBreakerOpen`]
    /// without invoking the callback. Callback failures are passed through
    /// to the caller after the state bookkeeping runs.
    pub async fn call<T, F, Fut>(&self, callback: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, CallOutcome>>,
    {
        match self.state() {
            BreakerState::Closed => self.call_closed(callback).await,
            BreakerState::HalfOpen => self.call_half_open(callback).await,
            BreakerState::Open => Err(TopographerError::CircuitBreakerOpen.into()),
        }
    }

    // The callback runs outside the lock; only the bookkeeping afterwards is
    // a critical section.
    async fn call_closed<T, F, Fut>(&self, callback: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, CallOutcome>>,
    {
        match callback().await {
            Ok(value) => {
                let mut transitions = self.transitions.lock().expect("breaker lock poisoned");
                if self.state.load(Ordering::SeqCst) == STATE_CLOSED {
                    transitions.failures = 0;
                    transitions.last_failure_at = None;
                }
                Ok(value)
            }
            Err(CallOutcome::Ignore(err)) => Err(err),
            Err(CallOutcome::Failure(err)) => {
                let mut transitions = self.transitions.lock().expect("breaker lock poisoned");
                if self.state.load(Ordering::SeqCst) == STATE_CLOSED {
                    self.record_failure(&mut transitions);
                }
                Err(err)
            }
        }
    }

    async fn call_half_open<T, F, Fut>(&self, callback: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, CallOutcome>>,
    {
        // Single-shot gate: the first caller becomes the probe, everyone
        // else is rejected until the probe settles the state.
        if self
            .probe_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TopographerError::CircuitBreakerOpen.into());
        }

        let outcome = callback().await;

        let mut transitions = self.transitions.lock().expect("breaker lock poisoned");
        if self.state.load(Ordering::SeqCst) != STATE_HALF_OPEN {
            // A concurrent transition won; report the raw outcome.
            return match outcome {
                Ok(value) => Ok(value),
                Err(CallOutcome::Failure(err)) | Err(CallOutcome::Ignore(err)) => Err(err),
            };
        }

        match outcome {
            Ok(value) => {
                self.switch_to(STATE_CLOSED, &mut transitions);
                Ok(value)
            }
            Err(CallOutcome::Ignore(err)) => {
                // The probe told us nothing; let another one through.
                self.probe_in_flight.store(false, Ordering::SeqCst);
                Err(err)
            }
            Err(CallOutcome::Failure(err)) => {
                self.switch_to(STATE_OPEN, &mut transitions);
                Err(err)
            }
        }
    }

    fn record_failure(&self, transitions: &mut Transitions) {
        let now = Instant::now();

        // A long enough quiet period forgets earlier failures.
        if let Some(last) = transitions.last_failure_at {
            if now.duration_since(last) >= self.reset_failures_timeout {
                transitions.failures = 0;
            }
        }

        transitions.failures += 1;
        transitions.last_failure_at = Some(now);

        if transitions.failures > self.open_threshold {
            self.switch_to(STATE_OPEN, transitions);
        }
    }

    fn open_window_expired(&self, transitions: &Transitions) -> bool {
        transitions
            .opened_at
            .map(|at| at.elapsed() >= self.half_open_timeout)
            .unwrap_or(false)
    }

    // Every state change resets the failure counter and the probe gate.
    fn switch_to(&self, state: u8, transitions: &mut Transitions) {
        transitions.failures = 0;
        transitions.last_failure_at = None;
        transitions.opened_at = if state == STATE_OPEN {
            Some(Instant::now())
        } else {
            None
        };

        self.probe_in_flight.store(false, Ordering::SeqCst);
        self.state.store(state, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("state", &self.state())
            .field("open_threshold", &self.open_threshold)
            .finish()
    }
}
