//! Readiness poller
//!
//! Polls a CDN distribution until the target alias shows up in its alternate
//! domain names, checking on every poll that the distribution's canonical
//! domain is the one the operator expects.
//!
//! ## Loop
//!
//! ```text
//! poll ──► domain matches? ──no──► tolerated? ──no──► DomainMismatch
//!   ▲            │ yes                 │ yes
//!   │            ▼                     │
//!   │      alias present? ──yes──► Ready { ipv6_enabled }
//!   │            │ no                  │
//!   │            ▼                     ▼
//!   └──── sleep base + jitter ◄── within bounds? ──no──► Timeout
//! ```
//!
//! The CDN control plane is eventually consistent after a swap. Jitter spreads
//! the polls of concurrent operators so they do not hit the provider's rate
//! limits in lockstep.

use crate::config::PollConfig;
use crate::domain;
use crate::engine::SwapEvent;
use crate::error::{Error, Result};
use crate::model::ReadinessResult;
use crate::traits::CdnProvider;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Polls a CDN distribution until an alias is configured on it
pub struct ReadinessPoller {
    /// CDN provider used for every poll
    cdn: Box<dyn CdnProvider>,

    /// Delay and bound policy
    policy: PollConfig,

    /// Optional sink for progress events
    events: Option<mpsc::Sender<SwapEvent>>,
}

impl ReadinessPoller {
    /// Create a poller over `cdn` with the given policy
    pub fn new(cdn: Box<dyn CdnProvider>, policy: PollConfig) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            cdn,
            policy,
            events: None,
        })
    }

    /// Report progress on `events`
    pub fn with_events(mut self, events: mpsc::Sender<SwapEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Block until `alias_name` is configured on the distribution
    ///
    /// # Parameters
    ///
    /// - `distribution_id`: Distribution to poll
    /// - `alias_name`: Alternate domain name that must appear
    /// - `expected_domain`: Canonical domain the distribution must report
    ///
    /// # Returns
    ///
    /// - `Ok(ReadinessResult)`: The alias is present and the domain matches
    /// - `Err(Error::DomainMismatch)`: The domain differed more times in a row than tolerated
    /// - `Err(Error::Timeout)`: A configured bound was reached first
    /// - `Err(Error::Cdn)`: A poll failed
    pub async fn await_readiness(
        &self,
        distribution_id: &str,
        alias_name: &str,
        expected_domain: &str,
    ) -> Result<ReadinessResult> {
        let started = Instant::now();
        let mut attempt: u32 = 0;
        let mut mismatches: u32 = 0;

        loop {
            attempt += 1;
            self.emit(SwapEvent::PollStarted { attempt });

            let snapshot = self.cdn.get_distribution(distribution_id).await?;

            if !domain::names_equal(expected_domain, &snapshot.canonical_domain) {
                mismatches += 1;
                if mismatches > self.policy.mismatch_tolerance {
                    return Err(Error::domain_mismatch(
                        expected_domain,
                        snapshot.canonical_domain,
                    ));
                }

                warn!(
                    "Distribution {} reports {} (expected {}), re-polling ({}/{})",
                    distribution_id,
                    snapshot.canonical_domain,
                    expected_domain,
                    mismatches,
                    self.policy.mismatch_tolerance
                );
                self.emit(SwapEvent::MismatchTolerated {
                    attempt,
                    actual: snapshot.canonical_domain,
                });
            } else {
                mismatches = 0;

                if snapshot.has_alias(alias_name) {
                    info!(
                        "Alias {} is configured on {} after {} poll(s) (ipv6: {})",
                        alias_name, distribution_id, attempt, snapshot.ipv6_enabled
                    );
                    self.emit(SwapEvent::Ready {
                        attempts: attempt,
                        ipv6_enabled: snapshot.ipv6_enabled,
                    });
                    return Ok(ReadinessResult {
                        ipv6_enabled: snapshot.ipv6_enabled,
                        attempts: attempt,
                    });
                }
            }

            if let Some(max_attempts) = self.policy.max_attempts
                && attempt >= max_attempts
            {
                return Err(Error::timeout(attempt, started.elapsed()));
            }

            let delay = self.next_delay();

            // No poll is issued past the deadline.
            if let Some(max_wait) = self.policy.max_wait()
                && started.elapsed() + delay > max_wait
            {
                return Err(Error::timeout(attempt, started.elapsed()));
            }

            debug!(
                "Alias {} not yet on {}, next poll in {:?} (attempt {})",
                alias_name, distribution_id, delay, attempt
            );
            self.emit(SwapEvent::NotReady { attempt, delay });

            tokio::time::sleep(delay).await;
        }
    }

    /// Draw the next inter-poll delay: base + uniform[0, jitter)
    fn next_delay(&self) -> Duration {
        jittered(self.policy.base_delay_ms, self.policy.jitter_max_ms)
    }

    fn emit(&self, event: SwapEvent) {
        if let Some(events) = &self.events {
            crate::engine::send_event(events, event);
        }
    }
}

fn jittered(base_ms: u64, jitter_max_ms: u64) -> Duration {
    let jitter_ms = if jitter_max_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..jitter_max_ms)
    };
    Duration::from_millis(base_ms.saturating_add(jitter_ms))
}
