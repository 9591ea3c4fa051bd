//! Core swap engine
//!
//! The SwapEngine is responsible for:
//! - Validating operator input before any network call
//! - Waiting for the CDN distribution to report the alias via ReadinessPoller
//! - Repointing the alias via DnsSwapper, exactly once
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   SwapRequest   ┌─────────────────┐  ipv6_enabled  ┌─────────────┐
//! │  Validator   │───────────────►│ ReadinessPoller │──────────────►│ DnsSwapper  │
//! └──────────────┘                 └─────────────────┘                └─────────────┘
//!                                          │                                 │
//!                                          ▼                                 ▼
//!                                   ┌─────────────┐                   ┌─────────────┐
//!                                   │ CdnProvider │                   │ DnsProvider │
//!                                   └─────────────┘                   └─────────────┘
//! ```
//!
//! ## State Flow
//!
//! 1. VALIDATING: all input violations reported together
//! 2. POLLING: repeat until ready, mismatch, timeout or lookup failure
//! 3. SWAPPING: one atomic UPSERT batch
//! 4. DONE or FAILED (both terminal)

use crate::config::SwapConfig;
use crate::error::Result;
use crate::model::{ChangeBatch, ChangeSubmission};
use crate::poller::ReadinessPoller;
use crate::request::{RawSwapRequest, SwapRequest};
use crate::swapper::DnsSwapper;
use crate::traits::{CdnProvider, DnsProvider};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

/// Events emitted during a swap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapEvent {
    /// Input passed validation
    Validated {
        distribution_id: String,
        alias_name: String,
    },

    /// A distribution poll is about to be issued
    PollStarted { attempt: u32 },

    /// The alias is not configured yet; sleeping before the next poll
    NotReady { attempt: u32, delay: Duration },

    /// A canonical-domain mismatch was tolerated and will be re-polled
    MismatchTolerated { attempt: u32, actual: String },

    /// The alias is configured and the domain matches
    Ready { attempts: u32, ipv6_enabled: bool },

    /// The change batch is being submitted
    SwapSubmitted { changes: usize },

    /// The DNS provider accepted the batch
    SwapSucceeded { change_id: Option<String> },

    /// The run failed
    Failed {
        /// Failure class (see [`crate::Error::class`])
        class: &'static str,
        error: String,
    },
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Whether the AAAA record was upserted too
    pub ipv6_enabled: bool,
    /// Number of polls until readiness
    pub attempts: u32,
    /// The batch that was submitted
    pub batch: ChangeBatch,
    /// The provider's acknowledgement
    pub submission: ChangeSubmission,
}

/// Core swap engine
///
/// Orchestrates one VALIDATING → POLLING → SWAPPING run. The engine holds
/// no state between runs; the DNS swapper is invoked at most once per run and
/// only after readiness was observed.
pub struct SwapEngine {
    /// Waits for the distribution to report the alias
    poller: ReadinessPoller,

    /// Submits the alias change batch
    swapper: DnsSwapper,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<SwapEvent>,
}

impl SwapEngine {
    /// Create a new swap engine
    ///
    /// # Parameters
    ///
    /// - `cdn`: CDN provider implementation
    /// - `dns`: DNS provider implementation
    /// - `config`: Swap configuration
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields swap events
    pub fn new(
        cdn: Box<dyn CdnProvider>,
        dns: Box<dyn DnsProvider>,
        config: SwapConfig,
    ) -> Result<(Self, mpsc::Receiver<SwapEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let poller = ReadinessPoller::new(cdn, config.poll)?.with_events(tx.clone());
        let swapper = DnsSwapper::new(dns, config.alias_zone_id)
            .with_comment(config.comment)
            .with_events(tx.clone());

        let engine = Self {
            poller,
            swapper,
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Validate raw operator input and run the swap
    pub async fn run(&self, raw: RawSwapRequest) -> Result<SwapOutcome> {
        let request = match raw.validate() {
            Ok(request) => request,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        self.run_request(&request).await
    }

    /// Run the swap for an already validated request
    pub async fn run_request(&self, request: &SwapRequest) -> Result<SwapOutcome> {
        let result = self.run_internal(request).await;
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    async fn run_internal(&self, request: &SwapRequest) -> Result<SwapOutcome> {
        self.emit_event(SwapEvent::Validated {
            distribution_id: request.distribution_id().to_string(),
            alias_name: request.alias_name().to_string(),
        });

        info!(
            "Waiting for {} to serve {} as {}",
            request.distribution_id(),
            request.alias_name(),
            request.new_canonical_domain()
        );

        let readiness = self
            .poller
            .await_readiness(
                request.distribution_id(),
                request.alias_name(),
                request.new_canonical_domain(),
            )
            .await?;

        let (batch, submission) = self
            .swapper
            .swap_alias(
                request.hosted_zone_id(),
                request.new_canonical_domain(),
                request.alias_name(),
                readiness.ipv6_enabled,
            )
            .await?;

        Ok(SwapOutcome {
            ipv6_enabled: readiness.ipv6_enabled,
            attempts: readiness.attempts,
            batch,
            submission,
        })
    }

    fn fail(&self, error: &crate::Error) {
        debug!("Swap failed [{}]: {}", error.class(), error);
        self.emit_event(SwapEvent::Failed {
            class: error.class(),
            error: error.to_string(),
        });
    }

    /// Whether the event receiver returned by [`SwapEngine::new`] is still alive
    ///
    /// Callers that never read events should drop the receiver, otherwise a
    /// long wait fills the channel and every further event is logged as dropped.
    pub fn has_event_listener(&self) -> bool {
        !self.event_tx.is_closed()
    }

    /// Emit a swap event
    fn emit_event(&self, event: SwapEvent) {
        send_event(&self.event_tx, event);
    }
}

/// What happened to an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Sent,
    /// Receiver alive but not draining; the event was dropped
    Full,
    /// Receiver dropped
    Closed,
}

/// Send an event without blocking, dropping it when the channel is full
pub(crate) fn send_event(tx: &mpsc::Sender<SwapEvent>, event: SwapEvent) -> Delivery {
    match tx.try_send(event) {
        Ok(()) => Delivery::Sent,
        Err(TrySendError::Full(_)) => {
            warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
            Delivery::Full
        }
        // Nobody is listening; events are optional.
        Err(TrySendError::Closed(_)) => Delivery::Closed,
    }
}
