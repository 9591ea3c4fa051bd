//! Configuration types for the CNAME swap system
//!
//! This module defines all configuration structures used throughout the crate.

use crate::model::CLOUDFRONT_ALIAS_ZONE_ID;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main swap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConfig {
    /// Readiness polling policy
    #[serde(default)]
    pub poll: PollConfig,

    /// Hosted zone of the CDN alias target
    #[serde(default = "default_alias_zone_id")]
    pub alias_zone_id: String,

    /// Comment attached to the change batch
    #[serde(default)]
    pub comment: Option<String>,

    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped (with a warning log).
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl SwapConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            poll: PollConfig::default(),
            alias_zone_id: default_alias_zone_id(),
            comment: None,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.alias_zone_id.trim().is_empty() {
            return Err(crate::Error::config("Alias target zone ID cannot be empty"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }

        self.poll.validate()
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest sleep allowed between two polls (one hour)
pub const MAX_POLL_DELAY_MS: u64 = 3_600_000;

/// Readiness polling policy
///
/// The sleep between polls is `base_delay + uniform[0, jitter_max)`. Polling
/// stops with a timeout when either bound is reached, whichever comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Fixed part of the inter-poll delay (in milliseconds)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound (exclusive) of the random part of the delay (in milliseconds)
    #[serde(default = "default_jitter_max_ms")]
    pub jitter_max_ms: u64,

    /// Maximum time to keep polling (in seconds)
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: Option<u64>,

    /// Maximum number of polls
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Consecutive canonical-domain mismatches to re-poll before failing
    ///
    /// 0 makes the first mismatch fatal.
    #[serde(default)]
    pub mismatch_tolerance: u32,
}

impl PollConfig {
    /// Validate the polling policy
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_wait_secs.is_none() && self.max_attempts.is_none() {
            return Err(crate::Error::config(
                "Polling must be bounded by a maximum wait or a maximum attempt count",
            ));
        }
        if self.max_wait_secs == Some(0) {
            return Err(crate::Error::config("Maximum wait must be > 0 seconds"));
        }
        if self.max_attempts == Some(0) {
            return Err(crate::Error::config("Maximum attempts must be > 0"));
        }
        if self.base_delay_ms.saturating_add(self.jitter_max_ms) > MAX_POLL_DELAY_MS {
            return Err(crate::Error::config(format!(
                "Poll delay (base_delay_ms + jitter_max_ms) must be <= {} ms",
                MAX_POLL_DELAY_MS
            )));
        }
        Ok(())
    }

    /// Fixed part of the inter-poll delay
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Exclusive upper bound of the random part of the delay
    pub fn jitter_max(&self) -> Duration {
        Duration::from_millis(self.jitter_max_ms)
    }

    /// Maximum time to keep polling, if bounded
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_secs.map(Duration::from_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            jitter_max_ms: default_jitter_max_ms(),
            max_wait_secs: default_max_wait_secs(),
            max_attempts: None,
            mismatch_tolerance: 0,
        }
    }
}

fn default_alias_zone_id() -> String {
    CLOUDFRONT_ALIAS_ZONE_ID.to_string()
}

fn default_event_channel_capacity() -> usize {
    100
}

fn default_base_delay_ms() -> u64 {
    3_000
}

fn default_jitter_max_ms() -> u64 {
    5_000
}

fn default_max_wait_secs() -> Option<u64> {
    Some(1_800)
}
