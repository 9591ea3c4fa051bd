//! Test doubles and common utilities for contract tests
//!
//! The fakes are cheap to clone and share their recorded state, so a test can
//! hand one clone to the engine and inspect another afterwards.

#![allow(dead_code)]

use cfswap_core::config::{PollConfig, SwapConfig};
use cfswap_core::error::{Error, Result};
use cfswap_core::model::{
    AliasTarget, ChangeBatch, ChangeStatus, ChangeSubmission, DistributionSnapshot, RecordType,
};
use cfswap_core::traits::{CdnProvider, DnsProvider};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub const DISTRIBUTION_ID: &str = "EZDLMTR1D3MHD";
pub const HOSTED_ZONE_ID: &str = "Z00646902JW6C5QG3Q2NG";
pub const NEW_DOMAIN: &str = "d2mz62fpvuge8k.cloudfront.net";
pub const ALIAS: &str = "www.example.com";

/// Snapshot of the new distribution with the alias attached
pub fn ready_snapshot(ipv6_enabled: bool) -> DistributionSnapshot {
    DistributionSnapshot::new(NEW_DOMAIN, Some(vec![ALIAS]), ipv6_enabled)
}

/// Snapshot of the new distribution before the swap is visible
pub fn pending_snapshot() -> DistributionSnapshot {
    DistributionSnapshot::new(NEW_DOMAIN, None::<Vec<String>>, false)
}

/// A CDN provider that replays a script of responses
///
/// The last response repeats once the script is exhausted.
#[derive(Clone)]
pub struct ScriptedCdnProvider {
    script: Arc<Mutex<VecDeque<Result<DistributionSnapshot>>>>,
    last: Arc<Mutex<Option<DistributionSnapshot>>>,
    /// Virtual time of every call
    calls: Arc<Mutex<Vec<Instant>>>,
}

impl ScriptedCdnProvider {
    pub fn new(script: Vec<Result<DistributionSnapshot>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that always returns `snapshot`
    pub fn always(snapshot: DistributionSnapshot) -> Self {
        Self::new(vec![Ok(snapshot)])
    }

    /// Get the number of times get_distribution() was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Time elapsed between consecutive calls
    pub fn intervals(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Time elapsed between the first and the last call
    pub fn span(&self) -> Duration {
        let calls = self.calls.lock().unwrap();
        match (calls.first(), calls.last()) {
            (Some(first), Some(last)) => *last - *first,
            _ => Duration::ZERO,
        }
    }
}

#[async_trait::async_trait]
impl CdnProvider for ScriptedCdnProvider {
    async fn get_distribution(&self, distribution_id: &str) -> Result<DistributionSnapshot> {
        assert_eq!(distribution_id, DISTRIBUTION_ID);
        self.calls.lock().unwrap().push(Instant::now());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(snapshot)) => {
                *self.last.lock().unwrap() = Some(snapshot.clone());
                Ok(snapshot)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| Error::cdn("scripted", "script is empty")),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// A DNS provider that applies UPSERTs to an in-memory zone
#[derive(Clone)]
pub struct RecordingDnsProvider {
    /// Every submitted (zone, batch) pair
    submissions: Arc<Mutex<Vec<(String, ChangeBatch)>>>,
    /// Current alias records keyed by (name, type)
    zone: Arc<Mutex<BTreeMap<(String, RecordType), AliasTarget>>>,
    /// When set, every call fails with this message
    failure: Option<String>,
}

impl RecordingDnsProvider {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            zone: Arc::new(Mutex::new(BTreeMap::new())),
            failure: None,
        }
    }

    /// A provider that rejects every batch
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Get the number of times change_record_sets() was called
    pub fn call_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Get the submitted batches
    pub fn submissions(&self) -> Vec<(String, ChangeBatch)> {
        self.submissions.lock().unwrap().clone()
    }

    /// Get the resulting zone contents
    pub fn zone(&self) -> BTreeMap<(String, RecordType), AliasTarget> {
        self.zone.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingDnsProvider {
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeSubmission> {
        self.submissions
            .lock()
            .unwrap()
            .push((hosted_zone_id.to_string(), batch.clone()));

        if let Some(message) = &self.failure {
            return Err(Error::dns_update("recording", message.clone()));
        }

        let mut zone = self.zone.lock().unwrap();
        for change in &batch.changes {
            zone.insert(
                (change.name.clone(), change.record_type),
                change.alias_target.clone(),
            );
        }

        Ok(ChangeSubmission {
            change_id: Some(format!("/change/C{}", self.call_count())),
            status: ChangeStatus::Pending,
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Default 3s + [0, 5s) policy, bounded by attempts so tests always end
pub fn poll_config(max_attempts: u32) -> PollConfig {
    PollConfig {
        max_attempts: Some(max_attempts),
        ..PollConfig::default()
    }
}

/// Helper to create a SwapConfig for testing
pub fn swap_config(max_attempts: u32) -> SwapConfig {
    SwapConfig {
        poll: poll_config(max_attempts),
        ..SwapConfig::default()
    }
}
