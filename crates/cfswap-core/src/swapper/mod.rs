//! DNS swapper
//!
//! Repoints an alias at a new CDN canonical domain with a single UPSERT batch:
//! one A change, plus one AAAA change for dual-stack distributions.
//!
//! UPSERT instead of DELETE + CREATE keeps the operation safe to re-run. It
//! succeeds whether or not the record already exists, and the alias never
//! resolves to nothing in between.

use crate::engine::SwapEvent;
use crate::error::Result;
use crate::model::{ChangeBatch, ChangeSubmission};
use crate::traits::DnsProvider;
use tokio::sync::mpsc;
use tracing::info;

/// Submits the alias change batch to a DNS provider
pub struct DnsSwapper {
    /// DNS provider receiving the batch
    dns: Box<dyn DnsProvider>,

    /// Hosted zone of the CDN alias target
    alias_zone_id: String,

    /// Comment attached to every batch
    comment: Option<String>,

    /// Optional sink for progress events
    events: Option<mpsc::Sender<SwapEvent>>,
}

impl DnsSwapper {
    /// Create a swapper over `dns` targeting aliases in `alias_zone_id`
    pub fn new(dns: Box<dyn DnsProvider>, alias_zone_id: impl Into<String>) -> Self {
        Self {
            dns,
            alias_zone_id: alias_zone_id.into(),
            comment: None,
            events: None,
        }
    }

    /// Attach a comment to submitted batches
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Report progress on `events`
    pub fn with_events(mut self, events: mpsc::Sender<SwapEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the batch for an alias without submitting it
    pub fn build_batch(&self, new_domain: &str, alias_name: &str, ipv6_enabled: bool) -> ChangeBatch {
        ChangeBatch::alias_upsert(
            alias_name,
            new_domain,
            &self.alias_zone_id,
            ipv6_enabled,
            self.comment.clone(),
        )
    }

    /// Point `alias_name` at `new_domain` in one atomic call
    ///
    /// # Parameters
    ///
    /// - `hosted_zone_id`: Zone holding the alias
    /// - `new_domain`: New alias target
    /// - `alias_name`: Record to repoint
    /// - `ipv6_enabled`: Also upsert the AAAA record
    ///
    /// # Returns
    ///
    /// - `Ok((ChangeBatch, ChangeSubmission))`: The submitted batch and the provider's acknowledgement
    /// - `Err(Error::DnsUpdate)`: The provider rejected the batch; nothing is retried
    pub async fn swap_alias(
        &self,
        hosted_zone_id: &str,
        new_domain: &str,
        alias_name: &str,
        ipv6_enabled: bool,
    ) -> Result<(ChangeBatch, ChangeSubmission)> {
        let batch = self.build_batch(new_domain, alias_name, ipv6_enabled);
        batch.validate()?;

        info!(
            "Submitting {} UPSERT(s) to {}: {} -> {} ({:?})",
            batch.len(),
            self.dns.provider_name(),
            alias_name,
            new_domain,
            batch.record_types()
        );
        self.emit(SwapEvent::SwapSubmitted {
            changes: batch.len(),
        });

        let submission = self.dns.change_record_sets(hosted_zone_id, &batch).await?;

        info!(
            "{} accepted the change batch (id: {:?}, status: {:?})",
            self.dns.provider_name(),
            submission.change_id,
            submission.status
        );
        self.emit(SwapEvent::SwapSucceeded {
            change_id: submission.change_id.clone(),
        });

        Ok((batch, submission))
    }

    fn emit(&self, event: SwapEvent) {
        if let Some(events) = &self.events {
            crate::engine::send_event(events, event);
        }
    }
}
