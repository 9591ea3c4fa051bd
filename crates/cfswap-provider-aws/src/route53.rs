//! Route 53 implementation of [`DnsProvider`]
//!
//! One `ChangeResourceRecordSets` call per batch. Route 53 applies every
//! change in a batch or none of them.
//!
//! # Dry-Run Mode
//!
//! When `dry_run` is true, the provider will:
//! - Translate the batch into SDK types (catching malformed batches)
//! - Log the intended batch as JSON
//! - **NOT** call Route 53

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::Client;
use aws_sdk_route53::error::{DisplayErrorContext, SdkError};
use aws_sdk_route53::operation::change_resource_record_sets::ChangeResourceRecordSetsError;
use aws_sdk_route53::types::{self as r53, RrType};
use cfswap_core::model::{ChangeAction, ChangeBatch, ChangeStatus, ChangeSubmission, RecordType};
use cfswap_core::traits::DnsProvider;
use cfswap_core::{Error, Result};

const PROVIDER: &str = "route53";

/// Route 53 change-batch submitter
#[derive(Debug, Clone)]
pub struct Route53Provider {
    client: Client,

    /// Dry-run mode: if true, log the batch instead of submitting it
    dry_run: bool,
}

impl Route53Provider {
    /// Create a provider from a loaded SDK config
    pub fn new(config: &SdkConfig, dry_run: bool) -> Self {
        Self::from_client(Client::new(config), dry_run)
    }

    /// Create a provider around an existing client
    pub fn from_client(client: Client, dry_run: bool) -> Self {
        Self { client, dry_run }
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    /// API Call
    ///
    /// ```http
    /// POST /2013-04-01/hostedzone/:id/rrset
    /// ```
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeSubmission> {
        let sdk_batch = to_sdk_batch(batch)?;

        if self.dry_run {
            let payload = serde_json::to_string(batch).map_err(|e| Error::Other(e.to_string()))?;
            tracing::info!(
                "[DRY-RUN] Would submit to hosted zone {}: {}",
                hosted_zone_id,
                payload
            );
            return Ok(ChangeSubmission {
                change_id: None,
                status: ChangeStatus::DryRun,
            });
        }

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(hosted_zone_id)
            .change_batch(sdk_batch)
            .send()
            .await
            .map_err(|e| update_error(hosted_zone_id, e))?;

        let submission = match output.change_info() {
            Some(info) => ChangeSubmission {
                change_id: Some(info.id().to_string()),
                status: match info.status() {
                    r53::ChangeStatus::Insync => ChangeStatus::InSync,
                    _ => ChangeStatus::Pending,
                },
            },
            None => ChangeSubmission {
                change_id: None,
                status: ChangeStatus::Pending,
            },
        };

        Ok(submission)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Translate a batch into Route 53 SDK types
pub(crate) fn to_sdk_batch(batch: &ChangeBatch) -> Result<r53::ChangeBatch> {
    batch.validate()?;

    let changes = batch
        .changes
        .iter()
        .map(|change| {
            let alias_target = r53::AliasTarget::builder()
                .hosted_zone_id(&change.alias_target.hosted_zone_id)
                .dns_name(&change.alias_target.dns_name)
                .evaluate_target_health(change.alias_target.evaluate_target_health)
                .build()
                .map_err(build_error)?;

            let record_set = r53::ResourceRecordSet::builder()
                .name(&change.name)
                .r#type(rr_type(change.record_type))
                .alias_target(alias_target)
                .build()
                .map_err(build_error)?;

            r53::Change::builder()
                .action(match change.action {
                    ChangeAction::Upsert => r53::ChangeAction::Upsert,
                })
                .resource_record_set(record_set)
                .build()
                .map_err(build_error)
        })
        .collect::<Result<Vec<_>>>()?;

    r53::ChangeBatch::builder()
        .set_comment(batch.comment.clone())
        .set_changes(Some(changes))
        .build()
        .map_err(build_error)
}

fn rr_type(record_type: RecordType) -> RrType {
    match record_type {
        RecordType::A => RrType::A,
        RecordType::Aaaa => RrType::Aaaa,
    }
}

fn build_error(err: aws_sdk_route53::error::BuildError) -> Error {
    Error::invalid_change_batch(err.to_string())
}

fn update_error(hosted_zone_id: &str, err: SdkError<ChangeResourceRecordSetsError>) -> Error {
    let detail = DisplayErrorContext(&err).to_string();

    match err.as_service_error() {
        Some(service) if service.is_no_such_hosted_zone() => Error::dns_update(
            PROVIDER,
            format!("Hosted zone not found: {} ({})", hosted_zone_id, detail),
        ),
        Some(service) if service.is_invalid_change_batch() => Error::dns_update(
            PROVIDER,
            format!("Change batch rejected: {}", detail),
        ),
        _ => Error::dns_update(PROVIDER, format!("ChangeResourceRecordSets failed: {}", detail)),
    }
}
