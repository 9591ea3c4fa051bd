// # DNS Provider Trait
//
// Defines the interface for submitting record changes via provider APIs.
//
// ## Implementations
//
// - Route 53: `cfswap-provider-aws` crate
//
// ## Usage
//
// ```rust,ignore
// use cfswap_core::{ChangeBatch, DnsProvider, CLOUDFRONT_ALIAS_ZONE_ID};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let dns = /* DnsProvider implementation */;
//
//     let batch = ChangeBatch::alias_upsert(
//         "www.example.com",
//         "d2mz62fpvuge8k.cloudfront.net",
//         CLOUDFRONT_ALIAS_ZONE_ID,
//         false,
//         None,
//     );
//     dns.change_record_sets("Z00646902JW6C5QG3Q2NG", &batch).await?;
//
//     Ok(())
// }
// ```

use crate::model::{ChangeBatch, ChangeSubmission};
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Exactly one batch API call per invocation
/// - ✅ Translate [`ChangeBatch`] into the provider's wire types
/// - ✅ Return success or failure with the provider's error detail
///
/// ## Forbidden Capabilities
/// - ❌ Splitting a batch into several calls (breaks atomicity)
/// - ❌ Retry logic or backoff (a failed swap is terminal for the run)
/// - ❌ Rewriting UPSERT into DELETE + CREATE
/// - ❌ Deciding whether an update is needed (owned by `SwapEngine`)
///
/// ## Idempotency
///
/// Batches only carry UPSERT changes, so submitting the same batch twice
/// leaves the zone exactly as submitting it once.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Submit a change batch atomically
    ///
    /// # Parameters
    ///
    /// - `hosted_zone_id`: Zone that holds the records
    /// - `batch`: Changes to apply all-or-nothing
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeSubmission)`: The provider accepted the batch
    /// - `Err(Error::DnsUpdate)`: The provider rejected or failed the batch
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeSubmission, crate::Error>;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "route53")
    fn provider_name(&self) -> &'static str;
}
