// # CDN Provider Trait
//
// Defines the read-only interface for querying a CDN distribution.
//
// ## Implementations
//
// - CloudFront: `cfswap-provider-aws` crate
//
// ## Usage
//
// ```rust,ignore
// use cfswap_core::CdnProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let cdn = /* CdnProvider implementation */;
//
//     let snapshot = cdn.get_distribution("EZDLMTR1D3MHD").await?;
//     println!("{} serves {:?}", snapshot.canonical_domain, snapshot.configured_aliases);
//
//     Ok(())
// }
// ```

use crate::model::DistributionSnapshot;
use async_trait::async_trait;

/// Trait for CDN provider implementations
///
/// The provider's answer may lag the real configuration (eventual
/// consistency); callers poll rather than trusting a single response.
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ One read-only API call per invocation
/// - ✅ Map provider responses into [`DistributionSnapshot`]
///
/// ## Forbidden Capabilities
/// - ❌ Sleeping, retrying or backoff (owned by `ReadinessPoller`)
/// - ❌ Comparing domains or deciding readiness (owned by `ReadinessPoller`)
/// - ❌ Caching a snapshot between calls
#[async_trait]
pub trait CdnProvider: Send + Sync {
    /// Fetch a fresh snapshot of one distribution's configuration
    ///
    /// # Parameters
    ///
    /// - `distribution_id`: Provider identifier of the distribution
    ///
    /// # Returns
    ///
    /// - `Ok(DistributionSnapshot)`: The provider's current view
    /// - `Err(Error::Cdn)`: If the lookup failed (network, auth, not found)
    async fn get_distribution(
        &self,
        distribution_id: &str,
    ) -> Result<DistributionSnapshot, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
