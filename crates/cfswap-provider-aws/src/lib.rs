// # AWS Providers
//
// This crate provides the CloudFront CDN provider and the Route 53 DNS
// provider for cfswap, plus the credential source both are built from.
//
// ## Implementation Status
//
// - ✅ One API call per poll (CloudFront `GetDistribution`)
// - ✅ One API call per swap (Route 53 `ChangeResourceRecordSets`, atomic)
// - ✅ Specific error messages for missing distributions, missing zones,
//   access denied and rejected batches
// - ✅ Dry-run mode for the Route 53 provider
// - ✅ Cross-account operation via an assumed role
// - ❌ NO retry logic (polling is owned by ReadinessPoller, the swap is never retried)
// - ❌ NO caching
//
// ## API Reference
//
// - CloudFront: GET `/2020-05-31/distribution/:id`
// - Route 53: POST `/2013-04-01/hostedzone/:id/rrset`

pub mod cloudfront;
pub mod credentials;
pub mod route53;

pub use cloudfront::CloudFrontProvider;
pub use credentials::{CredentialSource, DEFAULT_REGION, load_sdk_config};
pub use route53::Route53Provider;

use cfswap_core::Result;

/// Build both providers from one credential source
///
/// # Parameters
///
/// - `source`: Identity for both clients
/// - `region`: Signing region; [`DEFAULT_REGION`] when `None`
/// - `dry_run`: Log the Route 53 batch instead of submitting it
pub async fn connect(
    source: &CredentialSource,
    region: Option<&str>,
    dry_run: bool,
) -> Result<(CloudFrontProvider, Route53Provider)> {
    let config = load_sdk_config(source, region).await?;

    tracing::debug!(
        "AWS clients ready (region: {:?}, dry-run: {})",
        config.region(),
        dry_run
    );

    Ok((
        CloudFrontProvider::new(&config),
        Route53Provider::new(&config, dry_run),
    ))
}
