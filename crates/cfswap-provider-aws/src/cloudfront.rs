//! CloudFront implementation of [`CdnProvider`]
//!
//! One `GetDistribution` call per poll. No retry, no caching: the poller owns
//! both.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::error::{DisplayErrorContext, SdkError};
use aws_sdk_cloudfront::operation::get_distribution::GetDistributionError;
use cfswap_core::traits::CdnProvider;
use cfswap_core::{DistributionSnapshot, Error, Result};

const PROVIDER: &str = "cloudfront";

/// CloudFront distribution reader
#[derive(Debug, Clone)]
pub struct CloudFrontProvider {
    client: Client,
}

impl CloudFrontProvider {
    /// Create a provider from a loaded SDK config
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(Client::new(config))
    }

    /// Create a provider around an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CdnProvider for CloudFrontProvider {
    /// API Call
    ///
    /// ```http
    /// GET /2020-05-31/distribution/:id
    /// ```
    async fn get_distribution(&self, distribution_id: &str) -> Result<DistributionSnapshot> {
        let output = self
            .client
            .get_distribution()
            .id(distribution_id)
            .send()
            .await
            .map_err(|e| lookup_error(distribution_id, e))?;

        let distribution = output.distribution().ok_or_else(|| {
            Error::cdn(PROVIDER, "Invalid response format: distribution is missing")
        })?;
        let config = distribution.distribution_config();

        let snapshot = snapshot_from_parts(
            distribution.domain_name(),
            config.and_then(|c| c.aliases()).map(|a| a.items()),
            config.and_then(|c| c.is_ipv6_enabled()),
        );

        tracing::debug!(
            "Distribution {} serves {} with aliases {:?}",
            distribution_id,
            snapshot.canonical_domain,
            snapshot.configured_aliases
        );

        Ok(snapshot)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Build a snapshot from the fields CloudFront returns
///
/// A missing `IsIPV6Enabled` flag means IPv4 only.
pub(crate) fn snapshot_from_parts(
    domain_name: &str,
    aliases: Option<&[String]>,
    ipv6_enabled: Option<bool>,
) -> DistributionSnapshot {
    DistributionSnapshot::new(
        domain_name,
        aliases.map(|items| items.iter().cloned()),
        ipv6_enabled.unwrap_or(false),
    )
}

fn lookup_error(distribution_id: &str, err: SdkError<GetDistributionError>) -> Error {
    let detail = DisplayErrorContext(&err).to_string();

    match err.as_service_error() {
        Some(service) if service.is_no_such_distribution() => Error::cdn(
            PROVIDER,
            format!("Distribution not found: {} ({})", distribution_id, detail),
        ),
        Some(service) if service.is_access_denied() => Error::cdn(
            PROVIDER,
            format!("Access denied reading {}: {}", distribution_id, detail),
        ),
        _ => Error::cdn(PROVIDER, format!("GetDistribution failed: {}", detail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_map_into_snapshot() {
        let aliases = vec!["www.example.com".to_string(), "example.com".to_string()];
        let snapshot = snapshot_from_parts("d2mz62fpvuge8k.cloudfront.net", Some(&aliases), Some(true));

        assert_eq!(snapshot.canonical_domain, "d2mz62fpvuge8k.cloudfront.net");
        assert!(snapshot.ipv6_enabled);
        assert!(snapshot.has_alias("www.example.com"));
        assert!(snapshot.has_alias("example.com"));
    }

    #[test]
    fn missing_fields_mean_no_alias_and_ipv4_only() {
        let snapshot = snapshot_from_parts("d.cloudfront.net", None, None);

        assert!(!snapshot.ipv6_enabled);
        assert_eq!(snapshot.configured_aliases, None);
        assert!(!snapshot.has_alias("www.example.com"));
    }
}
