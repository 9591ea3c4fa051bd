//! Request/response-shaped values exchanged between the poller, the swapper
//! and the provider traits.
//!
//! Nothing here is persisted. A [`DistributionSnapshot`] is produced fresh on
//! every poll; a [`ChangeBatch`] is built once, after readiness.

use crate::domain;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Hosted zone that Route 53 uses for every CloudFront alias target.
///
/// This identifier is specific to CloudFront; another CDN would publish its own.
pub const CLOUDFRONT_ALIAS_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// The CDN provider's current view of one distribution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionSnapshot {
    /// Provider-assigned hostname (e.g., "d2mz62fpvuge8k.cloudfront.net")
    pub canonical_domain: String,
    /// Alternate domain names; `None` when the provider omits the list
    pub configured_aliases: Option<BTreeSet<String>>,
    /// Whether the distribution serves IPv6
    pub ipv6_enabled: bool,
}

impl DistributionSnapshot {
    /// Create a snapshot from provider data
    pub fn new<I, S>(canonical_domain: impl Into<String>, aliases: Option<I>, ipv6_enabled: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical_domain: canonical_domain.into(),
            configured_aliases: aliases.map(|a| a.into_iter().map(Into::into).collect()),
            ipv6_enabled,
        }
    }

    /// Whether `alias` is among the configured alternate domain names
    ///
    /// An absent or empty list never contains anything.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.configured_aliases
            .as_ref()
            .is_some_and(|aliases| aliases.iter().any(|a| domain::names_equal(a, alias)))
    }
}

/// Outcome of a successful readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessResult {
    /// Whether the distribution is dual-stack
    pub ipv6_enabled: bool,
    /// Number of polls it took, including the successful one
    pub attempts: u32,
}

/// DNS record type managed by the swapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RecordType {
    /// IPv4 alias
    A,
    /// IPv6 alias
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change action; only create-or-replace is ever issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record if absent, replace it if present
    Upsert,
}

/// Alias target of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    /// Hosted zone of the alias target (the CDN's well-known zone)
    pub hosted_zone_id: String,
    /// Domain the alias resolves to
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    /// Always false for CDN targets
    pub evaluate_target_health: bool,
}

/// One record change inside a [`ChangeBatch`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsChange {
    pub action: ChangeAction,
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: RecordType,
    pub alias_target: AliasTarget,
}

/// An atomic list of record changes submitted in a single provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub changes: Vec<DnsChange>,
}

impl ChangeBatch {
    /// Build the UPSERT batch repointing `alias` at `target`
    ///
    /// Produces exactly one A change, plus one AAAA change when `ipv6_enabled`.
    pub fn alias_upsert(
        alias: &str,
        target: &str,
        alias_zone_id: &str,
        ipv6_enabled: bool,
        comment: Option<String>,
    ) -> Self {
        let mut types = vec![RecordType::A];
        if ipv6_enabled {
            types.push(RecordType::Aaaa);
        }

        let changes = types
            .into_iter()
            .map(|record_type| DnsChange {
                action: ChangeAction::Upsert,
                name: alias.to_string(),
                record_type,
                alias_target: AliasTarget {
                    hosted_zone_id: alias_zone_id.to_string(),
                    dns_name: target.to_string(),
                    evaluate_target_health: false,
                },
            })
            .collect();

        Self { comment, changes }
    }

    /// Check the batch invariants: non-empty, no duplicate types, one name, one target
    pub fn validate(&self) -> Result<()> {
        let first = self
            .changes
            .first()
            .ok_or_else(|| Error::invalid_change_batch("batch has no changes"))?;

        let mut seen = BTreeSet::new();
        for change in &self.changes {
            if !seen.insert(change.record_type) {
                return Err(Error::invalid_change_batch(format!(
                    "duplicate {} change",
                    change.record_type
                )));
            }
            if change.name != first.name || change.alias_target != first.alias_target {
                return Err(Error::invalid_change_batch(
                    "changes disagree on record name or alias target",
                ));
            }
        }

        if !seen.contains(&RecordType::A) {
            return Err(Error::invalid_change_batch("batch has no A change"));
        }

        Ok(())
    }

    /// Record types in the batch, in submission order
    pub fn record_types(&self) -> Vec<RecordType> {
        self.changes.iter().map(|c| c.record_type).collect()
    }

    /// Number of changes in the batch
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Provider-side state of a submitted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Accepted, still propagating
    Pending,
    /// Propagated to all authoritative servers
    InSync,
    /// Not submitted; the provider only logged it
    DryRun,
}

/// Provider acknowledgement of a change batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSubmission {
    /// Provider change id, when one was issued
    pub change_id: Option<String>,
    /// Status reported at submission time
    pub status: ChangeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stack_batch_has_one_a_upsert() {
        let batch = ChangeBatch::alias_upsert(
            "www.example.com",
            "d2mz62fpvuge8k.cloudfront.net.",
            CLOUDFRONT_ALIAS_ZONE_ID,
            false,
            None,
        );

        assert_eq!(batch.record_types(), vec![RecordType::A]);
        assert_eq!(batch.changes[0].action, ChangeAction::Upsert);
        assert_eq!(batch.changes[0].alias_target.hosted_zone_id, "Z2FDTNDATAQYW2");
        assert!(!batch.changes[0].alias_target.evaluate_target_health);
        batch.validate().unwrap();
    }

    #[test]
    fn dual_stack_batch_has_a_and_aaaa_with_same_target() {
        let batch = ChangeBatch::alias_upsert(
            "www.example.com",
            "d2mz62fpvuge8k.cloudfront.net",
            CLOUDFRONT_ALIAS_ZONE_ID,
            true,
            None,
        );

        assert_eq!(batch.record_types(), vec![RecordType::A, RecordType::Aaaa]);
        assert_eq!(batch.changes[0].alias_target, batch.changes[1].alias_target);
        assert_eq!(batch.changes[0].name, batch.changes[1].name);
        batch.validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_and_duplicate_batches() {
        let empty = ChangeBatch { comment: None, changes: Vec::new() };
        assert!(matches!(empty.validate(), Err(Error::InvalidChangeBatch(_))));

        let mut dup = ChangeBatch::alias_upsert("a.example.com", "d.net", "Z", false, None);
        dup.changes.push(dup.changes[0].clone());
        assert!(matches!(dup.validate(), Err(Error::InvalidChangeBatch(_))));
    }

    #[test]
    fn snapshot_alias_lookup_ignores_order_and_absence() {
        let absent = DistributionSnapshot::new("d.cloudfront.net", None::<Vec<String>>, false);
        assert!(!absent.has_alias("www.example.com"));

        let empty = DistributionSnapshot::new("d.cloudfront.net", Some(Vec::<String>::new()), false);
        assert!(!empty.has_alias("www.example.com"));

        let listed = DistributionSnapshot::new(
            "d.cloudfront.net",
            Some(vec!["static.example.com", "www.example.com"]),
            false,
        );
        assert!(listed.has_alias("www.example.com"));
        assert!(listed.has_alias("www.example.com."));
        assert!(!listed.has_alias("api.example.com"));
    }

    #[test]
    fn batch_serializes_in_route53_shape() {
        let batch = ChangeBatch::alias_upsert("www.example.com", "d.cloudfront.net", "Z2FDTNDATAQYW2", false, None);
        let json = serde_json::to_value(&batch).unwrap();

        assert_eq!(json["Changes"][0]["Action"], "UPSERT");
        assert_eq!(json["Changes"][0]["Type"], "A");
        assert_eq!(json["Changes"][0]["AliasTarget"]["DNSName"], "d.cloudfront.net");
        assert!(json.get("Comment").is_none());
    }
}
