//! Operator input and its validation
//!
//! Validation runs before any network call and reports every violated
//! constraint at once.

use crate::error::{Error, FieldViolation, Result};
use serde::Deserialize;

/// Unvalidated operator input; any field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSwapRequest {
    pub distribution_id: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub new_canonical_domain: Option<String>,
    pub alias_name: Option<String>,
}

impl RawSwapRequest {
    /// Build a raw request with every field present
    pub fn new(
        distribution_id: impl Into<String>,
        hosted_zone_id: impl Into<String>,
        new_canonical_domain: impl Into<String>,
        alias_name: impl Into<String>,
    ) -> Self {
        Self {
            distribution_id: Some(distribution_id.into()),
            hosted_zone_id: Some(hosted_zone_id.into()),
            new_canonical_domain: Some(new_canonical_domain.into()),
            alias_name: Some(alias_name.into()),
        }
    }

    /// Validate into a [`SwapRequest`]
    pub fn validate(self) -> Result<SwapRequest> {
        let mut violations = Vec::new();

        let distribution_id = required("distribution_id", self.distribution_id, &mut violations);
        let hosted_zone_id = required("hosted_zone_id", self.hosted_zone_id, &mut violations);
        let new_canonical_domain =
            required("new_canonical_domain", self.new_canonical_domain, &mut violations);
        let alias_name = required("alias_name", self.alias_name, &mut violations);

        if !violations.is_empty() {
            return Err(Error::validation(violations));
        }

        Ok(SwapRequest {
            distribution_id,
            hosted_zone_id,
            new_canonical_domain,
            alias_name,
        })
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> String {
    let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        violations.push(FieldViolation {
            field,
            reason: "is required and must not be blank",
        });
    }
    trimmed.to_string()
}

/// A validated swap request
///
/// Every field is non-empty and trimmed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    distribution_id: String,
    hosted_zone_id: String,
    new_canonical_domain: String,
    alias_name: String,
}

impl SwapRequest {
    /// Validate four operator-supplied fields
    pub fn new(
        distribution_id: &str,
        hosted_zone_id: &str,
        new_canonical_domain: &str,
        alias_name: &str,
    ) -> Result<Self> {
        RawSwapRequest::new(distribution_id, hosted_zone_id, new_canonical_domain, alias_name)
            .validate()
    }

    /// CDN distribution identifier
    pub fn distribution_id(&self) -> &str {
        &self.distribution_id
    }

    /// DNS hosted zone holding the alias
    pub fn hosted_zone_id(&self) -> &str {
        &self.hosted_zone_id
    }

    /// Expected canonical domain, also the new alias target
    pub fn new_canonical_domain(&self) -> &str {
        &self.new_canonical_domain
    }

    /// Alias record to repoint
    pub fn alias_name(&self) -> &str {
        &self.alias_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: Error) -> Vec<&'static str> {
        match err {
            Error::Validation { violations } => violations.into_iter().map(|v| v.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let request = SwapRequest::new(
            " EZDLMTR1D3MHD ",
            "Z00646902JW6C5QG3Q2NG",
            "d2mz62fpvuge8k.cloudfront.net.\n",
            "\twww.example.com",
        )
        .unwrap();

        assert_eq!(request.distribution_id(), "EZDLMTR1D3MHD");
        assert_eq!(request.new_canonical_domain(), "d2mz62fpvuge8k.cloudfront.net.");
        assert_eq!(request.alias_name(), "www.example.com");
    }

    #[test]
    fn every_blank_field_is_reported() {
        let err = SwapRequest::new("", "  ", "d.cloudfront.net", "\t").unwrap_err();
        assert_eq!(fields(err), vec!["distribution_id", "hosted_zone_id", "alias_name"]);
    }

    #[test]
    fn every_subset_of_missing_fields_is_reported() {
        const NAMES: [&str; 4] = [
            "distribution_id",
            "hosted_zone_id",
            "new_canonical_domain",
            "alias_name",
        ];

        for mask in 1u8..16 {
            let pick = |bit: u8, value: &str| {
                if mask & (1 << bit) != 0 { None } else { Some(value.to_string()) }
            };
            let raw = RawSwapRequest {
                distribution_id: pick(0, "E1"),
                hosted_zone_id: pick(1, "Z1"),
                new_canonical_domain: pick(2, "d.cloudfront.net"),
                alias_name: pick(3, "www.example.com"),
            };

            let expected: Vec<_> = (0..4)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| NAMES[bit as usize])
                .collect();

            assert_eq!(fields(raw.validate().unwrap_err()), expected, "mask {mask:04b}");
        }
    }
}
