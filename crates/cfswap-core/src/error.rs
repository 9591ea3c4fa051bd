//! Error types for the CNAME swap system
//!
//! This module defines all error types used throughout the crate.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for swap operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single violated input constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field (e.g., "distribution_id")
    pub field: &'static str,
    /// What is wrong with it
    pub reason: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Renders violations as "a is required, b is required"
struct Violations<'a>(&'a [FieldViolation]);

impl fmt::Display for Violations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Core error type for the CNAME swap system
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required inputs missing or blank
    #[error("Validation failed: {}", Violations(.violations))]
    Validation {
        /// Every violated constraint, in input order
        violations: Vec<FieldViolation>,
    },

    /// The distribution's canonical domain is not the one the operator expects
    #[error("Domain mismatch: expected {expected}, distribution reports {actual}")]
    DomainMismatch {
        /// Domain supplied by the operator
        expected: String,
        /// Domain reported by the CDN provider
        actual: String,
    },

    /// Readiness was not observed within the configured bounds
    #[error("Timed out waiting for alias after {attempts} attempt(s) ({elapsed:?})")]
    Timeout {
        /// Number of polls performed
        attempts: u32,
        /// Time spent polling
        elapsed: Duration,
    },

    /// The DNS provider rejected or failed the change batch
    #[error("DNS update failed ({provider}): {message}")]
    DnsUpdate {
        /// Provider name
        provider: String,
        /// Provider error detail
        message: String,
    },

    /// The CDN provider could not return the distribution
    #[error("CDN lookup failed ({provider}): {message}")]
    Cdn {
        /// Provider name
        provider: String,
        /// Provider error detail
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A change batch violated its construction rules
    #[error("Invalid change batch: {0}")]
    InvalidChangeBatch(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error from collected violations
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    /// Create a domain mismatch error
    pub fn domain_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DomainMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(attempts: u32, elapsed: Duration) -> Self {
        Self::Timeout { attempts, elapsed }
    }

    /// Create a DNS update error
    pub fn dns_update(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DnsUpdate {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a CDN lookup error
    pub fn cdn(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Cdn {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid change batch error
    pub fn invalid_change_batch(msg: impl Into<String>) -> Self {
        Self::InvalidChangeBatch(msg.into())
    }

    /// Stable failure-class label, suitable for log filtering
    pub fn class(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::DomainMismatch { .. } => "domain_mismatch",
            Self::Timeout { .. } => "timeout",
            Self::DnsUpdate { .. } => "dns_update",
            Self::Cdn { .. } => "cdn_lookup",
            Self::Config(_) => "config",
            Self::InvalidChangeBatch(_) => "invalid_change_batch",
            Self::Other(_) => "other",
        }
    }

    /// Whether re-running the same command could succeed without operator changes
    ///
    /// Only CDN lookups qualify. The DNS update is never retried by the core,
    /// and every other class needs the operator to change something.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Cdn { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
