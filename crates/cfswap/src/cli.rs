//! Clap derive structures for the `cfswap` CLI.

use cfswap_core::config::{PollConfig, SwapConfig};
use cfswap_core::request::RawSwapRequest;
use cfswap_provider_aws::CredentialSource;
use clap::{Args, Parser, ValueEnum};
use tracing::Level;

/// cfswap -- finish a CloudFront CNAME swap in Route 53
#[derive(Debug, Parser)]
#[command(
    name = "cfswap",
    version,
    about = "Repoint a Route 53 alias at a CloudFront distribution once a CNAME swap is visible",
    long_about = "Polls the CloudFront distribution until it reports the alias among its\n\
        alternate domain names, then UPSERTs the alias record (A, plus AAAA for\n\
        IPv6-enabled distributions) in one atomic Route 53 change batch."
)]
pub struct Cli {
    /// CloudFront distribution that receives the alias (e.g., EZDLMTR1D3MHD)
    pub distribution_id: String,

    /// Route 53 hosted zone holding the alias record
    pub hosted_zone_id: String,

    /// Canonical domain of the distribution; checked, then used as the alias target
    pub new_domain: String,

    /// Alias record to repoint (e.g., www.example.com)
    pub alias_name: String,

    #[command(flatten)]
    pub poll: PollOpts,

    #[command(flatten)]
    pub aws: AwsOpts,

    /// Comment attached to the Route 53 change batch
    #[arg(long, env = "CFSWAP_COMMENT")]
    pub comment: Option<String>,

    /// Poll for real but only log the change batch
    #[arg(long, env = "CFSWAP_DRY_RUN")]
    pub dry_run: bool,

    /// Log verbosity
    #[arg(long, env = "CFSWAP_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

// ── Polling ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollOpts {
    /// Give up after this many seconds without readiness
    #[arg(long, env = "CFSWAP_MAX_WAIT_SECS", default_value_t = 1800)]
    pub max_wait_secs: u64,

    /// Give up after this many polls
    #[arg(long, env = "CFSWAP_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Consecutive canonical-domain mismatches to re-poll before failing
    #[arg(long, env = "CFSWAP_MISMATCH_TOLERANCE", default_value_t = 0)]
    pub mismatch_tolerance: u32,
}

// ── AWS Identity ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AwsOpts {
    /// Shared-config profile for AWS credentials
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Signing region (CloudFront and Route 53 are global)
    #[arg(long, env = "CFSWAP_REGION")]
    pub region: Option<String>,

    /// Role to assume before calling AWS (cross-account zones)
    #[arg(long, env = "CFSWAP_ROLE_ARN")]
    pub role_arn: Option<String>,

    /// Session name for the assumed role
    #[arg(long, env = "CFSWAP_ROLE_SESSION_NAME", default_value = "cfswap")]
    pub role_session_name: String,

    /// External ID required by the role's trust policy
    #[arg(long, env = "CFSWAP_EXTERNAL_ID", hide_env_values = true)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl Cli {
    /// Operator input, unvalidated
    pub fn raw_request(&self) -> RawSwapRequest {
        RawSwapRequest::new(
            self.distribution_id.clone(),
            self.hosted_zone_id.clone(),
            self.new_domain.clone(),
            self.alias_name.clone(),
        )
    }

    /// Swap configuration from flags and environment
    pub fn swap_config(&self) -> SwapConfig {
        SwapConfig {
            poll: PollConfig {
                max_wait_secs: Some(self.poll.max_wait_secs),
                max_attempts: self.poll.max_attempts,
                mismatch_tolerance: self.poll.mismatch_tolerance,
                ..PollConfig::default()
            },
            comment: self.comment.clone(),
            ..SwapConfig::default()
        }
    }

    /// Identity for both AWS clients
    pub fn credential_source(&self) -> CredentialSource {
        match (&self.aws.role_arn, &self.aws.profile) {
            (Some(role_arn), profile) => CredentialSource::AssumeRole {
                role_arn: role_arn.clone(),
                session_name: self.aws.role_session_name.clone(),
                external_id: self.aws.external_id.clone(),
                base_profile: profile.clone(),
            },
            (None, Some(profile)) => CredentialSource::Profile(profile.clone()),
            (None, None) => CredentialSource::DefaultChain,
        }
    }
}
