//! Identity used by both AWS clients
//!
//! The core never sees credentials. Callers pick a [`CredentialSource`], load
//! one [`SdkConfig`] from it, and hand that config to both providers, so the
//! CloudFront query and the Route 53 update always run as the same identity.

use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use cfswap_core::{Error, Result};

/// CloudFront and Route 53 are global services; any region works for signing.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where AWS credentials come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CredentialSource {
    /// Environment, shared config files, instance metadata
    #[default]
    DefaultChain,

    /// A named profile from the shared config files
    Profile(String),

    /// Assume a role (e.g., in the account that owns the hosted zone)
    AssumeRole {
        /// ARN of the role to assume
        role_arn: String,
        /// Session name recorded in CloudTrail
        session_name: String,
        /// External ID required by the role's trust policy, if any
        external_id: Option<String>,
        /// Profile holding the base credentials; default chain when `None`
        base_profile: Option<String>,
    },
}

impl CredentialSource {
    /// Validate the credential source
    pub fn validate(&self) -> Result<()> {
        match self {
            CredentialSource::DefaultChain => Ok(()),
            CredentialSource::Profile(name) => {
                if name.trim().is_empty() {
                    return Err(Error::config("AWS profile name cannot be empty"));
                }
                Ok(())
            }
            CredentialSource::AssumeRole {
                role_arn,
                session_name,
                ..
            } => {
                if !role_arn.starts_with("arn:") {
                    return Err(Error::config(format!(
                        "Role ARN must start with 'arn:'. Got: {}",
                        role_arn
                    )));
                }
                if session_name.trim().is_empty() {
                    return Err(Error::config("Role session name cannot be empty"));
                }
                Ok(())
            }
        }
    }
}

/// Load an SDK config for `source`
///
/// # Parameters
///
/// - `source`: Credential source
/// - `region`: Signing region; [`DEFAULT_REGION`] when `None`
pub async fn load_sdk_config(source: &CredentialSource, region: Option<&str>) -> Result<SdkConfig> {
    source.validate()?;

    let region = Region::new(region.unwrap_or(DEFAULT_REGION).to_string());

    match source {
        CredentialSource::DefaultChain => Ok(base_config(None, region).await),
        CredentialSource::Profile(name) => Ok(base_config(Some(name), region).await),
        CredentialSource::AssumeRole {
            role_arn,
            session_name,
            external_id,
            base_profile,
        } => {
            let base = base_config(base_profile.as_deref(), region.clone()).await;

            tracing::debug!("Assuming role {} as session {}", role_arn, session_name);

            let mut builder = AssumeRoleProvider::builder(role_arn.clone())
                .session_name(session_name.clone())
                .configure(&base);
            if let Some(external_id) = external_id {
                builder = builder.external_id(external_id.clone());
            }
            let provider = builder.build().await;

            Ok(aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(provider)
                .load()
                .await)
        }
    }
}

async fn base_config(profile: Option<&str>, region: Region) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_is_valid() {
        CredentialSource::default().validate().unwrap();
    }

    #[test]
    fn blank_profile_is_rejected() {
        assert!(CredentialSource::Profile(" ".to_string()).validate().is_err());
    }

    #[test]
    fn assume_role_needs_an_arn_and_session() {
        let valid = CredentialSource::AssumeRole {
            role_arn: "arn:aws:iam::123456789012:role/dns-swap".to_string(),
            session_name: "cfswap".to_string(),
            external_id: None,
            base_profile: None,
        };
        valid.validate().unwrap();

        let bad_arn = CredentialSource::AssumeRole {
            role_arn: "dns-swap".to_string(),
            session_name: "cfswap".to_string(),
            external_id: None,
            base_profile: None,
        };
        assert!(matches!(bad_arn.validate(), Err(Error::Config(_))));

        let no_session = CredentialSource::AssumeRole {
            role_arn: "arn:aws:iam::123456789012:role/dns-swap".to_string(),
            session_name: String::new(),
            external_id: None,
            base_profile: None,
        };
        assert!(no_session.validate().is_err());
    }
}
