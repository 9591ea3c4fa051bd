// # cfswap - CloudFront CNAME swap cutover
//
// This binary is a THIN integration layer only. All polling and swap logic
// lives in cfswap-core; all AWS calls live in cfswap-provider-aws.
//
// The cfswap binary is responsible for:
// 1. Parsing arguments (four positionals, flags with environment fallbacks)
// 2. Initializing logging
// 3. Validating input before any network call
// 4. Building the AWS providers and running one swap
// 5. Mapping the outcome to an exit code
//
// ## Example
//
// ```bash
// cfswap EZDLMTR1D3MHD Z00646902JW6C5QG3Q2NG \
//     d2mz62fpvuge8k.cloudfront.net. www.example.com \
//     --max-wait-secs 900
// ```

mod cli;

use anyhow::{Context, Result};
use cfswap_core::traits::{CdnProvider, DnsProvider};
use cfswap_core::{Error, SwapConfig, SwapEngine, SwapOutcome, SwapRequest};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the failure classes an operator must tell apart
///
/// Usage errors are reported by clap with status 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapExitCode {
    /// Alias repointed (or logged, in dry-run mode)
    Success = 0,
    /// Invalid input or configuration
    ConfigError = 1,
    /// The distribution reports a different canonical domain
    DomainMismatch = 3,
    /// The alias did not appear within the configured bounds
    Timeout = 4,
    /// Route 53 rejected or failed the change batch
    DnsUpdateFailed = 5,
    /// CloudFront lookup or other runtime failure
    RuntimeError = 6,
}

impl From<SwapExitCode> for ExitCode {
    fn from(code: SwapExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&Error> for SwapExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation { .. } | Error::Config(_) => SwapExitCode::ConfigError,
            Error::DomainMismatch { .. } => SwapExitCode::DomainMismatch,
            Error::Timeout { .. } => SwapExitCode::Timeout,
            Error::DnsUpdate { .. } | Error::InvalidChangeBatch(_) => SwapExitCode::DnsUpdateFailed,
            Error::Cdn { .. } | Error::Other(_) => SwapExitCode::RuntimeError,
        }
    }
}

/// What the operator should do next, per failure class
fn hint(err: &Error) -> &'static str {
    match err {
        Error::Validation { .. } | Error::Config(_) => "fix the arguments and re-run",
        Error::DomainMismatch { .. } => {
            "check the distribution ID and the expected CloudFront domain; nothing was changed"
        }
        Error::Timeout { .. } => {
            "the swap is not visible yet; keep polling manually or re-run with a larger --max-wait-secs"
        }
        Error::DnsUpdate { .. } | Error::InvalidChangeBatch(_) => {
            "the alias was left exactly as it was; the command is safe to re-run"
        }
        Error::Cdn { .. } | Error::Other(_) => "check AWS credentials and connectivity, then re-run",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SwapExitCode::ConfigError.into();
    }

    // Fail fast, before any network call.
    let (config, request) = match validate_inputs(&cli) {
        Ok(inputs) => inputs,
        Err(errors) => {
            errors.iter().for_each(report);
            return errors
                .first()
                .map_or(SwapExitCode::ConfigError, SwapExitCode::from)
                .into();
        }
    };

    // One sequential run; nothing benefits from more threads.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SwapExitCode::RuntimeError.into();
        }
    };

    let code = match rt.block_on(run(&cli, config, &request)) {
        Ok(outcome) => {
            info!(
                "Record Updated: {} -> {} ({} record(s), change {:?}, {:?})",
                request.alias_name(),
                request.new_canonical_domain(),
                outcome.batch.len(),
                outcome.submission.change_id,
                outcome.submission.status
            );
            SwapExitCode::Success
        }
        Err(e) => match e.downcast_ref::<Error>() {
            Some(swap_error) => {
                report(swap_error);
                SwapExitCode::from(swap_error)
            }
            None => {
                error!("[runtime] {:#}", e);
                SwapExitCode::RuntimeError
            }
        },
    };

    code.into()
}

/// Build the providers and run one swap
async fn run(cli: &Cli, config: SwapConfig, request: &SwapRequest) -> Result<SwapOutcome> {
    let (cdn, dns) = cfswap_provider_aws::connect(
        &cli.credential_source(),
        cli.aws.region.as_deref(),
        cli.dry_run,
    )
    .await
    .context("Failed to set up AWS clients")?;

    let engine = build_engine(Box::new(cdn), Box::new(dns), config)?;

    Ok(engine.run_request(request).await?)
}

/// Check flags and positionals together, reporting every failure
fn validate_inputs(cli: &Cli) -> std::result::Result<(SwapConfig, SwapRequest), Vec<Error>> {
    let config = cli.swap_config();

    match (config.validate(), cli.raw_request().validate()) {
        (Ok(()), Ok(request)) => Ok((config, request)),
        (config_result, request_result) => Err(config_result
            .err()
            .into_iter()
            .chain(request_result.err())
            .collect()),
    }
}

/// Build the engine without an event listener
///
/// Progress is already logged by the engine. The receiver is dropped so
/// events are discarded instead of piling up in the channel.
fn build_engine(
    cdn: Box<dyn CdnProvider>,
    dns: Box<dyn DnsProvider>,
    config: SwapConfig,
) -> cfswap_core::Result<SwapEngine> {
    let (engine, events) = SwapEngine::new(cdn, dns, config)?;
    drop(events);
    Ok(engine)
}

fn report(err: &Error) {
    error!("[{}] {}", err.class(), err);
    error!("[{}] {}", err.class(), hint(err));
}
