// # cfswap-core
//
// Core library for CloudFront CNAME-swap DNS cutover.
//
// ## Architecture Overview
//
// After an operator swaps alternate domain names between two CDN
// distributions, this library repoints the public DNS alias at the new
// distribution the moment the swap becomes visible:
// - **CdnProvider**: Trait for reading a distribution's live configuration
// - **DnsProvider**: Trait for submitting atomic record change batches
// - **ReadinessPoller**: Jittered, bounded polling until the alias is configured
// - **DnsSwapper**: One idempotent UPSERT batch (A, plus AAAA when dual-stack)
// - **SwapEngine**: Orchestrates validation → polling → swapping
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider SDKs
// 2. **Dependency Injection**: Providers are handed in, never global
// 3. **Bounded Waiting**: Polling always ends in readiness, mismatch or timeout
// 4. **Library-First**: All core functionality can be used as a library
// 5. **Idempotency**: UPSERT batches are safe to re-run

pub mod traits;
pub mod engine;
pub mod poller;
pub mod swapper;
pub mod config;
pub mod domain;
pub mod error;
pub mod model;
pub mod request;

// Re-export core types for convenience
pub use traits::{CdnProvider, DnsProvider};
pub use engine::{SwapEngine, SwapEvent, SwapOutcome};
pub use poller::ReadinessPoller;
pub use swapper::DnsSwapper;
pub use config::{PollConfig, SwapConfig};
pub use error::{Error, FieldViolation, Result};
pub use model::{
    AliasTarget, ChangeAction, ChangeBatch, ChangeStatus, ChangeSubmission, DistributionSnapshot,
    DnsChange, ReadinessResult, RecordType, CLOUDFRONT_ALIAS_ZONE_ID,
};
pub use request::{RawSwapRequest, SwapRequest};
