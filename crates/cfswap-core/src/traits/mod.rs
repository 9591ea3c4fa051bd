//! Core traits for the CNAME swap system
//!
//! This module defines the abstract interfaces that provider implementations must follow.
//!
//! - [`CdnProvider`]: Read a CDN distribution's live configuration
//! - [`DnsProvider`]: Submit an atomic change batch to a DNS provider

pub mod cdn_provider;
pub mod dns_provider;

pub use cdn_provider::CdnProvider;
pub use dns_provider::DnsProvider;
