//! Domain models for 4via6 site routing.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`SiteId`], [`Site`] and [`SiteFile`] - Deployment sites
//! - [`Via6Prefix`] - A derived 4via6 IPv6 prefix

mod ipv4;
mod site;
mod via6;

// Re-export public types
pub use ipv4::{get_cidr_mask, Ipv4, MAX_LENGTH};
pub use site::{Site, SiteFile, SiteId};
pub use via6::{Via6Prefix, VIA6_PREFIX, VIA6_PREFIX_LEN_OFFSET};
