//! Derive 4via6 IPv6 prefixes for deployment sites.
//!
//! [`derive_4via6`] is the core translation; the rest of the crate turns a
//! site file into per-site subnet router configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod sites;

use std::error::Error;

pub use error::{ErrorKind, Via6Error};
pub use models::{Ipv4, SiteFile, SiteId, Via6Prefix};
pub use processing::{check_for_duplicate_sites, derive_4via6, derive_4via6_with, HostBits};

/// Read a site file, drop repeated CIDRs, and sort sites by site id.
pub fn get_sorted_sites(sites_file: Option<&str>) -> Result<SiteFile, Box<dyn Error>> {
    let site_file = sites::read_sites_file(sites_file)?;
    let mut site_file = processing::de_duplicate_cidrs(site_file);
    site_file.sites.sort_by_key(|s| s.site_id);
    Ok(site_file)
}

/// Decode a 4via6 prefix back into its site id and IPv4 network.
pub fn decode_4via6(prefix: &str) -> Result<(SiteId, Ipv4), Via6Error> {
    let prefix = Via6Prefix::parse(prefix)?;
    Ok((prefix.site, prefix.network))
}
