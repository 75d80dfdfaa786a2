//! Site file validation and de-duplication.

use crate::models::{Ipv4, SiteFile};
use itertools::Itertools;
use std::error::Error;

/// Return an error if two sites share an id or a name, or a site has no CIDRs.
pub fn check_for_duplicate_sites(site_file: &SiteFile) -> Result<(), Box<dyn Error>> {
    let dup_ids: Vec<String> = site_file
        .sites
        .iter()
        .duplicates_by(|s| s.site_id)
        .map(|s| s.site_id.to_string())
        .collect();
    if !dup_ids.is_empty() {
        return Err(format!("Duplicate site_id found: {}", dup_ids.join(", ")).into());
    }

    let dup_names: Vec<&str> = site_file
        .sites
        .iter()
        .map(|s| s.name.as_str())
        .duplicates()
        .collect();
    if !dup_names.is_empty() {
        return Err(format!("Duplicate site name found: {}", dup_names.join(", ")).into());
    }

    if let Some(site) = site_file.sites.iter().find(|s| s.cidrs.is_empty()) {
        return Err(format!("Site '{}' has no cidrs", site.name).into());
    }

    Ok(())
}

/// Drop CIDRs that name the same network as an earlier CIDR of the same site.
///
/// Order of first appearance is kept, so advertise routes stay in file order.
pub fn de_duplicate_cidrs(mut site_file: SiteFile) -> SiteFile {
    for site in site_file.sites.iter_mut() {
        let before = site.cidrs.len();
        let cidrs: Vec<Ipv4> = site.cidrs.iter().unique_by(|c| c.network()).copied().collect();
        if cidrs.len() != before {
            log::warn!(
                "Site '{}': dropped {} duplicate cidr(s)",
                site.name,
                before - cidrs.len()
            );
        }
        site.cidrs = cidrs;
    }
    site_file
}
