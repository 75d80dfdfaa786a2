//! Per-site subnet router configuration.
//!
//! Each site gets one router advertising the 4via6 prefix of every IPv4
//! network behind it.

use super::translate::{via6_prefix, HostBits};
use crate::models::{Ipv4, Site, SiteFile, SiteId, Via6Prefix};
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::error::Error;
use std::sync::OnceLock;

/// API version of the router custom resource.
pub const CONNECTOR_API_VERSION: &str = "tailscale.com/v1alpha1";

static DNS_LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dns_label_regex() -> &'static Regex {
    DNS_LABEL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("Invalid Regex")
    })
}

/// Router configuration derived for one site.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SiteRoute {
    pub name: String,
    pub site_id: SiteId,
    pub region: Option<String>,
    /// Resource name of the router, `service-router-<suffix>`.
    pub router_name: String,
    /// Tailnet hostname of the router, `<platform>-service-router-<suffix>`.
    pub hostname: String,
    pub cidrs: Vec<Ipv4>,
    /// 4via6 prefixes in the same order as `cidrs`.
    pub advertise_routes: Vec<Via6Prefix>,
}

/// Short region name: the first two `-` separated components.
///
/// # Examples
/// ```
/// use site_4via6_routes::processing::region_short_name;
/// assert_eq!(region_short_name("us-west-2"), "us-west");
/// assert_eq!(region_short_name("westeurope"), "westeurope");
/// ```
pub fn region_short_name(region: &str) -> String {
    region.split('-').take(2).collect::<Vec<&str>>().join("-")
}

fn router_suffix(site: &Site) -> String {
    match site.region.as_deref() {
        Some(region) if !region.is_empty() => region_short_name(region),
        _ => site.name.clone(),
    }
}

/// Hostname of the site's router, validated as a DNS label.
pub fn router_hostname(site: &Site) -> Result<String, Box<dyn Error>> {
    let hostname = format!(
        "{platform}-service-router-{suffix}",
        platform = site.platform,
        suffix = router_suffix(site)
    )
    .to_lowercase();

    if !get_dns_label_regex().is_match(&hostname) {
        return Err(format!(
            "Site '{}': router hostname {hostname:?} is not a valid DNS label",
            site.name
        )
        .into());
    }
    Ok(hostname)
}

/// Build the router configuration for a single site.
pub fn build_site_route(site: &Site, host_bits: HostBits) -> Result<SiteRoute, Box<dyn Error>> {
    let advertise_routes = site
        .cidrs
        .iter()
        .map(|cidr| via6_prefix(site.site_id, *cidr, host_bits))
        .collect::<Result<Vec<Via6Prefix>, _>>()
        .map_err(|e| format!("Site '{}': {e}", site.name))?;

    Ok(SiteRoute {
        name: site.name.clone(),
        site_id: site.site_id,
        region: site.region.clone(),
        router_name: format!("service-router-{}", router_suffix(site)).to_lowercase(),
        hostname: router_hostname(site)?,
        cidrs: site.cidrs.clone(),
        advertise_routes,
    })
}

/// Build router configuration for every site, ordered by site id.
pub fn build_site_routes(
    site_file: &SiteFile,
    host_bits: HostBits,
) -> Result<Vec<SiteRoute>, Box<dyn Error>> {
    log::info!(
        "#Start build_site_routes() sites={} host_bits={host_bits:?}",
        site_file.sites.len()
    );
    super::check_for_duplicate_sites(site_file)?;

    let mut routes = site_file
        .sites
        .iter()
        .map(|site| build_site_route(site, host_bits))
        .collect::<Result<Vec<SiteRoute>, _>>()?;
    routes.sort_by_key(|r| r.site_id);
    check_for_duplicate_routers(&routes)?;

    for r in routes.iter() {
        log::debug!(
            "site {} '{}' -> {} route(s) via {}",
            r.site_id,
            r.name,
            r.advertise_routes.len(),
            r.hostname
        );
    }
    Ok(routes)
}

/// Return an error if two sites would share a router name or hostname.
///
/// Regions that differ only after the second `-` (`us-west-1`, `us-west-2`)
/// shorten to the same suffix.
pub fn check_for_duplicate_routers(routes: &[SiteRoute]) -> Result<(), Box<dyn Error>> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for r in routes {
        for key in [r.router_name.as_str(), r.hostname.as_str()] {
            if let Some(other) = seen.insert(key, r.name.as_str()) {
                if other != r.name {
                    return Err(format!(
                        "Duplicate router {key} for sites '{other}' and '{}'",
                        r.name
                    )
                    .into());
                }
            }
        }
    }
    Ok(())
}

/// The router custom resource for a site.
pub fn connector_manifest(route: &SiteRoute) -> Value {
    let advertise_routes: Vec<String> = route
        .advertise_routes
        .iter()
        .map(|p| p.to_string())
        .collect();
    json!({
        "apiVersion": CONNECTOR_API_VERSION,
        "kind": "Connector",
        "metadata": {
            "name": route.router_name,
            "labels": {
                "site-id": route.site_id.to_string(),
            },
        },
        "spec": {
            "hostname": route.hostname,
            "subnetRouter": {
                "advertiseRoutes": advertise_routes,
            },
        },
    })
}
