//! Site routing logic.
//!
//! This module contains the business logic:
//! - [`translate`] - Site id + IPv4 CIDR to 4via6 prefix
//! - [`validate`] - Site file checks and CIDR de-duplication
//! - [`routes`] - Per-site router configuration

mod routes;
mod translate;
mod validate;

// Re-export public functions
pub use routes::{
    build_site_route, build_site_routes, check_for_duplicate_routers, connector_manifest,
    region_short_name, router_hostname, SiteRoute, CONNECTOR_API_VERSION,
};
pub use translate::{derive_4via6, derive_4via6_with, via6_prefix, HostBits};
pub use validate::{check_for_duplicate_sites, de_duplicate_cidrs};
