//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::processing::SiteRoute;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One summary line per site.
pub fn format_site_summary(route: &SiteRoute) -> String {
    let routes = route
        .advertise_routes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!(
        "SITE: {id:>5} '{name}' {host} - {routes}",
        id = route.site_id,
        name = route.name,
        host = route.hostname.blue(),
    )
}

/// Print a site summary to stdout.
pub fn print_site_summary(routes: &[SiteRoute]) {
    log::info!("SITES: found {} sites", routes.len());
    for route in routes {
        println!("{}", format_site_summary(route));
    }
}
