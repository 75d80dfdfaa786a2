//! CSV output formatting for site routes.

use crate::processing::SiteRoute;
use colored::Colorize;

use super::terminal::format_field;

/// CSV header matching [`format_csv_row`].
pub const CSV_HEADER: &str = r#" "cnt", "site_id",      "site_name",                      "hostname",        "ipv4_cidr",     "broadcast",                             "via6_prefix""#;

/// One row per (site, CIDR) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePrintRow {
    pub j: usize,
    pub site_id: String,
    pub site_name: String,
    pub hostname: String,
    pub ipv4_cidr: String,
    pub broadcast: String,
    pub via6_prefix: String,
}

/// Flatten site routes into print rows.
pub fn route_rows(routes: &[SiteRoute]) -> Vec<RoutePrintRow> {
    routes
        .iter()
        .flat_map(|r| {
            r.cidrs
                .iter()
                .zip(r.advertise_routes.iter())
                .map(move |(cidr, prefix)| (r, cidr, prefix))
        })
        .enumerate()
        .map(|(i, (r, cidr, prefix))| RoutePrintRow {
            j: i + 1,
            site_id: r.site_id.to_string(),
            site_name: r.name.clone(),
            hostname: r.hostname.clone(),
            ipv4_cidr: prefix.network.to_string(),
            broadcast: cidr.hi().to_string(),
            via6_prefix: prefix.to_string(),
        })
        .collect()
}

/// Format a single CSV row.
pub fn format_csv_row(row: &RoutePrintRow) -> String {
    format!(
        r#"{j},{site_id},{site_name},{hostname},{ipv4_cidr},{broadcast},{via6_prefix}"#,
        j = format_field(row.j, 6),
        site_id = format_field(&row.site_id, 10),
        site_name = format_field(&row.site_name, 16),
        hostname = format_field(&row.hostname, 32),
        ipv4_cidr = format_field(&row.ipv4_cidr, 20),
        broadcast = format_field(format!("{}_br", row.broadcast), 20),
        via6_prefix = format_field(&row.via6_prefix, 42),
    )
}

/// Print site routes as CSV to stdout.
pub fn routes_print(routes: &[SiteRoute]) {
    let rows = route_rows(routes);
    log::info!(
        "#Start routes_print() sites={} rows={}",
        routes.len(),
        rows.len()
    );

    println!("{CSV_HEADER}");
    for row in rows.iter() {
        println!("{}", format_csv_row(row));
    }

    println!(
        "#{}# {} site(s), {} route(s)",
        "NOTE".on_blue(),
        routes.len(),
        rows.len()
    );
}
