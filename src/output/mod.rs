//! Output formatting for site routes.
//!
//! This module handles formatting and outputting route data:
//! - [`csv`] - CSV route table
//! - [`json`] - JSON report and router manifests
//! - [`terminal`] - Terminal helpers and colored summaries

mod csv;
mod json;
mod terminal;

pub use csv::{format_csv_row, route_rows, routes_print, RoutePrintRow, CSV_HEADER};
pub use json::{manifests_json, manifests_list, report_json, RouteReport};
pub use terminal::{format_field, format_site_summary, print_site_summary};
