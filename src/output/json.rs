//! JSON output: route report and router manifests.

use crate::processing::{connector_manifest, HostBits, SiteRoute};
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;

/// Route report written by `routes --format json`.
#[derive(Serialize, Debug)]
pub struct RouteReport<'a> {
    /// UTC time the report was generated, RFC 3339.
    pub generated_at: String,
    pub host_bits: HostBits,
    pub sites: &'a [SiteRoute],
}

impl<'a> RouteReport<'a> {
    pub fn new(sites: &'a [SiteRoute], host_bits: HostBits) -> RouteReport<'a> {
        RouteReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            host_bits,
            sites,
        }
    }
}

pub fn report_json(report: &RouteReport) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Error serializing report: {e}").into())
}

/// All router manifests wrapped in a Kubernetes `List`.
pub fn manifests_list(routes: &[SiteRoute]) -> Value {
    let items: Vec<Value> = routes.iter().map(connector_manifest).collect();
    json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": items,
    })
}

pub fn manifests_json(routes: &[SiteRoute]) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(&manifests_list(routes))
        .map_err(|e| format!("Error serializing manifests: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::build_site_routes;
    use crate::sites::parse_sites_json;

    fn routes() -> Vec<SiteRoute> {
        let site_file = parse_sites_json(
            r#"{"sites": [{"name": "west", "site_id": 1, "region": "us-west-2",
                "cidrs": ["10.100.0.0/16"]}]}"#,
        )
        .unwrap();
        build_site_routes(&site_file, HostBits::Normalize).unwrap()
    }

    #[test]
    fn test_report_json() {
        let routes = routes();
        let json = report_json(&RouteReport::new(&routes, HostBits::Reject)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["host_bits"], "reject");
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
        assert_eq!(value["sites"][0]["site_id"], 1);
        assert_eq!(value["sites"][0]["cidrs"][0], "10.100.0.0/16");
        assert_eq!(
            value["sites"][0]["advertise_routes"][0],
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/112"
        );
    }

    #[test]
    fn test_manifests_list() {
        let list = manifests_list(&routes());
        assert_eq!(list["kind"], "List");
        assert_eq!(list["items"].as_array().unwrap().len(), 1);
        assert_eq!(list["items"][0]["spec"]["hostname"], "eks-service-router-us-west");
        assert!(manifests_json(&routes()).unwrap().contains("\"Connector\""));
    }
}
