//! Site file loading.

use crate::models::SiteFile;
use std::error::Error;
use std::path::Path;

/// Default site file, relative to the working directory.
pub const DEFAULT_SITES_FILE: &str = "sites.json";

/// Parse site file JSON, reporting the path of the offending field on failure.
pub fn parse_sites_json(json: &str) -> Result<SiteFile, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let site_file: SiteFile = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing site file: path={} error={}", e.path(), e.inner()))?;
    Ok(site_file)
}

/// Read and parse a site file.
///
/// # Arguments
/// * `sites_file` - Optional path to the site file. If None, uses [`DEFAULT_SITES_FILE`].
///
/// # Returns
/// * `Ok(SiteFile)` - The parsed sites, in file order
/// * `Err` - If the file is missing or does not parse
pub fn read_sites_file(sites_file: Option<&str>) -> Result<SiteFile, Box<dyn Error>> {
    let sites_file = sites_file.unwrap_or(DEFAULT_SITES_FILE);
    if !Path::new(sites_file).exists() {
        return Err(format!("Site file does not exist: {sites_file}").into());
    }

    log::info!("Reading site file: {sites_file}");
    let json = std::fs::read_to_string(sites_file)
        .map_err(|e| format!("Error reading site file {sites_file}: {e}"))?;
    let site_file = parse_sites_json(&json).map_err(|e| format!("{sites_file}: {e}"))?;
    log::info!("Parsed {} site(s) from {sites_file}", site_file.sites.len());

    Ok(site_file)
}
