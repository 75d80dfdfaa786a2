//! Site data model.

use super::Ipv4;
use crate::error::Via6Error;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Operator-assigned site identifier, `0..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SiteId(u16);

impl SiteId {
    pub const MIN: SiteId = SiteId(0);
    pub const MAX: SiteId = SiteId(u16::MAX);

    pub fn new(id: u16) -> SiteId {
        SiteId(id)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for SiteId {
    type Error = Via6Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u16::try_from(id)
            .map(SiteId)
            .map_err(|_| Via6Error::SiteIdOutOfRange(id))
    }
}

impl<'de> Deserialize<'de> for SiteId {
    fn deserialize<D>(deserializer: D) -> Result<SiteId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        SiteId::try_from(id).map_err(de::Error::custom)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One deployment site as listed in a site file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Site {
    /// Unique site name.
    pub name: String,
    /// Site identifier placed in the 4via6 translator field.
    pub site_id: SiteId,
    /// Cloud region, e.g. `us-west-2`.
    #[serde(default)]
    pub region: Option<String>,
    /// Cluster platform used as the router hostname prefix, e.g. `eks`.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// IPv4 networks reachable through this site's router.
    pub cidrs: Vec<Ipv4>,
}

fn default_platform() -> String {
    "eks".to_string()
}

/// Top-level layout of a site file.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SiteFile {
    pub sites: Vec<Site>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_id_bounds() {
        assert_eq!(SiteId::try_from(0).unwrap(), SiteId::MIN);
        assert_eq!(SiteId::try_from(65535).unwrap(), SiteId::MAX);
        assert_eq!(
            SiteId::try_from(-1).unwrap_err(),
            Via6Error::SiteIdOutOfRange(-1)
        );
        assert_eq!(
            SiteId::try_from(65536).unwrap_err(),
            Via6Error::SiteIdOutOfRange(65536)
        );
    }

    #[test]
    fn test_site_deserialize_defaults() {
        let site: Site = serde_json::from_str(
            r#"{"name": "eks-west", "site_id": 1, "cidrs": ["10.100.0.0/16"]}"#,
        )
        .unwrap();
        assert_eq!(site.site_id.get(), 1);
        assert_eq!(site.platform, "eks");
        assert_eq!(site.region, None);
        assert_eq!(site.cidrs[0].to_string(), "10.100.0.0/16");
    }

    #[test]
    fn test_site_deserialize_rejects_out_of_range_id() {
        let err = serde_json::from_str::<Site>(
            r#"{"name": "x", "site_id": 70000, "cidrs": []}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("site id out of range"), "{err}");
    }
}
