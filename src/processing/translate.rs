//! Site-to-4via6 address translation.

use crate::error::Via6Error;
use crate::models::{Ipv4, SiteId, Via6Prefix};
use serde::{Deserialize, Serialize};

/// What to do with an IPv4 CIDR whose address has host bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostBits {
    /// Clear them and use the network address.
    #[default]
    Normalize,
    /// Fail with [`Via6Error::HostBitsSet`].
    Reject,
}

/// Derive the 4via6 IPv6 CIDR for `ipv4_cidr` at `site_id`.
///
/// Host bits in `ipv4_cidr` are cleared before encoding.
///
/// # Examples
/// ```
/// use site_4via6_routes::derive_4via6;
/// assert_eq!(
///     derive_4via6(1, "10.100.0.0/16").unwrap(),
///     "fd7a:115c:a1e0:b1a:0:1:0a64:0000/112"
/// );
/// assert!(derive_4via6(65536, "10.100.0.0/16").is_err());
/// ```
pub fn derive_4via6(site_id: i64, ipv4_cidr: &str) -> Result<String, Via6Error> {
    derive_4via6_with(site_id, ipv4_cidr, HostBits::Normalize)
}

/// [`derive_4via6`] with an explicit host-bits policy.
pub fn derive_4via6_with(
    site_id: i64,
    ipv4_cidr: &str,
    host_bits: HostBits,
) -> Result<String, Via6Error> {
    let site = SiteId::try_from(site_id)?;
    let ipv4 = Ipv4::new(ipv4_cidr)?;
    Ok(via6_prefix(site, ipv4, host_bits)?.to_string())
}

/// Typed form of [`derive_4via6_with`] for already-parsed input.
pub fn via6_prefix(site: SiteId, ipv4: Ipv4, host_bits: HostBits) -> Result<Via6Prefix, Via6Error> {
    if host_bits == HostBits::Reject && !ipv4.is_network() {
        return Err(Via6Error::HostBitsSet(ipv4.to_string()));
    }
    if !ipv4.is_network() {
        log::debug!("via6_prefix() site={site} normalizing {ipv4} to {}", ipv4.network());
    }
    Ok(Via6Prefix::new(site, ipv4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::net::Ipv6Addr;

    #[test]
    fn test_known_values() {
        assert_eq!(
            derive_4via6(1, "10.100.0.0/16").unwrap(),
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/112"
        );
        assert_eq!(
            derive_4via6(0, "192.168.0.0/24").unwrap(),
            "fd7a:115c:a1e0:b1a:0:0:c0a8:0000/120"
        );
        assert_eq!(
            derive_4via6(12, "172.16.3.0/24").unwrap(),
            "fd7a:115c:a1e0:b1a:0:12:ac10:0300/120"
        );
    }

    #[test]
    fn test_site_id_boundaries() {
        assert!(derive_4via6(0, "10.0.0.0/8").is_ok());
        assert_eq!(
            derive_4via6(65535, "10.0.0.0/8").unwrap(),
            "fd7a:115c:a1e0:b1a:0:65535:0a00:0000/104"
        );
        for site in [-1, 65536, i64::MIN, i64::MAX] {
            let err = derive_4via6(site, "10.0.0.0/8").unwrap_err();
            assert_eq!(err, Via6Error::SiteIdOutOfRange(site));
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_site_checked_before_cidr() {
        assert_eq!(
            derive_4via6(-1, "not-a-cidr").unwrap_err(),
            Via6Error::SiteIdOutOfRange(-1)
        );
    }

    #[test]
    fn test_prefix_boundaries() {
        assert_eq!(
            derive_4via6(3, "0.0.0.0/0").unwrap(),
            "fd7a:115c:a1e0:b1a:0:3:0000:0000/96"
        );
        assert_eq!(
            derive_4via6(3, "10.1.2.3/32").unwrap(),
            "fd7a:115c:a1e0:b1a:0:3:0a01:0203/128"
        );
    }

    #[test]
    fn test_malformed_cidr() {
        for bad in ["not-a-cidr", "10.0.0.0/33", "300.0.0.0/8", "10.0.0.a/8", ""] {
            let err = derive_4via6(1, bad).expect_err(bad);
            assert!(matches!(err, Via6Error::MalformedCidr { .. }), "{bad}: {err}");
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_surrounding_whitespace_rejected() {
        for bad in [" 10.0.0.0/8", "10.0.0.0/8 ", "\t10.0.0.0/8"] {
            let err = derive_4via6(1, bad).expect_err(bad);
            assert!(matches!(err, Via6Error::MalformedCidr { .. }), "{bad:?}: {err}");
        }
    }

    #[test]
    fn test_host_bits_policy() {
        assert_eq!(
            derive_4via6(1, "10.100.7.9/16").unwrap(),
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/112"
        );
        assert_eq!(
            derive_4via6_with(1, "10.100.7.9/16", HostBits::Reject).unwrap_err(),
            Via6Error::HostBitsSet("10.100.7.9/16".to_string())
        );
        assert!(derive_4via6_with(1, "10.100.0.0/16", HostBits::Reject).is_ok());
    }

    #[test]
    fn test_deterministic() {
        let a = derive_4via6(77, "10.20.30.0/24").unwrap();
        let b = derive_4via6(77, "10.20.30.0/24").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_parses_as_ipv6_cidr() {
        for site in [0, 1, 9, 10, 99, 512, 9999] {
            for len in [0u8, 1, 8, 16, 23, 31, 32] {
                let cidr = format!("10.100.200.255/{len}");
                let out = derive_4via6(site, &cidr).unwrap();
                let (addr, prefix) = out.split_once('/').unwrap();
                assert!(addr.parse::<Ipv6Addr>().is_ok(), "{out}");
                assert_eq!(prefix.parse::<u8>().unwrap(), len + 96, "{out}");
            }
        }
    }

    #[test]
    fn test_large_site_ids_keep_decimal_field() {
        for site in [10000, 54321, 65535] {
            let out = derive_4via6(site, "10.0.0.0/8").unwrap();
            let fields: Vec<&str> = out.split('/').next().unwrap().split(':').collect();
            assert_eq!(fields.len(), 8);
            assert_eq!(fields[5], site.to_string());
            assert!(out.ends_with("/104"));
        }
    }
}
