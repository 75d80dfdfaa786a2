//! 4via6 prefix model.
//!
//! A 4via6 prefix carries an IPv4 network and a site id inside an IPv6
//! prefix, so overlapping IPv4 ranges at different sites stay routable over
//! the IPv6 overlay:
//!
//! ```text
//! fd7a:115c:a1e0:b1a : 0 : <site, decimal> : <ipv4 hi16> : <ipv4 lo16> / <len + 96>
//! ```

use super::{Ipv4, SiteId};
use crate::error::Via6Error;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Fixed 64-bit prefix for 4via6-routed packets.
pub const VIA6_PREFIX: &str = "fd7a:115c:a1e0:b1a";

/// Bits in front of the embedded IPv4 address.
pub const VIA6_PREFIX_LEN_OFFSET: u8 = 96;

/// A site id plus the IPv4 network it translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Via6Prefix {
    pub site: SiteId,
    /// Always the network address; host bits are cleared by [`Via6Prefix::new`].
    pub network: Ipv4,
}

impl Via6Prefix {
    pub fn new(site: SiteId, ipv4: Ipv4) -> Via6Prefix {
        Via6Prefix {
            site,
            network: ipv4.network(),
        }
    }

    /// IPv6 prefix length, always in `96..=128`.
    pub fn prefix_len(&self) -> u8 {
        self.network.mask + VIA6_PREFIX_LEN_OFFSET
    }

    /// Address part of the rendered prefix, without the length.
    fn address_text(&self) -> String {
        let [b0, b1, b2, b3] = self.network.addr.octets();
        format!(
            "{VIA6_PREFIX}:0:{site}:{b0:02x}{b1:02x}:{b2:02x}{b3:02x}",
            site = self.site
        )
    }

    /// Parse the rendered address text as an IPv6 address.
    ///
    /// The site field is written in decimal, so ids of 10000 and above do not
    /// fit a hextet and are reported as an error.
    pub fn ipv6_addr(&self) -> Result<Ipv6Addr, Via6Error> {
        let text = self.address_text();
        Ipv6Addr::from_str(&text)
            .map_err(|_| Via6Error::malformed_via6(&text, "site field is not a valid hextet"))
    }

    /// Parse a prefix in the rendered form back into site and network.
    pub fn parse(input: &str) -> Result<Via6Prefix, Via6Error> {
        let (addr, len) = input
            .split_once('/')
            .ok_or_else(|| Via6Error::malformed_via6(input, "missing prefix length"))?;

        let len: u8 = if !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()) {
            len.parse()
                .map_err(|_| Via6Error::malformed_via6(input, "prefix length out of range"))?
        } else {
            return Err(Via6Error::malformed_via6(input, "invalid prefix length"));
        };
        if !(VIA6_PREFIX_LEN_OFFSET..=128).contains(&len) {
            return Err(Via6Error::malformed_via6(
                input,
                format!("prefix length {len} outside 96-128"),
            ));
        }

        let fields: Vec<&str> = addr.split(':').collect();
        if fields.len() != 8 {
            return Err(Via6Error::malformed_via6(input, "expected 8 fields"));
        }

        let fixed = VIA6_PREFIX.split(':');
        if !fields[..4]
            .iter()
            .zip(fixed)
            .all(|(got, want)| got.eq_ignore_ascii_case(want))
        {
            return Err(Via6Error::malformed_via6(input, "wrong fixed prefix"));
        }

        if parse_hextet(fields[4]) != Some(0) {
            return Err(Via6Error::malformed_via6(
                input,
                "upper translator field must be 0",
            ));
        }

        let site_text = fields[5];
        if site_text.is_empty()
            || site_text.len() > 5
            || !site_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Via6Error::malformed_via6(input, "site field is not decimal"));
        }
        // Rendering never pads the site field.
        if site_text.len() > 1 && site_text.starts_with('0') {
            return Err(Via6Error::malformed_via6(
                input,
                "site field has a leading zero",
            ));
        }
        let site_id: i64 = site_text
            .parse()
            .map_err(|_| Via6Error::malformed_via6(input, "site field is not decimal"))?;
        let site = SiteId::try_from(site_id)?;

        let (hi, lo) = match (parse_hextet(fields[6]), parse_hextet(fields[7])) {
            (Some(hi), Some(lo)) => (hi, lo),
            _ => return Err(Via6Error::malformed_via6(input, "invalid IPv4 hextets")),
        };
        let network = Ipv4 {
            addr: Ipv4Addr::from(((hi as u32) << 16) | lo as u32),
            mask: len - VIA6_PREFIX_LEN_OFFSET,
        };
        if !network.is_network() {
            return Err(Via6Error::HostBitsSet(network.to_string()));
        }

        Ok(Via6Prefix { site, network })
    }
}

fn parse_hextet(field: &str) -> Option<u16> {
    if field.is_empty() || field.len() > 4 || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(field, 16).ok()
}

impl fmt::Display for Via6Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address_text(), self.prefix_len())
    }
}

impl FromStr for Via6Prefix {
    type Err = Via6Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Via6Prefix::parse(s)
    }
}

impl Serialize for Via6Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Via6Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Via6Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Via6Prefix::parse(s.trim()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn prefix(site: u16, cidr: &str) -> Via6Prefix {
        Via6Prefix::new(SiteId::new(site), Ipv4::new(cidr).unwrap())
    }

    #[test]
    fn test_display() {
        assert_eq!(
            prefix(1, "10.100.0.0/16").to_string(),
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/112"
        );
        assert_eq!(
            prefix(65535, "255.255.255.255/32").to_string(),
            "fd7a:115c:a1e0:b1a:0:65535:ffff:ffff/128"
        );
    }

    #[test]
    fn test_new_clears_host_bits() {
        let p = prefix(7, "10.100.1.7/16");
        assert_eq!(p.network.to_string(), "10.100.0.0/16");
        assert_eq!(p.to_string(), "fd7a:115c:a1e0:b1a:0:7:0a64:0000/112");
    }

    #[test]
    fn test_ipv6_addr() {
        let addr = prefix(1, "10.100.0.0/16").ipv6_addr().unwrap();
        assert_eq!(
            addr.segments(),
            [0xfd7a, 0x115c, 0xa1e0, 0x0b1a, 0, 1, 0x0a64, 0]
        );
        // Decimal text "42" lands in the hextet as 0x42.
        assert_eq!(prefix(42, "10.0.0.0/8").ipv6_addr().unwrap().segments()[5], 0x42);
        assert!(prefix(9999, "10.0.0.0/8").ipv6_addr().is_ok());

        let err = prefix(10000, "10.0.0.0/8").ipv6_addr().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_parse_inverse() {
        for (site, cidr) in [
            (0, "0.0.0.0/0"),
            (1, "10.100.0.0/16"),
            (42, "192.168.0.0/24"),
            (65535, "172.16.5.4/32"),
        ] {
            let p = prefix(site, cidr);
            assert_eq!(Via6Prefix::parse(&p.to_string()).unwrap(), p);
        }
        let p: Via6Prefix = "FD7A:115C:A1E0:B1A:0:3:0A64:0000/112".parse().unwrap();
        assert_eq!(p.site.get(), 3);
        assert_eq!(p.network.to_string(), "10.100.0.0/16");
    }

    #[test]
    fn test_parse_rejects() {
        for bad in [
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000",
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/95",
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/129",
            "fd7a:115c:a1e0:b1a:0:1:0a64:0000/+112",
            "fd7a:115c:a1e0:b1b:0:1:0a64:0000/112",
            "fd7a:115c:a1e0:b1a::1:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:1:1:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:0:ff:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:0:65536:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:0:1:0a64:zz00/112",
            "fd7a:115c:a1e0:b1a:0:1:0a64:0001/112",
            " fd7a:115c:a1e0:b1a:0:1:0a64:0000/112",
        ] {
            let err = Via6Prefix::parse(bad).expect_err(bad);
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{bad}");
        }
    }

    #[test]
    fn test_parse_rejects_zero_padded_site() {
        for bad in [
            "fd7a:115c:a1e0:b1a:0:01:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:0:00:0a64:0000/112",
            "fd7a:115c:a1e0:b1a:0:00042:0a64:0000/112",
        ] {
            let err = Via6Prefix::parse(bad).expect_err(bad);
            assert!(err.to_string().contains("leading zero"), "{err}");
        }
        assert_eq!(
            Via6Prefix::parse("fd7a:115c:a1e0:b1a:0:0:0a64:0000/112").unwrap().site,
            SiteId::MIN
        );
    }

    #[test]
    fn test_serde_string_form() {
        let p = prefix(0, "192.168.0.0/24");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"fd7a:115c:a1e0:b1a:0:0:c0a8:0000/120\"");
        assert_eq!(serde_json::from_str::<Via6Prefix>(&json).unwrap(), p);
    }
}
