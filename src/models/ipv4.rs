//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] for an IPv4 network written in CIDR notation, plus the
//! mask arithmetic used to find a network's base and broadcast addresses.

use crate::error::Via6Error;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use site_4via6_routes::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Via6Error> {
    if len > MAX_LENGTH {
        Err(Via6Error::malformed_cidr(
            &format!("/{len}"),
            "network length is too long",
        ))
    } else {
        Ok(mask_bits(len))
    }
}

fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Prefix length of a contiguous mask, or `None` when the ones are not contiguous.
fn prefix_from_mask(mask: u32) -> Option<u8> {
    let len = mask.leading_ones() as u8;
    (mask_bits(len) == mask).then_some(len)
}

/// IPv4 network in CIDR notation.
///
/// `addr` is kept exactly as written; use [`Ipv4::lo`] for the network
/// (base) address.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from CIDR text.
    ///
    /// Accepted forms: `10.0.0.0/24`, a bare address (treated as `/32`),
    /// `10.0.0.0/255.255.255.0` (netmask) and `10.0.0.0/0.0.0.255` (hostmask).
    /// Surrounding whitespace is not accepted.
    pub fn new(input: &str) -> Result<Ipv4, Via6Error> {
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() > 2 {
            return Err(Via6Error::malformed_cidr(input, "only one '/' permitted"));
        }

        let addr = Ipv4Addr::from_str(parts[0])
            .map_err(|_| Via6Error::malformed_cidr(input, format!("invalid address {:?}", parts[0])))?;

        let mask = match parts.get(1) {
            None => MAX_LENGTH,
            Some(mask) => parse_mask(input, mask)?,
        };

        Ok(Ipv4 { addr, mask })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !mask_bits(self.mask))
    }

    /// The same network with host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// True when `addr` is already the network address.
    pub fn is_network(&self) -> bool {
        self.addr == self.lo()
    }
}

fn parse_mask(input: &str, mask: &str) -> Result<u8, Via6Error> {
    if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        return match mask.parse::<u32>() {
            Ok(len) if len <= MAX_LENGTH as u32 => Ok(len as u8),
            _ => Err(Via6Error::malformed_cidr(
                input,
                format!("prefix length {mask} out of range 0-32"),
            )),
        };
    }

    let bits = Ipv4Addr::from_str(mask)
        .map(u32::from)
        .map_err(|_| Via6Error::malformed_cidr(input, format!("invalid mask {mask:?}")))?;

    // Netmask wins over hostmask, so "0.0.0.0" and "255.255.255.255" read as /0 and /32.
    prefix_from_mask(bits)
        .or_else(|| prefix_from_mask(!bits))
        .ok_or_else(|| Via6Error::malformed_cidr(input, format!("non-contiguous mask {mask}")))
}

impl FromStr for Ipv4 {
    type Err = Via6Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(s.trim()).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
