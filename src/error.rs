//! Error type for 4via6 derivation.
//!
//! Every failure is a caller mistake (bad site id, bad CIDR text), so all
//! variants share the single [`ErrorKind::InvalidArgument`] kind.

use thiserror::Error;

/// Broad classification of a [`Via6Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Via6Error {
    #[error("site id out of range: {0} (expected 0..=65535)")]
    SiteIdOutOfRange(i64),

    #[error("malformed CIDR {input:?}: {reason}")]
    MalformedCidr { input: String, reason: String },

    #[error("host bits set in {0}")]
    HostBitsSet(String),

    #[error("not a 4via6 prefix {input:?}: {reason}")]
    MalformedVia6 { input: String, reason: String },
}

impl Via6Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Via6Error::SiteIdOutOfRange(_)
            | Via6Error::MalformedCidr { .. }
            | Via6Error::HostBitsSet(_)
            | Via6Error::MalformedVia6 { .. } => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn malformed_cidr(input: &str, reason: impl Into<String>) -> Self {
        Via6Error::MalformedCidr {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_via6(input: &str, reason: impl Into<String>) -> Self {
        Via6Error::MalformedVia6 {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
