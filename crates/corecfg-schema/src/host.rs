//! Network host addresses
//!
//! Provides [`HostAddr`], the validated value of host-typed options such as
//! `trusted_host`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::num::ParseIntError;
use std::str::FromStr;

/// RFC 1123 hostname: dot-separated labels of letters, digits and inner hyphens
static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .unwrap_or_else(|e| unreachable!("hostname pattern is valid: {e}"))
});

const MAX_HOSTNAME_LEN: usize = 253;

/// Host with optional port
///
/// # Accepted forms
/// - `example.com`, `example.com:8080`
/// - `10.0.0.1`, `10.0.0.1:1999`
/// - `[::1]`, `[::1]:1999`, `::1`
///
/// IPv6 hosts are stored in canonical form; hostnames are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct HostAddr {
    host: String,
    port: Option<u16>,
}

impl HostAddr {
    /// Create from parts, validating both
    ///
    /// # Errors
    /// Returns error if `host` is not a hostname or IP address, or `port` is 0
    pub fn from_parts(host: &str, port: Option<u16>) -> Result<Self, HostError> {
        let host = canonical_host(host)?;
        if port == Some(0) {
            return Err(HostError::ZeroPort);
        }
        Ok(Self { host, port })
    }

    /// Host name or address
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port, if given
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Check if the host part is an IPv6 address
    #[inline]
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }
}

impl Display for HostAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.is_ipv6(), self.port) {
            (true, Some(port)) => write!(f, "[{}]:{port}", self.host),
            (true, None) => write!(f, "[{}]", self.host),
            (false, Some(port)) => write!(f, "{}:{port}", self.host),
            (false, None) => f.write_str(&self.host),
        }
    }
}

impl FromStr for HostAddr {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(HostError::Empty);
        }

        // Bracketed IPv6, optionally followed by a port
        if let Some(rest) = s.strip_prefix('[') {
            let (addr, tail) = rest
                .split_once(']')
                .ok_or_else(|| HostError::InvalidHost(s.to_string()))?;
            let ip: Ipv6Addr = addr
                .parse()
                .map_err(|_| HostError::InvalidHost(addr.to_string()))?;
            let port = match tail {
                "" => None,
                _ => {
                    let port = tail
                        .strip_prefix(':')
                        .ok_or_else(|| HostError::InvalidHost(s.to_string()))?;
                    Some(parse_port(port)?)
                }
            };
            return Self::from_parts(&ip.to_string(), port);
        }

        // Bare IPv6 cannot carry a port
        if let Ok(ip) = s.parse::<Ipv6Addr>() {
            return Self::from_parts(&ip.to_string(), None);
        }

        match s.rsplit_once(':') {
            Some((host, port)) => Self::from_parts(host, Some(parse_port(port)?)),
            None => Self::from_parts(s, None),
        }
    }
}

fn parse_port(port: &str) -> Result<u16, HostError> {
    port.parse().map_err(|source| HostError::InvalidPort {
        port: port.to_string(),
        source,
    })
}

fn canonical_host(host: &str) -> Result<String, HostError> {
    if host.is_empty() {
        return Err(HostError::Empty);
    }
    if let Ok(ip) = host.parse::<Ipv6Addr>() {
        return Ok(ip.to_string());
    }
    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(host.to_string());
    }
    // A numeric top label is a malformed IPv4 address, not a hostname
    let numeric_top = host
        .rsplit('.')
        .next()
        .is_some_and(|label| label.bytes().all(|b| b.is_ascii_digit()));
    if host.len() > MAX_HOSTNAME_LEN || numeric_top || !HOSTNAME.is_match(host) {
        return Err(HostError::InvalidHost(host.to_string()));
    }
    Ok(host.to_string())
}

/// Host parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Empty input
    #[error("empty host")]
    Empty,

    /// Not a hostname or IP address
    #[error("invalid host syntax: {0:?}")]
    InvalidHost(String),

    /// Port is not a 16-bit number
    #[error("invalid port {port:?}: {source}")]
    InvalidPort {
        /// Port as given
        port: String,
        /// Parse failure
        #[source]
        source: ParseIntError,
    },

    /// Port 0 is not addressable
    #[error("port must be non-zero")]
    ZeroPort,
}
