use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;
use thiserror::Error;

// Dotted quad, each octet 0-255. Not anchored: the first match anywhere wins.
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)")
        .expect("IPv4 pattern is valid")
});

// `"<method> <path> <protocol>" <status>`. Quotes inside the request are
// logged as `\"` and do not end the clause.
static REQUEST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)" ([0-9]+)"#).expect("request pattern is valid")
});

/// The two fields the pipeline needs from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub ip: Ipv4Addr,
    /// The address exactly as written in the line.
    pub ip_text: &'a str,
    /// Everything between the quotes, method and protocol included.
    pub request: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line skipped: {0}")]
    NoMatch(NoMatchReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    NoAddress,
    SentinelAddress,
    NoRequest,
}

impl std::fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            NoMatchReason::NoAddress => "no IPv4 address",
            NoMatchReason::SentinelAddress => "sentinel address",
            NoMatchReason::NoRequest => "no quoted request followed by a status",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineParser {
    sentinel: Option<Ipv4Addr>,
}

impl LineParser {
    pub fn new(sentinel: Option<Ipv4Addr>) -> Self {
        Self { sentinel }
    }

    /// Pull the first IPv4 address and the first quoted request clause out
    /// of `line`.
    ///
    /// Only the first address is considered: if it is the sentinel the line
    /// is skipped even when a later address would qualify.
    pub fn extract<'a>(&self, line: &'a str) -> Result<ParsedLine<'a>, ParseError> {
        let ip_text = IPV4_PATTERN
            .find(line)
            .map(|m| m.as_str())
            .ok_or(ParseError::NoMatch(NoMatchReason::NoAddress))?;

        let ip = to_ipv4(ip_text).ok_or(ParseError::NoMatch(NoMatchReason::NoAddress))?;

        if self.sentinel == Some(ip) {
            return Err(ParseError::NoMatch(NoMatchReason::SentinelAddress));
        }

        let request = REQUEST_PATTERN
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or(ParseError::NoMatch(NoMatchReason::NoRequest))?;

        Ok(ParsedLine {
            ip,
            ip_text,
            request,
        })
    }
}

// Octets may carry leading zeros ("010"), which `Ipv4Addr::from_str` rejects.
fn to_ipv4(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = text.split('.');

    for octet in &mut octets {
        *octet = parts.next()?.parse().ok()?;
    }

    Some(Ipv4Addr::from(octets))
}
