//! Decoding of IP addresses embedded in query names.
//!
//! Three grammars are recognised for names under the root domain:
//!
//! ```text
//! dash-style IPv4   why-are-you-192-168-0-1-reading.<root>   → 192.168.0.1
//! dot-style IPv4    10.0.0.1.whatever.<root>                  → 10.0.0.1
//! first-label IPv6  2001-db8--1.anything.<root>              → 2001:db8::1
//! ```
//!
//! Every scanner works on the *subject*, the part of the name left of the
//! root domain, and reports the byte span it matched alongside the address.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::Range;

/// An address found inside a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<A> {
    /// The decoded address.
    pub addr: A,
    /// Byte range of the encoded address within the subject.
    pub span: Range<usize>,
}

/// Return the part of `name` under `root`, or `None` if `name` is not a
/// strict subdomain of `root`.
///
/// A single trailing dot on `name` is ignored and the suffix comparison is
/// ASCII case-insensitive. `root` is expected without a trailing dot.
pub fn subject<'a>(name: &'a str, root: &str) -> Option<&'a str> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if root.is_empty() || name.len() <= root.len() {
        return None;
    }

    let split = name.len() - root.len();
    let (head, tail) = (name.get(..split)?, name.get(split..)?);
    if !tail.eq_ignore_ascii_case(root) {
        return None;
    }

    let head = head.strip_suffix('.')?;
    Some(head.strip_suffix('.').unwrap_or(head))
}

/// Decode an IPv4 address from `name`, trying the dash style before the
/// dot style.
pub fn decode_ipv4(name: &str, root: &str) -> Option<Ipv4Addr> {
    let subject = subject(name, root)?;
    scan_dashed(subject)
        .or_else(|| scan_dotted(subject))
        .map(|m| m.addr)
}

/// Decode an IPv6 address from the first label of `name`'s subject.
pub fn decode_ipv6(name: &str, root: &str) -> Option<Ipv6Addr> {
    subject(name, root)
        .and_then(scan_ipv6_label)
        .map(|m| m.addr)
}

fn is_separator(b: u8) -> bool {
    b == b'.' || b == b'-'
}

/// Find the leftmost run of four dash-separated digit groups.
///
/// The run must start at the beginning of the subject or right after a `.`
/// or `-`, and end at the end of the subject or right before one. Only the
/// first such run counts: if one of its groups exceeds 255 there is no
/// dash-style match at all.
pub fn scan_dashed(subject: &str) -> Option<Match<Ipv4Addr>> {
    let bytes = subject.as_bytes();
    let (start, groups, end) = (0..bytes.len())
        .filter(|&pos| pos == 0 || is_separator(bytes[pos - 1]))
        .find_map(|pos| dashed_run(bytes, pos).map(|(groups, end)| (pos, groups, end)))?;

    let [a, b, c, d] = groups.map(|g| u8::try_from(g).ok());
    Some(Match {
        addr: Ipv4Addr::new(a?, b?, c?, d?),
        span: start..end,
    })
}

/// Parse `d{1,3}-d{1,3}-d{1,3}-d{1,3}` at `start`, returning the group values
/// and the end offset. Digit groups are maximal, so a fourth digit in a row
/// rejects the run.
fn dashed_run(bytes: &[u8], start: usize) -> Option<([u16; 4], usize)> {
    let mut groups = [0u16; 4];
    let mut pos = start;

    for (i, group) in groups.iter_mut().enumerate() {
        let len = bytes[pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if !(1..=3).contains(&len) {
            return None;
        }
        *group = bytes[pos..pos + len]
            .iter()
            .fold(0, |acc, b| acc * 10 + u16::from(b - b'0'));
        pos += len;

        let next = bytes.get(pos).copied();
        if i < 3 {
            if next != Some(b'-') {
                return None;
            }
            pos += 1;
        } else if next.is_some_and(|b| !is_separator(b)) {
            return None;
        }
    }

    Some((groups, pos))
}

/// A whole label holding a decimal octet: 1 to 3 digits, at most 255.
fn parse_octet(label: &str) -> Option<u8> {
    if label.is_empty() || label.len() > 3 || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}

/// Find the first window of four consecutive labels that are each an octet.
pub fn scan_dotted(subject: &str) -> Option<Match<Ipv4Addr>> {
    let mut labels = Vec::new();
    let mut offset = 0;
    for label in subject.split('.') {
        labels.push((offset, label));
        offset += label.len() + 1;
    }

    labels.windows(4).find_map(|window| {
        let [a, b, c, d] = [window[0], window[1], window[2], window[3]].map(|(_, l)| parse_octet(l));
        let (first, _) = window[0];
        let (last, label) = window[3];
        Some(Match {
            addr: Ipv4Addr::new(a?, b?, c?, d?),
            span: first..last + label.len(),
        })
    })
}

/// Decode the first label of the subject as an IPv6 address, with `--`
/// standing for `::` and `-` for `:`.
pub fn scan_ipv6_label(subject: &str) -> Option<Match<Ipv6Addr>> {
    let label = subject.split('.').next()?;
    let candidate = label.replace("--", "::").replace('-', ":");
    let addr = candidate.parse().ok()?;
    Some(Match {
        addr,
        span: 0..label.len(),
    })
}
