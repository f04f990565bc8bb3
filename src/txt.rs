//! TXT answer text.

use std::net::IpAddr;

/// Identity string returned for `version.<root>`.
pub const VERSION: &str = concat!("wildcard-dns v", env!("CARGO_PKG_VERSION"));

/// Build the TXT answer for `name`.
///
/// Checked in order:
/// 1. `version.<root>` exactly: [`VERSION`]
/// 2. first label `whoami`: the address the datagram came from
/// 3. anything else: a "served by" banner
///
/// `name` and `root` are expected lowercased.
pub fn txt_answer(name: &str, root: &str, peer: IpAddr) -> String {
    let name = name.strip_suffix('.').unwrap_or(name);

    if name
        .strip_prefix("version.")
        .is_some_and(|rest| rest.eq_ignore_ascii_case(root))
    {
        return VERSION.to_string();
    }

    if name.starts_with("whoami.") {
        return format!("Your IP is {peer}");
    }

    format!("Served by {VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const ROOT: &str = "example.com";

    fn peer() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))
    }

    #[test]
    fn test_version() {
        assert_eq!(txt_answer("version.example.com", ROOT, peer()), VERSION);
        assert_eq!(txt_answer("version.example.com.", ROOT, peer()), VERSION);
    }

    #[test]
    fn test_version_is_exact_match() {
        assert_eq!(
            txt_answer("x.version.example.com", ROOT, peer()),
            format!("Served by {VERSION}")
        );
    }

    #[test]
    fn test_whoami_reports_peer() {
        assert_eq!(
            txt_answer("whoami.example.com", ROOT, peer()),
            "Your IP is 203.0.113.7"
        );
        assert_eq!(
            txt_answer("whoami.anything.example.com", ROOT, "2001:db8::5".parse().unwrap()),
            "Your IP is 2001:db8::5"
        );
    }

    #[test]
    fn test_whoami_must_be_whole_first_label() {
        let banner = format!("Served by {VERSION}");
        assert_eq!(txt_answer("whoami2.example.com", ROOT, peer()), banner);
        assert_eq!(txt_answer("x.whoami.example.com", ROOT, peer()), banner);
    }

    #[test]
    fn test_version_checked_before_whoami() {
        // "version.whoami.<root>" is neither an exact version name nor a
        // whoami name, "whoami.version.<root>" is a whoami name.
        assert_eq!(
            txt_answer("version.whoami.example.com", ROOT, peer()),
            format!("Served by {VERSION}")
        );
        assert_eq!(
            txt_answer("whoami.version.example.com", ROOT, peer()),
            "Your IP is 203.0.113.7"
        );
    }

    #[test]
    fn test_default_banner() {
        assert_eq!(
            txt_answer("1-2-3-4.example.com", ROOT, peer()),
            format!("Served by {VERSION}")
        );
    }
}
