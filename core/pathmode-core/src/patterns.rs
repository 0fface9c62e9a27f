//! Compiled regex patterns for host signals and path segments.
//!
//! Compiled once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Docker names containers after the first 12 hex digits of their ID.
pub static RE_CONTAINER_HOSTNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{12}$").unwrap());

/// A bare Windows drive segment such as `C:`.
pub static RE_DRIVE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]:$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_hostname_shape() {
        assert!(RE_CONTAINER_HOSTNAME.is_match("abc123def456"));
        assert!(RE_CONTAINER_HOSTNAME.is_match("0123456789ab"));
        assert!(!RE_CONTAINER_HOSTNAME.is_match("ABC123DEF456"));
        assert!(!RE_CONTAINER_HOSTNAME.is_match("abc123def45"));
        assert!(!RE_CONTAINER_HOSTNAME.is_match("abc123def4567"));
        assert!(!RE_CONTAINER_HOSTNAME.is_match("my-laptop-01"));
    }

    #[test]
    fn drive_token_shape() {
        assert!(RE_DRIVE_TOKEN.is_match("C:"));
        assert!(RE_DRIVE_TOKEN.is_match("z:"));
        assert!(!RE_DRIVE_TOKEN.is_match("C"));
        assert!(!RE_DRIVE_TOKEN.is_match("CD:"));
    }
}
