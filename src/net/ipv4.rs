//! IPv4 dotted-quad validation.

use lazy_static::lazy_static;
use regex::Regex;

// One octet: 0-255 without sign, exponent, or whitespace
const OCTET: &str = "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

lazy_static! {
    static ref DOTTED_QUAD: Regex = Regex::new(&format!(r"^{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}$"))
        .expect("dotted-quad pattern is valid");
}

/// Returns true iff `address` is a well-formed dotted-quad IPv4 address.
///
/// Matches exactly four dot-separated groups, each an integer in [0, 255].
/// No normalization or canonicalization is performed; `"01.2.3.4"` is
/// accepted as standard dotted-quad pattern semantics allow a single leading
/// zero, while `"256.1.1.1"` and `"1.2.3"` are rejected.
pub fn is_valid_ipv4(address: &str) -> bool {
    DOTTED_QUAD.is_match(address)
}
