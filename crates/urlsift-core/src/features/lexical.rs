//! Features computed on the raw input string, no parsing involved.

use regex::Regex;
use std::sync::LazyLock;

/// Dotted IPv4 at the start (after an optional http/https scheme), followed by `:`, `/`
/// or end of input. A single trailing newline still counts as the end.
static IP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:\d{1,3}\.){3}\d{1,3}(?:[:/]|\n?\z)")
        .expect("IP prefix pattern is valid")
});

/// Number of characters (Unicode scalar values) in the raw input.
pub fn url_length(url: &str) -> u64 {
    url.chars().count() as u64
}

pub fn num_dots(url: &str) -> u64 {
    url.matches('.').count() as u64
}

pub fn has_at(url: &str) -> u64 {
    u64::from(url.contains('@'))
}

/// 1 if the input starts with a literal dotted IPv4 host.
///
/// Only the leading authority is inspected; an IP later in the path does not count.
pub fn has_ip(url: &str) -> u64 {
    u64::from(IP_PREFIX.is_match(url))
}
