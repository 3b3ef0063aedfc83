//! Tolerant URL split used by every host-dependent feature.
//!
//! Never fails: anything structurally broken collapses to [`ParsedUrl::default`]
//! (empty scheme, empty host, empty path).

use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Scheme prepended to inputs that do not already start with `http`.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Bracketed IPvFuture literal: lowercase `v`, hex version, `.`, then at least one char.
static IPV_FUTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\Av[a-fA-F0-9]+\..+\z").expect("IPvFuture pattern is valid")
});

/// Best-effort decomposition of a URL string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Lowercased scheme, or empty if none was recognised.
    pub scheme: String,
    /// Raw authority (`user@host:port`), case preserved.
    pub host: String,
    pub path: String,
}

impl ParsedUrl {
    /// Host lowercased for case-insensitive comparisons.
    pub fn host_lower(&self) -> String {
        self.host.to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty() && self.host.is_empty() && self.path.is_empty()
    }
}

/// Parse `url`, prepending `http://` when it does not start with `http`.
///
/// # Examples
///
/// - `parse_tolerant("bit.ly/abc")` → scheme `http`, host `bit.ly`, path `/abc`
/// - `parse_tolerant("http://[::1")` → empty (unbalanced bracket)
pub fn parse_tolerant(url: &str) -> ParsedUrl {
    let prefixed;
    let input = if url.starts_with("http") {
        url
    } else {
        prefixed = format!("{DEFAULT_SCHEME_PREFIX}{url}");
        prefixed.as_str()
    };

    match split(input) {
        Some(parsed) => parsed,
        None => {
            tracing::trace!(url, "tolerant parse degraded to empty");
            ParsedUrl::default()
        }
    }
}

/// Generic scheme / authority / path split. `None` means malformed authority.
fn split(input: &str) -> Option<ParsedUrl> {
    let cleaned: String = input
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (scheme, rest) = split_scheme(&cleaned);

    let (host, after_host) = match rest.strip_prefix("//") {
        Some(tail) => {
            let end = tail.find(['/', '?', '#']).unwrap_or(tail.len());
            (&tail[..end], &tail[end..])
        }
        None => ("", rest),
    };
    check_brackets(host)?;
    check_nfkc(host)?;

    let path_end = after_host.find(['?', '#']).unwrap_or(after_host.len());

    Some(ParsedUrl {
        scheme,
        host: host.to_string(),
        path: after_host[..path_end].to_string(),
    })
}

/// Split off a scheme if the text before the first `:` looks like one.
fn split_scheme(s: &str) -> (String, &str) {
    let Some(colon) = s.find(':') else {
        return (String::new(), s);
    };
    let candidate = &s[..colon];
    let mut chars = candidate.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid {
        (candidate.to_ascii_lowercase(), &s[colon + 1..])
    } else {
        (String::new(), s)
    }
}

/// Reject unbalanced brackets and bracketed hosts that are not IPv6 or IPvFuture literals.
///
/// Only the part after the last `@` is inspected. Nothing may precede the `[`,
/// and anything after the `]` must be a `:port`.
fn check_brackets(authority: &str) -> Option<()> {
    let open = authority.contains('[');
    let close = authority.contains(']');
    if open != close {
        return None;
    }
    if !open {
        return Some(());
    }

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, tail)| tail);
    let Some((before, bracketed)) = host_port.split_once('[') else {
        return Some(());
    };
    if !before.is_empty() {
        return None;
    }
    let (literal, port) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !port.is_empty() && !port.starts_with(':') {
        return None;
    }
    is_bracketed_literal(literal).then_some(())
}

fn is_bracketed_literal(literal: &str) -> bool {
    if literal.starts_with('v') {
        return IPV_FUTURE.is_match(literal);
    }
    // `fe80::1%eth0`: the zone must be non-empty and is not part of the address.
    let addr = match literal.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() && !zone.contains('%') => addr,
        Some(_) => return false,
        None => literal,
    };
    addr.parse::<Ipv6Addr>().is_ok()
}

/// Reject non-ASCII authorities whose NFKC form gains URL delimiters
/// (fullwidth `＠` folds to `@`, fullwidth `：` to `:`).
fn check_nfkc(authority: &str) -> Option<()> {
    if authority.is_ascii() {
        return Some(());
    }
    let stripped: String = authority
        .chars()
        .filter(|c| !matches!(c, '@' | ':' | '#' | '?'))
        .collect();
    let folded: String = stripped.nfkc().collect();
    if folded == stripped || !folded.contains(['/', '?', '#', '@', ':']) {
        Some(())
    } else {
        None
    }
}
