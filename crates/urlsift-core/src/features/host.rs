//! Features that depend on the tolerant parse (scheme and host).
//!
//! Every public function here re-parses its input on its own; [`ParsedFeatures`]
//! lets the assembler parse once and evaluate all of them.

use super::normalize::{parse_tolerant, ParsedUrl};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Known URL-shortener hostnames, compared after lowercasing and stripping `www.`.
static SHORTENER_DOMAINS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "bit.ly",
        "tinyurl.com",
        "goo.gl",
        "t.co",
        "ow.ly",
        "buff.ly",
        "adf.ly",
        "bit.do",
        "is.gd",
        "cutt.ly",
        "tiny.cc",
    ]
    .into_iter()
    .collect()
});

/// Whether `host` is a listed shortener (expects lowercased, `www.`-stripped input).
pub fn is_shortener_host(host: &str) -> bool {
    SHORTENER_DOMAINS.contains(host)
}

/// Parse result plus the lowercased host, shared across host features.
#[derive(Debug, Clone)]
pub struct ParsedFeatures<'a> {
    raw: &'a str,
    parsed: ParsedUrl,
    host: String,
}

impl<'a> ParsedFeatures<'a> {
    pub fn new(raw: &'a str) -> Self {
        let parsed = parse_tolerant(raw);
        let host = parsed.host_lower();
        Self { raw, parsed, host }
    }

    pub fn parsed(&self) -> &ParsedUrl {
        &self.parsed
    }

    fn host_without_www(&self) -> &str {
        self.host.strip_prefix("www.").unwrap_or(&self.host)
    }

    pub fn has_https_scheme(&self) -> u64 {
        u64::from(self.raw.starts_with("https://") || self.parsed.scheme == "https")
    }

    pub fn has_https_token_in_domain(&self) -> u64 {
        u64::from(self.host.contains("https"))
    }

    pub fn is_shortened(&self) -> u64 {
        u64::from(is_shortener_host(self.host_without_www()))
    }

    pub fn has_dash(&self) -> u64 {
        u64::from(self.host.contains('-'))
    }

    /// A trailing `:` with nothing after it is not a port.
    pub fn has_port(&self) -> u64 {
        u64::from(self.host.contains(':') && !self.host.ends_with(':'))
    }

    /// Labels beyond the last two, with no public-suffix awareness:
    /// `a.example.co.in` counts 2 even though `co.in` is one suffix.
    pub fn subdomain_count(&self) -> u64 {
        let host = self.host_without_www();
        if host.is_empty() {
            return 0;
        }
        let labels = host.split('.').count();
        labels.saturating_sub(2) as u64
    }
}

pub fn has_https_scheme(url: &str) -> u64 {
    ParsedFeatures::new(url).has_https_scheme()
}

pub fn has_https_token_in_domain(url: &str) -> u64 {
    ParsedFeatures::new(url).has_https_token_in_domain()
}

pub fn is_shortened(url: &str) -> u64 {
    ParsedFeatures::new(url).is_shortened()
}

pub fn has_dash(url: &str) -> u64 {
    ParsedFeatures::new(url).has_dash()
}

pub fn has_port(url: &str) -> u64 {
    ParsedFeatures::new(url).has_port()
}

pub fn subdomain_count(url: &str) -> u64 {
    ParsedFeatures::new(url).subdomain_count()
}
