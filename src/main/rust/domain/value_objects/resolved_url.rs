use std::fmt;

/// Final fetchable address after proxy substitution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedUrl {
    url: String,
    proxied: bool,
}

impl ResolvedUrl {
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            proxied: false,
        }
    }

    pub fn proxied(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            proxied: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// True when the URL points at the RTSP-to-HLS bridge
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
