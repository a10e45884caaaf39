use crate::domain::errors::{DomainError, Result};

/// Base URL of the RTSP-to-HLS bridge (go2rtc style API)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyConfig {
    base_url: String,
}

impl ProxyConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(DomainError::InvalidProxyUrl(base_url));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(DomainError::InvalidProxyUrl(base_url));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Parse an optional stored value, treating blank strings as "no proxy"
    pub fn from_optional(value: Option<&str>) -> Result<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Self::new(url).map(Some),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_slashes() {
        let proxy = ProxyConfig::new("http://192.168.1.100:1984//").unwrap();
        assert_eq!(proxy.base_url(), "http://192.168.1.100:1984");
    }

    #[test]
    fn test_rejects_empty_and_non_http() {
        assert!(ProxyConfig::new("").is_err());
        assert!(ProxyConfig::new("rtsp://proxy:1984").is_err());
    }

    #[test]
    fn test_blank_optional_means_no_proxy() {
        assert_eq!(ProxyConfig::from_optional(None).unwrap(), None);
        assert_eq!(ProxyConfig::from_optional(Some("  ")).unwrap(), None);
        assert!(ProxyConfig::from_optional(Some("http://p:1984"))
            .unwrap()
            .is_some());
    }
}
