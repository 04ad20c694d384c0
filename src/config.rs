use crate::errors::ClientError;
use reqwest::Url;
use std::env;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_PATH: &str = "/outputs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub url: Url,
    pub page_path: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let (base_url, url) = normalize_base_url(base_url)?;
        Ok(Self {
            base_url,
            url,
            page_path: DEFAULT_PAGE_PATH.to_string(),
        })
    }

    /// Reads `FETCHBIN_URL` and `FETCHBIN_PAGE`, falling back to defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env::var("FETCHBIN_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        if let Ok(path) = env::var("FETCHBIN_PAGE") {
            if !path.trim().is_empty() {
                config.page_path = path.trim().to_string();
            }
        }
        Ok(config)
    }
}

fn normalize_base_url(raw: &str) -> Result<(String, Url), ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|err| ClientError::invalid_base_url(raw, err))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::invalid_base_url(
            raw,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok((trimmed.to_string(), url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://fetchbin.example/ ").unwrap();
        assert_eq!(config.base_url, "https://fetchbin.example");
        assert_eq!(config.page_path, DEFAULT_PAGE_PATH);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ClientConfig::new("ftp://fetchbin.example").is_err());
        assert!(ClientConfig::new("not a url").is_err());
    }
}
