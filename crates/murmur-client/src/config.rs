use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5500/";
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(5000);
pub const DEFAULT_BANNER: Duration = Duration::from_millis(2500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TOKEN_PATH: &str = "murmur.token";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root. Always ends with `/` so resource paths join below it.
    pub server_url: Url,
    pub refresh: Duration,
    pub banner: Duration,
    pub request_timeout: Duration,
    pub token_path: PathBuf,
}

impl ClientConfig {
    pub fn new(server_url: Url) -> Self {
        Self {
            server_url,
            refresh: DEFAULT_REFRESH,
            banner: DEFAULT_BANNER,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }

    /// Read `MURMUR_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("MURMUR_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.into());
        let mut config = Self::new(server_url(&raw_url)?);

        if let Some(raw) = lookup("MURMUR_REFRESH_MS") {
            config.refresh = millis("MURMUR_REFRESH_MS", &raw)?;
        }
        if let Some(raw) = lookup("MURMUR_BANNER_MS") {
            config.banner = millis("MURMUR_BANNER_MS", &raw)?;
        }
        if let Some(raw) = lookup("MURMUR_REQUEST_TIMEOUT_MS") {
            config.request_timeout = millis("MURMUR_REQUEST_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("MURMUR_TOKEN_PATH") {
            config.token_path = PathBuf::from(raw);
        }

        Ok(config)
    }
}

/// Parse a server root, adding the trailing slash `Url::join` needs.
pub fn server_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| Error::Config {
        key: "MURMUR_SERVER_URL",
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::Config {
            key: "MURMUR_SERVER_URL",
            reason: format!("'{}' cannot be used as a base url", raw),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn millis(key: &'static str, raw: &str) -> Result<Duration> {
    let ms: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| Error::Config {
        key,
        reason: e.to_string(),
    })?;
    if ms == 0 {
        return Err(Error::Config {
            key,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_millis(ms))
}
