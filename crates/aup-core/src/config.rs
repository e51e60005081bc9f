//! Configuration types for aup.
//!
//! [`Config::from_env`] layers the process environment over the built-in
//! defaults in [`DEFAULT_CONFIG`]. [`Config::from_vars`] does the same from an
//! explicit variable list so tests never touch the real environment.
//!
//! Several settings accept more than one variable name; the first alias that
//! is present and non-empty wins.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_CONFIG: &str = r#"
output_file          = "output.json"
request_timeout      = "10s"
notice_validity      = "3h"
feed_format          = "auto"
horizon_days         = 1
accept_invalid_certs = false
user_agent           = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFormat {
    Json,
    Xml,
    /// Decide from the content type, then from the body itself.
    #[default]
    Auto,
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "auto" | "" => Ok(Self::Auto),
            other => Err(format!("expected json, xml or auto, got {other:?}")),
        }
    }
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedFormat::Json => write!(f, "json"),
            FeedFormat::Xml => write!(f, "xml"),
            FeedFormat::Auto => write!(f, "auto"),
        }
    }
}

/// Top-level run configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub notice: NoticeConfig,
}

/// Where and how to fetch the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub url: String,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub token: Option<String>,
    pub timeout: Duration,
    pub format: FeedFormat,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

/// Where the document goes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Print the rendered document after writing it.
    pub echo: bool,
}

/// Shape of the notice itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeConfig {
    pub validity: Duration,
    /// Days after today included in the reference window.
    pub horizon_days: u32,
    pub zone_filter: Option<String>,
}

/// Flat view of the recognised variables, lowercased by the `config` crate.
#[derive(Debug, Deserialize)]
struct RawSettings {
    api_url_sppi_ivp_rf: Option<String>,
    data_url: Option<String>,
    proxy_url: Option<String>,
    http_proxy: Option<String>,
    proxy_https_url: Option<String>,
    https_proxy: Option<String>,
    api_token: Option<String>,
    zone_filter: Option<String>,
    output_file: PathBuf,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    #[serde(with = "humantime_serde")]
    notice_validity: Duration,
    feed_format: String,
    horizon_days: u32,
    accept_invalid_certs: bool,
    user_agent: String,
}

impl Config {
    /// Load from the process environment layered over [`DEFAULT_CONFIG`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Load from an explicit set of `(NAME, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let raw: RawSettings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()?;

        raw.resolve()
    }
}

impl RawSettings {
    fn resolve(self) -> Result<Config, ConfigError> {
        let url = first_set([self.api_url_sppi_ivp_rf, self.data_url]).ok_or(ConfigError::MissingUrl)?;
        let format = self
            .feed_format
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                key: "FEED_FORMAT",
                value: self.feed_format.clone(),
                reason,
            })?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT",
                value: "0s".to_string(),
                reason: "timeout must be positive".to_string(),
            });
        }

        Ok(Config {
            source: SourceConfig {
                url,
                http_proxy: first_set([self.proxy_url, self.http_proxy]),
                https_proxy: first_set([self.proxy_https_url, self.https_proxy]),
                token: first_set([self.api_token]),
                timeout: self.request_timeout,
                format,
                accept_invalid_certs: self.accept_invalid_certs,
                user_agent: self.user_agent,
            },
            output: OutputConfig {
                path: self.output_file,
                echo: true,
            },
            notice: NoticeConfig {
                validity: self.notice_validity,
                horizon_days: self.horizon_days,
                zone_filter: first_set([self.zone_filter]),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn first_set<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
