//! Fetcher — a single GET against the configured endpoint.

use aup_core::config::SourceConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::FetchError;

/// Raw response body plus the declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub body: String,
    pub content_type: Option<String>,
}

/// HTTP client bound to one endpoint.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(source: &SourceConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::ClientBuilder::new()
            .timeout(source.timeout)
            .gzip(true)
            .user_agent(source.user_agent.as_str())
            .danger_accept_invalid_certs(source.accept_invalid_certs);

        // Proxies come from our own config; never pick up system ones.
        builder = builder.no_proxy();
        if let Some(url) = &source.http_proxy {
            builder = builder.proxy(proxy(|u| reqwest::Proxy::http(u), url)?);
        }
        if let Some(url) = &source.https_proxy {
            builder = builder.proxy(proxy(|u| reqwest::Proxy::https(u), url)?);
        }
        if source.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            client: builder.build().map_err(FetchError::Client)?,
            url: source.url.clone(),
            token: source.token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<FeedResponse, FetchError> {
        let request_err = |source| FetchError::Request {
            url: self.url.clone(),
            source,
        };

        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        tracing::info!(url = %self.url, "fetching feed");
        let response = request.send().await.map_err(request_err)?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(request_err)?;
        tracing::debug!(%status, bytes = body.len(), content_type = ?content_type, "feed received");

        Ok(FeedResponse { body, content_type })
    }
}

fn proxy(
    make: fn(&str) -> reqwest::Result<reqwest::Proxy>,
    url: &str,
) -> Result<reqwest::Proxy, FetchError> {
    make(url).map_err(|source| FetchError::Proxy {
        url: url.to_string(),
        source,
    })
}
