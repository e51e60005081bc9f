//! Error types for aup-feeds. Every variant is fatal for the run.

/// The endpoint could not be reached or answered with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("invalid proxy {url:?}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

/// The response body could not be decoded as a feed document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("malformed JSON feed")]
    Json(#[from] serde_json::Error),
    #[error("JSON feed has no `data` array")]
    MissingData,
    #[error("malformed XML bulletin")]
    Xml(#[from] quick_xml::Error),
    #[error("XML bulletin has no root element")]
    EmptyBulletin,
    #[error("cannot tell whether the feed is JSON or XML")]
    UnknownFormat,
}
