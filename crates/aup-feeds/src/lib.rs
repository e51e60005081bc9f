//! aup-feeds — fetch and decode aeronautical zone feeds.
//!
//! [`fetch::HttpFetcher`] issues the single request of a run; [`decode`]
//! turns the body into [`ZoneRecord`]s using the JSON schedule decoder or the
//! XML bulletin decoder, picked by [`resolve_format`].

pub mod error;
pub mod fetch;
pub mod json;
pub mod xml;

pub use aup_core::FeedFormat;
pub use error::{FeedError, FetchError};
pub use fetch::{FeedResponse, HttpFetcher};

use aup_core::ZoneRecord;

/// Zones decoded from one body, plus how many entries were unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFeed {
    pub zones: Vec<ZoneRecord>,
    pub skipped: usize,
}

/// Settle [`FeedFormat::Auto`] from the content type, then from the first
/// non-blank character of the body.
pub fn resolve_format(
    requested: FeedFormat,
    content_type: Option<&str>,
    body: &str,
) -> Result<FeedFormat, FeedError> {
    if requested != FeedFormat::Auto {
        return Ok(requested);
    }

    let declared = content_type.map(str::to_ascii_lowercase).unwrap_or_default();
    if declared.contains("json") {
        return Ok(FeedFormat::Json);
    }
    if declared.contains("xml") {
        return Ok(FeedFormat::Xml);
    }

    match body.trim_start_matches('\u{feff}').trim_start().chars().next() {
        Some('{' | '[') => Ok(FeedFormat::Json),
        Some('<') => Ok(FeedFormat::Xml),
        _ => Err(FeedError::UnknownFormat),
    }
}

/// Decode a fetched response.
pub fn decode(requested: FeedFormat, response: &FeedResponse) -> Result<DecodedFeed, FeedError> {
    let format = resolve_format(requested, response.content_type.as_deref(), &response.body)?;
    tracing::debug!(%format, "decoding feed");
    match format {
        FeedFormat::Xml => xml::decode(&response.body),
        FeedFormat::Json | FeedFormat::Auto => json::decode(&response.body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FeedFormat::Xml, Some("application/json"), "{}", FeedFormat::Xml)]
    #[case(FeedFormat::Auto, Some("application/json; charset=utf-8"), "", FeedFormat::Json)]
    #[case(FeedFormat::Auto, Some("text/xml"), "", FeedFormat::Xml)]
    #[case(FeedFormat::Auto, Some("text/plain"), "  \n{\"data\": []}", FeedFormat::Json)]
    #[case(FeedFormat::Auto, None, "\u{feff}<?xml version=\"1.0\"?>", FeedFormat::Xml)]
    #[case(FeedFormat::Auto, None, "[]", FeedFormat::Json)]
    fn formats_resolve(
        #[case] requested: FeedFormat,
        #[case] content_type: Option<&str>,
        #[case] body: &str,
        #[case] expected: FeedFormat,
    ) {
        assert_eq!(resolve_format(requested, content_type, body).unwrap(), expected);
    }

    #[test]
    fn unknown_body_cannot_be_resolved() {
        assert!(matches!(
            resolve_format(FeedFormat::Auto, Some("text/plain"), "hello"),
            Err(FeedError::UnknownFormat)
        ));
    }
}
