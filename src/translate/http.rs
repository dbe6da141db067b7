//! HTTP translation provider
//!
//! Talks to the public Google Translate web endpoint (`client=gtx`). The
//! response is a nested JSON array whose first element lists translated
//! segments; the translation is the concatenation of their first fields.

use std::net::IpAddr;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use ureq::http::Uri;

use crate::translate::provider::{ProviderError, TranslationProvider};

/// Default provider endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Blocking HTTP provider with a bounded per-request timeout
pub struct HttpProvider {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let mut config = ureq::Agent::config_builder().timeout_global(Some(timeout));
        // Loopback endpoints never go through an environment proxy
        if is_loopback(&endpoint) {
            config = config.proxy(None);
        }
        let agent: ureq::Agent = config.build().into();
        Self { agent, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranslationProvider for HttpProvider {
    fn name(&self) -> &str {
        "google-gtx"
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        debug!(%url, from = source, to = target, chars = text.chars().count(), "calling provider");

        let mut response = self
            .agent
            .get(&url)
            .query("client", "gtx")
            .query("sl", source)
            .query("tl", target)
            .query("dt", "t")
            .query("q", text)
            .call()
            .map_err(map_ureq_error)?;

        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        parse_response(&body)
    }
}

/// Whether the endpoint's host is exactly `localhost` or a loopback address
fn is_loopback(endpoint: &str) -> bool {
    let Ok(uri) = endpoint.parse::<Uri>() else {
        return false;
    };
    let Some(host) = uri.host() else {
        return false;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

fn map_ureq_error(err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::StatusCode(429) => ProviderError::RateLimited,
        ureq::Error::StatusCode(code) => ProviderError::Status(code),
        ureq::Error::Timeout(_) => ProviderError::Timeout,
        other => ProviderError::Network(other.to_string()),
    }
}

/// Extract the translated text from a `translate_a/single` response
pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Malformed("missing translation segments".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        match segment.get(0) {
            Some(Value::String(part)) => translated.push_str(part),
            // Transliteration rows carry no translated text
            Some(Value::Null) => {}
            _ => {
                return Err(ProviderError::Malformed(format!("unexpected segment: {}", segment)));
            }
        }
    }

    if translated.is_empty() {
        return Err(ProviderError::Malformed("empty translation".to_string()));
    }
    Ok(translated)
}
