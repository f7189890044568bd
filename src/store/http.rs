//! HTTP page store backed by the Cosense JSON API
//!
//! This module handles all HTTP requests made by the crate:
//! - Building the HTTP client (user agent, JSON accept header, session cookie)
//! - Building page API URLs
//! - Fetching a page and classifying the response
//! - Decoding the JSON payload into [`PageData`]

use crate::config::ApiConfig;
use crate::store::{LineRecord, PageData, PageResponse, PageStore};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("cosense-ranker/", env!("CARGO_PKG_VERSION"));

/// Page payload as returned by `GET /pages/:project/:title`
///
/// Only the fields the analysis needs are decoded; everything else in the
/// payload is ignored.
#[derive(Debug, Deserialize)]
struct RawPage {
    title: String,
    lines: Vec<RawLine>,
    links: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    text: String,
}

impl From<RawPage> for PageData {
    fn from(raw: RawPage) -> Self {
        PageData {
            title: raw.title,
            lines: raw.lines.into_iter().map(|l| LineRecord::new(l.text)).collect(),
            links: raw.links,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - API settings (timeout)
/// * `session_id` - Optional `connect.sid` value attached as a cookie
///
/// # Example
///
/// ```no_run
/// use cosense_ranker::config::ApiConfig;
/// use cosense_ranker::store::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &ApiConfig,
    session_id: Option<&str>,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(sid) = session_id {
        match HeaderValue::from_str(&format!("connect.sid={}", sid)) {
            Ok(mut cookie) => {
                cookie.set_sensitive(true);
                headers.insert(COOKIE, cookie);
            }
            Err(_) => {
                tracing::warn!("Session id contains invalid header characters; continuing without it");
            }
        }
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Form-encodes a page title for use as a URL path segment
///
/// Spaces become `+` and everything outside `A-Za-z0-9*-._` is percent-encoded.
///
/// # Examples
///
/// ```
/// use cosense_ranker::store::encode_page_title;
///
/// assert_eq!(encode_page_title("Rust (book)"), "Rust+%28book%29");
/// ```
pub fn encode_page_title(title: &str) -> String {
    url::form_urlencoded::byte_serialize(title.as_bytes()).collect()
}

/// Builds the API URL for a page
pub fn page_url(base_url: &str, project: &str, title: &str) -> String {
    format!(
        "{}/pages/{}/{}",
        base_url.trim_end_matches('/'),
        project,
        encode_page_title(title)
    )
}

/// Page store talking to the Cosense API over HTTPS
#[derive(Debug, Clone)]
pub struct CosenseClient {
    client: Client,
    base_url: String,
    authenticated: bool,
}

impl CosenseClient {
    /// Creates a client for the configured API
    ///
    /// Without a session id only public projects are readable.
    pub fn new(config: &ApiConfig, session_id: Option<&str>) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config, session_id)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authenticated: session_id.is_some(),
        })
    }
}

#[async_trait]
impl PageStore for CosenseClient {
    async fn fetch(&self, project: &str, title: &str) -> PageResponse {
        let url = self.page_url(project, title);
        tracing::trace!("GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return classify_transport_error(&e),
        };

        let status = response.status();
        match status {
            StatusCode::OK => match response.text().await {
                Ok(body) => decode_page(&body),
                Err(e) => classify_transport_error(&e),
            },
            StatusCode::NOT_FOUND => PageResponse::NotFound,
            StatusCode::UNAUTHORIZED => PageResponse::Unauthorized,
            _ => PageResponse::OtherError {
                status_code: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            },
        }
    }

    fn page_url(&self, project: &str, title: &str) -> String {
        page_url(&self.base_url, project, title)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

fn decode_page(body: &str) -> PageResponse {
    match serde_json::from_str::<RawPage>(body) {
        Ok(raw) => PageResponse::Success(raw.into()),
        Err(e) => PageResponse::Malformed {
            error: e.to_string(),
        },
    }
}

fn classify_transport_error(e: &reqwest::Error) -> PageResponse {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };
    PageResponse::NetworkError { error }
}
