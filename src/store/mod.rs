//! Page store: access to pages on the remote content service
//!
//! The rest of the crate only sees the [`PageStore`] trait and the typed
//! [`PageResponse`]; JSON payloads are converted into [`PageData`] at this
//! boundary and never inspected elsewhere.

mod http;

pub use http::{build_http_client, encode_page_title, page_url, CosenseClient, USER_AGENT};

use async_trait::async_trait;
use thiserror::Error;

/// One line of page text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub text: String,
}

impl LineRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Content of a successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Page title as reported by the service
    pub title: String,

    /// Page lines in order; the first line is the title line
    pub lines: Vec<LineRecord>,

    /// Outbound link titles, or `None` when the payload has no links field
    pub links: Option<Vec<String>>,
}

/// Result of asking the store for a page
#[derive(Debug, Clone)]
pub enum PageResponse {
    /// The page was fetched and decoded
    Success(PageData),

    /// HTTP 404
    NotFound,

    /// HTTP 401
    Unauthorized,

    /// Any other non-200 status
    OtherError {
        /// The HTTP status code
        status_code: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...)
    NetworkError {
        /// Error description
        error: String,
    },

    /// A 200 response whose body is not a page payload
    Malformed {
        /// Decoder error description
        error: String,
    },
}

impl PageResponse {
    /// Converts the response into page data or a classified failure
    ///
    /// `authenticated` tells a rejected session (expired cookie) apart from an
    /// anonymous request hitting a private page.
    pub fn into_result(self, authenticated: bool) -> Result<PageData, PageFailure> {
        match self {
            PageResponse::Success(page) => Ok(page),
            PageResponse::NotFound => Err(PageFailure::PageNotFound),
            PageResponse::Unauthorized if authenticated => Err(PageFailure::AuthExpired),
            PageResponse::Unauthorized => Err(PageFailure::AuthRequired),
            PageResponse::OtherError { status_code, body } => Err(PageFailure::OtherHttpStatus {
                status_code,
                // 403 bodies are HTML error pages; not worth showing
                body: (status_code != 403 && !body.trim().is_empty()).then_some(body),
            }),
            PageResponse::NetworkError { error } => Err(PageFailure::NetworkFailure(error)),
            PageResponse::Malformed { error } => Err(PageFailure::MalformedPayload(error)),
        }
    }

    /// HTTP status code carried by this response, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PageResponse::Success(_) => Some(200),
            PageResponse::NotFound => Some(404),
            PageResponse::Unauthorized => Some(401),
            PageResponse::OtherError { status_code, .. } => Some(*status_code),
            PageResponse::NetworkError { .. } | PageResponse::Malformed { .. } => None,
        }
    }
}

/// Why a page could not be used
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageFailure {
    #[error("access denied: the page is private (set COSENSE_SID to authenticate)")]
    AuthRequired,

    #[error("authentication failed: the session cookie is invalid or expired")]
    AuthExpired,

    #[error("page not found")]
    PageNotFound,

    #[error("unexpected HTTP status {status_code}")]
    OtherHttpStatus {
        status_code: u16,
        body: Option<String>,
    },

    #[error("network error: {0}")]
    NetworkFailure(String),

    #[error("malformed page payload: {0}")]
    MalformedPayload(String),
}

/// Source of pages, addressed by project and page title
///
/// Implementations perform no retries and no caching; every call is one
/// request.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Fetches a page; `title` must already be normalized for the service
    async fn fetch(&self, project: &str, title: &str) -> PageResponse;

    /// The URL a fetch for this page would request (for display only)
    fn page_url(&self, project: &str, title: &str) -> String;

    /// Whether requests carry a session credential
    fn is_authenticated(&self) -> bool;
}
