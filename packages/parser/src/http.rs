//! HTTP session for fetching documentation pages.

use reqwest::blocking::Client;

use crate::cache::ResponseCache;
use crate::error::{error_chain, ParserError, Result};
use crate::html::PageDocument;

/// User agent string identifying this parser.
const USER_AGENT: &str = concat!("pydocs-parser/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// No timeout is set beyond the transport defaults and there is no retry
/// policy; a failed request fails the calling routine.
pub fn create_client() -> Result<Client> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// A fetched response body.
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    status: u16,
    body: Vec<u8>,
    from_cache: bool,
}

impl Page {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code; cached pages report 200.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn from_cache(&self) -> bool {
        self.from_cache
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8 regardless of the declared charset.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as an HTML document.
    pub fn document(&self) -> PageDocument {
        PageDocument::parse(&self.text())
    }
}

/// HTTP client plus the response cache shared by every fetch of a run.
#[derive(Debug)]
pub struct Session {
    client: Client,
    cache: ResponseCache,
}

impl Session {
    /// Create a session backed by the given cache.
    pub fn new(cache: ResponseCache) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            cache,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Perform one GET, served from the cache when possible.
    ///
    /// Non-success statuses are returned as pages, not errors. Only
    /// successful bodies are cached.
    pub fn get(&self, url: &str) -> Result<Page> {
        if let Some(body) = self.cache.get(url)? {
            tracing::debug!(url, "Served from cache");
            return Ok(Page {
                url: url.to_string(),
                status: 200,
                body,
                from_cache: true,
            });
        }

        let fetch_error = |source| ParserError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(fetch_error)?;
        let status = response.status();
        let body = response.bytes().map_err(fetch_error)?.to_vec();

        if status.is_success() {
            self.cache.put(url, &body)?;
        } else {
            tracing::warn!(url, status = %status, "Non-success response");
        }

        Ok(Page {
            url: url.to_string(),
            status: status.as_u16(),
            body,
            from_cache: false,
        })
    }
}

/// Fetch a page, logging transport failures before propagating them.
pub fn get_response(session: &Session, url: &str) -> Result<Page> {
    session.get(url).inspect_err(|e| {
        if let ParserError::Fetch { source, .. } = e {
            tracing::error!(url, error = %error_chain(source), "Failed to load page");
        }
    })
}
