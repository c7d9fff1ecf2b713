//! HTTP retrieval of listing pages.
//!
//! [`Fetch`] is the seam between the crawl engine and the network: the engine
//! only asks for the body at a URL. [`HttpFetcher`] is the real implementation
//! backed by a single shared `reqwest` client. There is no retry and no
//! backoff; one failed request is one failed target.

use crate::errors::FetchError;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, instrument};

/// Browser user-agent sent by sources that refuse the default client string.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36";

/// Retrieve the raw body of a listing page.
pub trait Fetch {
    /// GET `url`, sending `user_agent` when given.
    ///
    /// Any transport failure or non-2xx status is a [`FetchError`].
    async fn fetch(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError>;
}

/// [`Fetch`] over HTTP with default client timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self, user_agent))]
    async fn fetch(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
