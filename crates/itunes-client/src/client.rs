// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{ItunesError, Result};
use crate::models::{Search, SearchResult};
use itunes_config::{ItunesConfig, DEFAULT_LOOKUP_URL, DEFAULT_SEARCH_URL};
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};
use url::Url;

const USER_AGENT: &str = concat!("itunes-client/", env!("CARGO_PKG_VERSION"));

/// iTunes Search and Lookup API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    client: Client,
    search_url: Url,
    lookup_url: Url,
}

impl ItunesClient {
    /// Create a new iTunes client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> ItunesClientBuilder {
        ItunesClientBuilder::default()
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ItunesConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .search_url(config.client.search_url.clone())
            .lookup_url(config.client.lookup_url.clone())
            .timeout(Duration::from_secs(config.client.timeout_secs));

        if let Some(user_agent) = &config.client.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build()
    }

    /// Run a search, or a lookup when the request carries an identifier.
    ///
    /// # Example
    /// ```no_run
    /// # use itunes_client::{ItunesClient, Search};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ItunesClient::new()?;
    /// let response = client.search(&Search::new("Change").limit(12)).await?;
    /// for item in &response {
    ///     println!("{} - {}", item.artist_name, item.track_name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, search: &Search) -> Result<SearchResult> {
        self.search_with_cancel(search, &CancellationToken::new())
            .await
    }

    /// Same as [`search`](Self::search), aborting with
    /// [`ItunesError::Cancelled`] when `cancel` fires.
    #[instrument(target = "itunes", skip(self, search, cancel), fields(term = %search.term))]
    pub async fn search_with_cancel(
        &self,
        search: &Search,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        if let Some(id) = search.lookup_id() {
            return self.search_by_id_with_cancel(id, cancel).await;
        }

        let params = search.to_query_params();
        let mut url = self.search_url.clone();
        url.query_pairs_mut().extend_pairs(params.pairs());

        let result = self.get(url, cancel).await?;
        log_missing_view_urls(&result);
        Ok(result)
    }

    /// Look up catalog items by iTunes identifier.
    ///
    /// # Example
    /// ```no_run
    /// # use itunes_client::ItunesClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ItunesClient::new()?;
    /// let response = client.search_by_id("263058648").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_by_id(&self, id: &str) -> Result<SearchResult> {
        self.search_by_id_with_cancel(id, &CancellationToken::new())
            .await
    }

    /// Same as [`search_by_id`](Self::search_by_id), aborting with
    /// [`ItunesError::Cancelled`] when `cancel` fires.
    #[instrument(target = "itunes", skip(self, id, cancel), fields(id = %id))]
    pub async fn search_by_id_with_cancel(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ItunesError::InvalidRequest("empty lookup id".to_string()));
        }

        let mut url = self.lookup_url.clone();
        url.query_pairs_mut().append_pair("id", id);

        self.get(url, cancel).await
    }

    async fn get(&self, url: Url, cancel: &CancellationToken) -> Result<SearchResult> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(target: "itunes", "request cancelled: {}", url);
                Err(ItunesError::Cancelled)
            }
            result = self.fetch(&url) => result,
        }
    }

    async fn fetch(&self, url: &Url) -> Result<SearchResult> {
        trace!(target: "itunes", "GET {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        debug!(target: "itunes", "response status: {}", status);

        if !status.is_success() {
            return Err(ItunesError::UnexpectedStatus {
                status: status.as_u16(),
                status_text: status.to_string(),
            });
        }

        let body = response.bytes().await?;
        trace!(target: "itunes", "response body: {}", String::from_utf8_lossy(&body));

        let result: SearchResult = serde_json::from_slice(body.trim_ascii())?;
        debug!(
            target: "itunes",
            result_count = result.result_count,
            received = result.len(),
            "decoded response"
        );
        Ok(result)
    }
}

fn log_missing_view_urls(result: &SearchResult) {
    let missing = result
        .iter()
        .filter(|item| item.track_view_url.is_empty())
        .count();
    if missing > 0 {
        debug!(target: "itunes", missing, "results without a track view URL");
    }
}

/// Builder for configuring an iTunes client.
#[derive(Debug)]
pub struct ItunesClientBuilder {
    search_url: String,
    lookup_url: String,
    timeout: Duration,
    user_agent: String,
    http_client: Option<Client>,
}

impl Default for ItunesClientBuilder {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            http_client: None,
        }
    }
}

impl ItunesClientBuilder {
    /// Set the search endpoint (useful for testing with mock servers).
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Set the lookup endpoint (useful for testing with mock servers).
    pub fn lookup_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_url = url.into();
        self
    }

    /// Set request timeout duration. Ignored when an HTTP client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header. Ignored when an HTTP client is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a preconfigured HTTP client (proxies, TLS, custom timeouts).
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the iTunes client.
    pub fn build(self) -> Result<ItunesClient> {
        let search_url = parse_endpoint(&self.search_url)?;
        let lookup_url = parse_endpoint(&self.lookup_url)?;

        let client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .user_agent(self.user_agent)
                .build()?,
        };

        Ok(ItunesClient {
            client,
            search_url,
            lookup_url,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ItunesError::InvalidUrl(format!("{raw}: {e}")))
}
