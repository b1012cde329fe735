//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::params::{DiscoverMovieParams, ListParams, MovieList, SearchMovieParams};
use super::rate_limiter::RequestPacer;
use super::types::{
    TmdbCredits, TmdbErrorResponse, TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbVideos,
};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Every request carries the bearer token. The optional v3 `api_key` is
/// appended only where a caller asks for it (search and the home slider).
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Alternate v3 API key.
    api_key: Option<String>,
    /// Request pacer.
    pacer: Arc<Mutex<RequestPacer>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            api_key: None,
            user_agent: None,
            min_interval: None,
        }
    }

    /// Overrides the base URL (configuration or wiremock in tests).
    ///
    /// A missing trailing slash is added so relative paths join below it.
    #[must_use]
    pub fn base_url(mut self, mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the alternate v3 API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.is_empty())
            .context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let pacer = self
            .min_interval
            .map_or_else(RequestPacer::default_interval, RequestPacer::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            api_key: self.api_key.filter(|k| !k.is_empty()),
            pacer: Arc::new(Mutex::new(pacer)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Appends `api_key` when one is configured.
    fn push_api_key(&self, query: &mut Vec<(&'static str, String)>) {
        if let Some(ref key) = self.api_key {
            query.push(("api_key", key.clone()));
        }
    }

    /// Sends a GET request with Bearer auth, query params, and pacing.
    ///
    /// Failures are returned as-is; nothing is retried.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.pacer.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        // Path only: the query may carry the api_key.
        tracing::debug!(path = %request.url().path(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
    }

    /// Query pairs shared by paged list endpoints.
    fn list_query(&self, params: &ListParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        if params.with_api_key {
            self.push_api_key(&mut query);
        }
        query
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(list = list.segment()))]
    async fn movie_list(
        &self,
        list: MovieList,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse> {
        let query = self.list_query(params);
        self.get_json(list.path(), &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits> {
        let path = format!("movie/{movie_id}/credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_videos(&self, movie_id: u64, language: &str) -> Result<TmdbVideos> {
        let path = format!("movie/{movie_id}/videos");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_similar(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{movie_id}/similar");
        let query = self.list_query(params);
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn discover_movie(&self, params: &DiscoverMovieParams) -> Result<TmdbMovieListResponse> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("with_genres", params.with_genres()),
        ];
        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn genre_movie_list(&self, language: &str) -> Result<TmdbGenreList> {
        let query = [("language", String::from(language))];
        self.get_json("genre/movie/list", &query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.push_api_key(&mut query);

        self.get_json("search/movie", &query).await
    }
}
