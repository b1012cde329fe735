//! `Catalog` - the fetch-and-derive helper shared by every component.
//!
//! Each operation issues the TMDB calls one component needs and shapes the
//! result into a view model. No response is cached: two components asking
//! for the same list each hit the API.

use anyhow::{Context, Result};
use moviez_api::tmdb::{
    DiscoverMovieParams, ImageUrls, ListParams, MovieList, SearchMovieParams, TmdbApi,
};
use tracing::instrument;

use crate::derive::{self, TrailerLink};
use crate::model::{
    CardPage, DISCOVER_LIMIT, DetailView, GenreChip, MovieCard, SLIDE_LIMIT, SearchHit,
    SectionKind, Slide, cards,
};

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// A fetch a component can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Home slider slides.
    Slides,
    /// A listing section.
    Section(SectionKind),
    /// One page of a curated list.
    Category {
        /// Which list.
        list: MovieList,
        /// 1-based page.
        page: u32,
    },
    /// Discovery results for the given genres.
    Discover {
        /// Genre IDs.
        genre_ids: Vec<u32>,
        /// 1-based page.
        page: u32,
    },
    /// The genre list.
    Genres,
    /// Search results for a query.
    Search(String),
    /// A composed detail page.
    Detail(u64),
    /// The trailer of one movie (slider "Watch Trailer").
    Trailer(u64),
}

/// Result of a [`Request`], tagged with what was asked for.
#[derive(Debug)]
pub enum Response {
    /// Home slider slides.
    Slides(Result<Vec<Slide>>),
    /// A listing section.
    Section(SectionKind, Result<Vec<MovieCard>>),
    /// One page of a curated list.
    Category(Result<CardPage>),
    /// Discovery results.
    Discover(Result<CardPage>),
    /// The genre list.
    Genres(Result<Vec<GenreChip>>),
    /// Search results.
    Search(Result<Vec<SearchHit>>),
    /// A composed detail page.
    Detail(Result<DetailView>),
    /// A movie's trailer, if it has one.
    Trailer(u64, Result<Option<TrailerLink>>),
}

/// TMDB client plus the configuration every view needs.
#[derive(Debug)]
pub struct Catalog<C> {
    /// API client.
    client: C,
    /// Image URL builder.
    images: ImageUrls,
    /// Response language (e.g. `en-US`).
    language: String,
}

impl<C: TmdbApi + Sync> Catalog<C> {
    /// Creates a catalog with the default language.
    pub fn new(client: C, images: ImageUrls) -> Self {
        Self {
            client,
            images,
            language: String::from(DEFAULT_LANGUAGE),
        }
    }

    /// Overrides the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Image URL builder.
    #[must_use]
    pub const fn images(&self) -> &ImageUrls {
        &self.images
    }

    /// Primary language subtag (`en` for `en-US`), used by the genre list.
    fn base_language(&self) -> &str {
        self.language
            .split('-')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("en")
    }

    fn list_params(&self) -> ListParams {
        ListParams::new().language(self.language.clone())
    }

    /// First 10 popular movies as slides.
    ///
    /// # Errors
    ///
    /// Returns an error if the popular list request fails.
    #[instrument(skip_all)]
    pub async fn slides(&self) -> Result<Vec<Slide>> {
        let params = self.list_params().with_api_key();
        let response = self
            .client
            .movie_list(MovieList::Popular, &params)
            .await
            .context("failed to fetch slider movies")?;
        Ok(response
            .results
            .iter()
            .take(SLIDE_LIMIT)
            .map(|movie| Slide::from_summary(movie, &self.images))
            .collect())
    }

    /// Cards for one listing section, truncated to the section's limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the list request fails.
    #[instrument(skip_all, fields(section = kind.title()))]
    pub async fn section(&self, kind: SectionKind) -> Result<Vec<MovieCard>> {
        let params = self.list_params();
        let response = match kind {
            SectionKind::Upcoming => self.client.movie_list(MovieList::Upcoming, &params).await,
            SectionKind::TopRated => self.client.movie_list(MovieList::TopRated, &params).await,
            SectionKind::Popular => self.client.movie_list(MovieList::Popular, &params).await,
            SectionKind::MoreLikeThis(id) => self.client.movie_similar(id, &params).await,
        }
        .with_context(|| format!("failed to fetch section: {}", kind.title()))?;
        Ok(cards(&response.results, kind.limit(), &self.images))
    }

    /// One full page of a curated list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list request fails.
    #[instrument(skip_all, fields(list = list.segment(), page = page))]
    pub async fn category(&self, list: MovieList, page: u32) -> Result<CardPage> {
        let params = self.list_params().page(page);
        let response = self
            .client
            .movie_list(list, &params)
            .await
            .with_context(|| format!("failed to fetch category: {}", list.segment()))?;
        Ok(CardPage::from_response(&response, None, &self.images))
    }

    /// Up to 20 movies matching all `genre_ids`.
    ///
    /// An empty id list returns an empty page without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the discover request fails.
    #[instrument(skip_all, fields(page = page))]
    pub async fn discover(&self, genre_ids: &[u32], page: u32) -> Result<CardPage> {
        if genre_ids.is_empty() {
            return Ok(CardPage {
                page,
                total_pages: 0,
                cards: Vec::new(),
            });
        }
        let params = DiscoverMovieParams::new(genre_ids)
            .language(self.language.clone())
            .page(page);
        let response = self
            .client
            .discover_movie(&params)
            .await
            .context("failed to discover movies")?;
        Ok(CardPage::from_response(
            &response,
            Some(DISCOVER_LIMIT),
            &self.images,
        ))
    }

    /// All movie genres.
    ///
    /// # Errors
    ///
    /// Returns an error if the genre list request fails.
    #[instrument(skip_all)]
    pub async fn genres(&self) -> Result<Vec<GenreChip>> {
        let list = self
            .client
            .genre_movie_list(self.base_language())
            .await
            .context("failed to fetch genres")?;
        Ok(list.genres.iter().map(GenreChip::from).collect())
    }

    /// Search matches for `query`.
    ///
    /// A blank query returns no hits without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails.
    #[instrument(skip_all)]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let params = SearchMovieParams::new(query).language(self.language.clone());
        let response = self
            .client
            .search_movie(&params)
            .await
            .with_context(|| format!("failed to search movies: {query}"))?;
        Ok(response
            .results
            .iter()
            .map(SearchHit::from_summary)
            .collect())
    }

    /// Composed detail page.
    ///
    /// Fetches the movie first, then credits and videos together. Credits
    /// or videos failures are logged and fall back to `Unknown` / no trailer.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie detail request fails.
    #[instrument(skip_all, fields(movie_id = id))]
    pub async fn detail(&self, id: u64) -> Result<DetailView> {
        let details = self
            .client
            .movie_details(id, &self.language)
            .await
            .with_context(|| format!("failed to fetch movie {id}"))?;

        let (credits, videos) = futures::join!(
            self.client.movie_credits(id, &self.language),
            self.client.movie_videos(id, &self.language),
        );
        let credits = credits
            .inspect_err(|e| tracing::warn!("credits for movie {id} unavailable: {e:#}"))
            .ok();
        let videos = videos
            .inspect_err(|e| tracing::warn!("videos for movie {id} unavailable: {e:#}"))
            .ok();

        Ok(DetailView::compose(
            &details,
            credits.as_ref(),
            videos.as_ref(),
            &self.images,
        ))
    }

    /// The first YouTube trailer of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the videos request fails.
    #[instrument(skip_all, fields(movie_id = id))]
    pub async fn trailer(&self, id: u64) -> Result<Option<TrailerLink>> {
        let videos = self
            .client
            .movie_videos(id, &self.language)
            .await
            .with_context(|| format!("failed to fetch videos for movie {id}"))?;
        Ok(derive::trailer(&videos.results))
    }

    /// Runs one request and tags the result.
    pub async fn execute(&self, request: Request) -> Response {
        match request {
            Request::Slides => Response::Slides(self.slides().await),
            Request::Section(kind) => Response::Section(kind, self.section(kind).await),
            Request::Category { list, page } => Response::Category(self.category(list, page).await),
            Request::Discover { genre_ids, page } => {
                Response::Discover(self.discover(&genre_ids, page).await)
            }
            Request::Genres => Response::Genres(self.genres().await),
            Request::Search(query) => Response::Search(self.search(&query).await),
            Request::Detail(id) => Response::Detail(self.detail(id).await),
            Request::Trailer(id) => Response::Trailer(id, self.trailer(id).await),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;
    use std::time::Duration;

    use anyhow::bail;
    use moviez_api::tmdb::{
        TmdbClient, TmdbCredits, TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse,
        TmdbVideos,
    };
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::derive::UNKNOWN;
    use crate::format::NO_TRAILER;

    /// In-memory API returning fixtures and recording the calls it sees.
    #[derive(Debug, Default)]
    struct FakeApi {
        fail_details: bool,
        fail_credits: bool,
        fail_videos: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn fixture<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    impl TmdbApi for FakeApi {
        async fn movie_list(
            &self,
            list: MovieList,
            params: &ListParams,
        ) -> Result<TmdbMovieListResponse> {
            self.record(format!(
                "{}?page={}&key={}",
                list.path(),
                params.page,
                params.with_api_key
            ));
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/movie_popular.json"
            )))
        }

        async fn movie_details(&self, movie_id: u64, _language: &str) -> Result<TmdbMovieDetails> {
            self.record(format!("movie/{movie_id}"));
            if self.fail_details {
                bail!("TMDB API error (HTTP 404 Not Found)");
            }
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/movie_details_550.json"
            )))
        }

        async fn movie_credits(&self, movie_id: u64, _language: &str) -> Result<TmdbCredits> {
            self.record(format!("movie/{movie_id}/credits"));
            if self.fail_credits {
                bail!("request failed: credits");
            }
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/movie_credits_550.json"
            )))
        }

        async fn movie_videos(&self, movie_id: u64, _language: &str) -> Result<TmdbVideos> {
            self.record(format!("movie/{movie_id}/videos"));
            if self.fail_videos {
                bail!("request failed: videos");
            }
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/movie_videos_550.json"
            )))
        }

        async fn movie_similar(
            &self,
            movie_id: u64,
            _params: &ListParams,
        ) -> Result<TmdbMovieListResponse> {
            self.record(format!("movie/{movie_id}/similar"));
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/movie_similar_550.json"
            )))
        }

        async fn discover_movie(
            &self,
            params: &DiscoverMovieParams,
        ) -> Result<TmdbMovieListResponse> {
            self.record(format!("discover/movie?with_genres={}", params.with_genres()));
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/discover_movie_28_35.json"
            )))
        }

        async fn genre_movie_list(&self, language: &str) -> Result<TmdbGenreList> {
            self.record(format!("genre/movie/list?language={language}"));
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/genre_movie_list.json"
            )))
        }

        async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
            self.record(format!("search/movie?query={}", params.query));
            Ok(fixture(include_str!(
                "../../../fixtures/tmdb/search_movie_fight_club.json"
            )))
        }
    }

    fn catalog(api: FakeApi) -> Catalog<FakeApi> {
        Catalog::new(api, ImageUrls::default())
    }

    #[tokio::test]
    async fn test_slides_take_first_ten_popular_with_api_key() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let slides = catalog.slides().await.unwrap();

        // Assert
        assert_eq!(slides.len(), 10);
        assert_eq!(slides[0].title, "Popular One");
        assert_eq!(
            catalog.client.calls(),
            vec![String::from("movie/popular?page=1&key=true")]
        );
    }

    #[tokio::test]
    async fn test_section_limits() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let upcoming = catalog.section(SectionKind::Upcoming).await.unwrap();
        let popular = catalog.section(SectionKind::Popular).await.unwrap();
        let similar = catalog
            .section(SectionKind::MoreLikeThis(550))
            .await
            .unwrap();

        // Assert
        assert_eq!(upcoming.len(), 12);
        assert_eq!(popular.len(), 10);
        assert_eq!(similar.len(), 5);
        assert_eq!(similar[0].title, "Se7en");
        assert_eq!(
            catalog.client.calls(),
            vec![
                String::from("movie/upcoming?page=1&key=false"),
                String::from("movie/popular?page=1&key=false"),
                String::from("movie/550/similar"),
            ]
        );
    }

    #[tokio::test]
    async fn test_sibling_sections_are_not_deduplicated() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let _slides = catalog.slides().await.unwrap();
        let _popular = catalog.section(SectionKind::Popular).await.unwrap();

        // Assert
        assert_eq!(catalog.client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_discover_truncates_to_twenty() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let page = catalog.discover(&[28, 35], 1).await.unwrap();

        // Assert
        assert_eq!(page.cards.len(), 20);
        assert_eq!(page.total_pages, 12);
        assert_eq!(
            catalog.client.calls(),
            vec![String::from("discover/movie?with_genres=28,35")]
        );
    }

    #[tokio::test]
    async fn test_discover_without_genres_skips_request() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let page = catalog.discover(&[], 1).await.unwrap();

        // Assert
        assert!(page.cards.is_empty());
        assert!(catalog.client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_genres_use_base_language() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let genres = catalog.genres().await.unwrap();

        // Assert
        assert_eq!(genres.len(), 19);
        assert_eq!(
            catalog.client.calls(),
            vec![String::from("genre/movie/list?language=en")]
        );
    }

    #[tokio::test]
    async fn test_blank_search_skips_request() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let empty = catalog.search("").await.unwrap();
        let spaces = catalog.search("   ").await.unwrap();

        // Assert
        assert!(empty.is_empty());
        assert!(spaces.is_empty());
        assert!(catalog.client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_maps_hits() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let hits = catalog.search("fight club").await.unwrap();

        // Assert
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 550);
        assert_eq!(hits[0].label(), "Fight Club (1999)");
    }

    #[tokio::test]
    async fn test_detail_fetches_movie_then_extras() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let view = catalog.detail(550).await.unwrap();

        // Assert
        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.runtime, "2h 19m");
        assert_eq!(view.credits.stars, "Edward Norton, Brad Pitt");
        let calls = catalog.client.calls();
        assert_eq!(calls[0], "movie/550");
        assert_eq!(calls.len(), 3);
    }

    #[tokio::test]
    async fn test_detail_degrades_when_extras_fail() {
        // Arrange
        let catalog = catalog(FakeApi {
            fail_credits: true,
            fail_videos: true,
            ..FakeApi::default()
        });

        // Act
        let view = catalog.detail(550).await.unwrap();

        // Assert
        assert_eq!(view.credits.director, UNKNOWN);
        assert_eq!(view.credits.writers, UNKNOWN);
        assert_eq!(view.trailer_label(), NO_TRAILER);
    }

    #[tokio::test]
    async fn test_detail_failure_skips_extras() {
        // Arrange
        let catalog = catalog(FakeApi {
            fail_details: true,
            ..FakeApi::default()
        });

        // Act
        let result = catalog.detail(550).await;

        // Assert
        assert!(result.is_err());
        assert_eq!(catalog.client.calls(), vec![String::from("movie/550")]);
    }

    #[tokio::test]
    async fn test_execute_tags_response() {
        // Arrange
        let catalog = catalog(FakeApi::default());

        // Act
        let response = catalog.execute(Request::Trailer(550)).await;

        // Assert
        match response {
            Response::Trailer(id, Ok(Some(link))) => {
                assert_eq!(id, 550);
                assert_eq!(link.key, "O-b2VfmmbyA");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_detail_550_over_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let fixtures = [
            (
                "/3/movie/550",
                include_str!("../../../fixtures/tmdb/movie_details_550.json"),
            ),
            (
                "/3/movie/550/credits",
                include_str!("../../../fixtures/tmdb/movie_credits_550.json"),
            ),
            (
                "/3/movie/550/videos",
                include_str!("../../../fixtures/tmdb/movie_videos_550.json"),
            ),
        ];
        for (endpoint, body) in fixtures {
            Mock::given(method("GET"))
                .and(path(endpoint))
                .and(query_param("language", "en-US"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = TmdbClient::builder()
            .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .min_interval(Duration::from_millis(0))
            .build()
            .unwrap();
        let catalog = Catalog::new(client, ImageUrls::default());

        // Act
        let view = catalog.detail(550).await.unwrap();

        // Assert
        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.runtime, "2h 19m");
        assert_eq!(view.credits.director, "David Fincher");
    }

    #[tokio::test]
    async fn test_credits_http_error_degrades() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../fixtures/tmdb/movie_details_550.json"
            )))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550/credits"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":550,"results":[]}"#))
            .mount(&mock_server)
            .await;

        let client = TmdbClient::builder()
            .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .min_interval(Duration::from_millis(0))
            .build()
            .unwrap();
        let catalog = Catalog::new(client, ImageUrls::default());

        // Act
        let view = catalog.detail(550).await.unwrap();

        // Assert
        assert_eq!(view.credits.director, UNKNOWN);
        assert!(view.trailer.is_none());
    }
}
