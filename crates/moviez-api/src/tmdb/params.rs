//! Request parameters for the TMDB movie endpoints.

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Curated movie lists served under `movie/{list}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    /// `movie/popular`.
    Popular,
    /// `movie/upcoming`.
    Upcoming,
    /// `movie/top_rated`.
    TopRated,
}

impl MovieList {
    /// All lists in display order.
    pub const ALL: [Self; 3] = [Self::Upcoming, Self::TopRated, Self::Popular];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "movie/popular",
            Self::Upcoming => "movie/upcoming",
            Self::TopRated => "movie/top_rated",
        }
    }

    /// URL segment used by category routes (`/category/{segment}`).
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Upcoming => "upcoming",
            Self::TopRated => "top_rated",
        }
    }

    /// Parses a category route segment.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "popular" => Some(Self::Popular),
            "upcoming" => Some(Self::Upcoming),
            "top_rated" => Some(Self::TopRated),
            _ => None,
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::Upcoming => "Upcoming",
            Self::TopRated => "Top Rated",
        }
    }
}

/// Parameters for paged list endpoints (`movie/{list}`, `movie/{id}/similar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Append the configured `api_key` query parameter.
    pub with_api_key: bool,
}

impl ListParams {
    /// Creates params for page 1 in the default language.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            with_api_key: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sends the alternate `api_key` parameter alongside the bearer token.
    #[must_use]
    pub const fn with_api_key(mut self) -> Self {
        self.with_api_key = true;
        self
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for `discover/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Genre IDs, sent comma-joined as `with_genres`.
    pub genre_ids: Vec<u32>,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (default: 1).
    pub page: u32,
}

impl DiscoverMovieParams {
    /// Creates discovery params for the given genres.
    pub fn new(genre_ids: impl Into<Vec<u32>>) -> Self {
        Self {
            genre_ids: genre_ids.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Comma-joined `with_genres` value.
    #[must_use]
    pub fn with_genres(&self) -> String {
        self.genre_ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_list_segment_roundtrip() {
        for list in MovieList::ALL {
            // Arrange & Act
            let parsed = MovieList::from_segment(list.segment());

            // Assert
            assert_eq!(parsed, Some(list));
        }
    }

    #[test]
    fn test_movie_list_unknown_segment() {
        // Arrange & Act & Assert
        assert_eq!(MovieList::from_segment("now_playing"), None);
    }

    #[test]
    fn test_movie_list_paths() {
        // Arrange & Act & Assert
        assert_eq!(MovieList::Popular.path(), "movie/popular");
        assert_eq!(MovieList::Upcoming.path(), "movie/upcoming");
        assert_eq!(MovieList::TopRated.path(), "movie/top_rated");
    }

    #[test]
    fn test_list_params_defaults() {
        // Arrange & Act
        let params = ListParams::default();

        // Assert
        assert_eq!(params.language, "en-US");
        assert_eq!(params.page, 1);
        assert!(!params.with_api_key);
    }

    #[test]
    fn test_discover_with_genres_joins_ids() {
        // Arrange
        let params = DiscoverMovieParams::new(vec![28, 35, 10749]);

        // Act
        let joined = params.with_genres();

        // Assert
        assert_eq!(joined, "28,35,10749");
    }

    #[test]
    fn test_search_params_builder() {
        // Arrange & Act
        let params = SearchMovieParams::new("Fight Club")
            .language("ja-JP")
            .page(2);

        // Assert
        assert_eq!(params.query, "Fight Club");
        assert_eq!(params.language, "ja-JP");
        assert_eq!(params.page, 2);
        assert!(!params.include_adult);
    }
}
