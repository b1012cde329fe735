//! TMDB API response types for the movie endpoints.
//!
//! Fields TMDB may omit or send as `null` are `Option`s or default, so a
//! sparse record never fails the whole page.

use serde::Deserialize;

// --- Movie Lists ---

/// Paged response shared by `movie/{list}`, `movie/{id}/similar`,
/// `discover/movie` and `search/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page.
    #[serde(default)]
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie entry from a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Overview text.
    pub overview: Option<String>,
    /// Genres in display order.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release status (e.g., "Released").
    pub status: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    /// All movie genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    /// Cast in billing order.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew in source order.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
}

/// A single crew credit.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g., "Director", "Screenplay").
    #[serde(default)]
    pub job: String,
    /// Department (e.g., "Writing").
    pub department: Option<String>,
}

// --- Videos ---

/// Response from `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    /// Videos in source order.
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// A single video entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Site-specific video key (YouTube video ID for YouTube).
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Hosting site (e.g., "YouTube").
    #[serde(default)]
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Official flag.
    #[serde(default)]
    pub official: bool,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}
