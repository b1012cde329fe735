//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and builds image CDN URLs for the returned paths.

mod api;
mod client;
mod images;
mod params;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
pub use images::{DEFAULT_IMAGE_BASE_URL, ImageUrls};
pub use params::{DiscoverMovieParams, ListParams, MovieList, SearchMovieParams};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbGenre, TmdbGenreList, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbVideo, TmdbVideos,
};
