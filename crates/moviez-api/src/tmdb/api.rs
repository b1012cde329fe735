//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{DiscoverMovieParams, ListParams, MovieList, SearchMovieParams};
use super::types::{
    TmdbCredits, TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse, TmdbVideos,
};

/// TMDB API trait.
///
/// Abstracts the movie endpoints so callers can be exercised against
/// a fake in tests. `TmdbApi` is the `Send` variant used by spawned tasks.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of a curated list (`movie/popular` etc.).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_list(
        &self,
        list: MovieList,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Fetches cast and crew for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits>;

    /// Fetches video metadata (trailers, teasers) for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64, language: &str) -> Result<TmdbVideos>;

    /// Fetches movies similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_similar(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse>;

    /// Discovers movies filtered by genre.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movie(&self, params: &DiscoverMovieParams) -> Result<TmdbMovieListResponse>;

    /// Fetches the movie genre list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genre_movie_list(&self, language: &str) -> Result<TmdbGenreList>;

    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse>;
}
