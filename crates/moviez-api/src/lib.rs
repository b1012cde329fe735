//! API client library for moviez.
//!
//! Provides the TMDB v3 client used to fetch movie listings, details,
//! credits, videos, genres and search results.

/// TMDB API client.
pub mod tmdb;
