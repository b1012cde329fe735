//! Fetch-and-derive layer for moviez.
//!
//! Turns TMDB responses into render-ready view models and holds the
//! small amount of timing logic the front end needs: the slider timer,
//! the search debounce and ticketed fetch slots.

/// Request helper bound to a TMDB client.
pub mod catalog;
/// Search input debounce.
pub mod debounce;
/// Pure derivations over credits and videos.
pub mod derive;
/// Ticketed fetch state.
pub mod fetch;
/// Display formatting helpers.
pub mod format;
/// Render-ready view models.
pub mod model;
/// Route parsing and rendering.
pub mod route;
/// Slider timer state machine.
pub mod slider;
