//! First-match derivations over credits and video payloads.
//!
//! All selections keep source order and take the first match; there is
//! no scoring.

use moviez_api::tmdb::{TmdbCredits, TmdbVideo};

/// Fallback for a missing director, writer list or star list.
pub const UNKNOWN: &str = "Unknown";

/// Crew jobs counted as writers.
const WRITER_JOBS: [&str; 2] = ["Writer", "Screenplay"];

/// Number of leading cast entries shown as stars.
const STAR_COUNT: usize = 2;

/// Name of the first crew entry whose job is exactly `Director`.
#[must_use]
pub fn director(credits: &TmdbCredits) -> String {
    credits
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map_or_else(|| String::from(UNKNOWN), |member| member.name.clone())
}

/// Comma-joined names of crew entries with job `Writer` or `Screenplay`.
#[must_use]
pub fn writers(credits: &TmdbCredits) -> String {
    let names: Vec<&str> = credits
        .crew
        .iter()
        .filter(|member| WRITER_JOBS.contains(&member.job.as_str()))
        .map(|member| member.name.as_str())
        .collect();
    join_or_unknown(&names)
}

/// Comma-joined names of the first two cast entries.
#[must_use]
pub fn stars(credits: &TmdbCredits) -> String {
    let names: Vec<&str> = credits
        .cast
        .iter()
        .take(STAR_COUNT)
        .map(|member| member.name.as_str())
        .collect();
    join_or_unknown(&names)
}

/// First video with type `Trailer` hosted on YouTube.
#[must_use]
pub fn trailer(videos: &[TmdbVideo]) -> Option<TrailerLink> {
    videos
        .iter()
        .find(|video| video.kind == "Trailer" && video.site == "YouTube")
        .map(|video| TrailerLink {
            key: video.key.clone(),
            name: video.name.clone(),
        })
}

fn join_or_unknown(names: &[&str]) -> String {
    if names.is_empty() {
        String::from(UNKNOWN)
    } else {
        names.join(", ")
    }
}

/// Director, writers and stars derived from one credits payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditsSummary {
    /// Director name or `Unknown`.
    pub director: String,
    /// Writer names or `Unknown`.
    pub writers: String,
    /// Top-two cast names or `Unknown`.
    pub stars: String,
}

impl CreditsSummary {
    /// Derives all three fields from `credits`.
    #[must_use]
    pub fn from_credits(credits: &TmdbCredits) -> Self {
        Self {
            director: director(credits),
            writers: writers(credits),
            stars: stars(credits),
        }
    }

    /// Summary used when credits could not be loaded.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            director: String::from(UNKNOWN),
            writers: String::from(UNKNOWN),
            stars: String::from(UNKNOWN),
        }
    }
}

/// A YouTube trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerLink {
    /// YouTube video ID.
    pub key: String,
    /// Video title as listed by TMDB.
    pub name: String,
}

impl TrailerLink {
    /// `https://www.youtube.com/watch?v={key}`
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }

    /// `https://www.youtube.com/embed/{key}`
    #[must_use]
    pub fn embed_url(&self) -> String {
        self.watch_url().replace("watch?v=", "embed/")
    }
}
