//! Render-ready view models.
//!
//! Each model keeps only the fields its component shows, already
//! formatted, so the front end never touches raw API records.

use moviez_api::tmdb::{
    ImageUrls, MovieList, TmdbCredits, TmdbGenre, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbMovieSummary, TmdbVideos,
};

use crate::derive::{self, CreditsSummary, TrailerLink};
use crate::format::{
    NO_TRAILER, NOT_AVAILABLE, format_rating, format_runtime_opt, genre_line, release_year,
};

/// Number of slides the home slider shows.
pub const SLIDE_LIMIT: usize = 10;
/// Number of similar movies in "More like this".
pub const SIMILAR_LIMIT: usize = 5;
/// Number of cards in the Top Rated and Popular sections.
pub const SECTION_LIMIT: usize = 10;
/// Number of discovery results on the genres page.
pub const DISCOVER_LIMIT: usize = 20;

/// A movie card in a listing section or grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title (original title, falling back to the localized one).
    pub title: String,
    /// Vote average with one decimal.
    pub rating: String,
    /// Release year.
    pub year: Option<i32>,
    /// Poster URL.
    pub poster_url: Option<String>,
}

impl MovieCard {
    /// Builds a card from a list entry.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: display_title(movie.original_title.as_deref(), movie.title.as_deref()),
            rating: format_rating(movie.vote_average),
            year: release_year(movie.release_date.as_deref()),
            poster_url: images.url(movie.poster_path.as_deref()),
        }
    }
}

/// Builds up to `limit` cards (all when `None`) in source order.
#[must_use]
pub fn cards(
    movies: &[TmdbMovieSummary],
    limit: Option<usize>,
    images: &ImageUrls,
) -> Vec<MovieCard> {
    movies
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|movie| MovieCard::from_summary(movie, images))
        .collect()
}

/// One slide of the home slider.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// TMDB movie ID.
    pub id: u64,
    /// Original title.
    pub title: String,
    /// Vote average with one decimal.
    pub rating: String,
    /// Overview text.
    pub overview: String,
    /// Backdrop URL.
    pub backdrop_url: Option<String>,
}

impl Slide {
    /// Builds a slide from a list entry.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: display_title(movie.original_title.as_deref(), movie.title.as_deref()),
            rating: format_rating(movie.vote_average),
            overview: movie.overview.clone().unwrap_or_default(),
            backdrop_url: images.url(movie.backdrop_path.as_deref()),
        }
    }
}

/// A search dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Release year.
    pub year: Option<i32>,
}

impl SearchHit {
    /// Builds a hit from a search result.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary) -> Self {
        Self {
            id: movie.id,
            title: display_title(movie.title.as_deref(), movie.original_title.as_deref()),
            year: release_year(movie.release_date.as_deref()),
        }
    }

    /// `Title (1999)` or just `Title`.
    #[must_use]
    pub fn label(&self) -> String {
        self.year
            .map_or_else(|| self.title.clone(), |y| format!("{} ({y})", self.title))
    }
}

/// A genre entry on the genres page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreChip {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

impl From<&TmdbGenre> for GenreChip {
    fn from(genre: &TmdbGenre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

/// A page of cards with paging info.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPage {
    /// Current page.
    pub page: u32,
    /// Total pages reported by the API.
    pub total_pages: u32,
    /// Cards on this page.
    pub cards: Vec<MovieCard>,
}

impl CardPage {
    /// Builds a page keeping up to `limit` cards.
    #[must_use]
    pub fn from_response(
        response: &TmdbMovieListResponse,
        limit: Option<usize>,
        images: &ImageUrls,
    ) -> Self {
        Self {
            page: response.page,
            total_pages: response.total_pages,
            cards: cards(&response.results, limit, images),
        }
    }

    /// Returns `true` if a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Composed detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Overview text.
    pub overview: String,
    /// Vote average with one decimal.
    pub rating: String,
    /// Vote count.
    pub vote_count: u32,
    /// Runtime as `{h}h {m}m`.
    pub runtime: String,
    /// Release date or `N/A`.
    pub release_date: String,
    /// Genre names, in order.
    pub genres: Vec<String>,
    /// Director, writers and stars.
    pub credits: CreditsSummary,
    /// YouTube trailer.
    pub trailer: Option<TrailerLink>,
    /// Poster URL.
    pub poster_url: Option<String>,
    /// Backdrop URL.
    pub backdrop_url: Option<String>,
}

impl DetailView {
    /// Composes the detail view.
    ///
    /// Missing credits or videos degrade to the `Unknown` and no-trailer
    /// fallbacks.
    #[must_use]
    pub fn compose(
        details: &TmdbMovieDetails,
        credits: Option<&TmdbCredits>,
        videos: Option<&TmdbVideos>,
        images: &ImageUrls,
    ) -> Self {
        let release_date = details
            .release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NOT_AVAILABLE);
        Self {
            id: details.id,
            title: display_title(details.title.as_deref(), details.original_title.as_deref()),
            tagline: details.tagline.clone().filter(|t| !t.is_empty()),
            overview: details.overview.clone().unwrap_or_default(),
            rating: format_rating(details.vote_average),
            vote_count: details.vote_count,
            runtime: format_runtime_opt(details.runtime),
            release_date: String::from(release_date),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            credits: credits.map_or_else(CreditsSummary::unknown, CreditsSummary::from_credits),
            trailer: videos.and_then(|v| derive::trailer(&v.results)),
            poster_url: images.url(details.poster_path.as_deref()),
            backdrop_url: images.url(details.backdrop_path.as_deref()),
        }
    }

    /// Genre line, or `No genres available`.
    #[must_use]
    pub fn genre_line(&self) -> String {
        genre_line(&self.genres)
    }

    /// Trailer watch URL, or `No trailer available`.
    #[must_use]
    pub fn trailer_label(&self) -> String {
        self.trailer
            .as_ref()
            .map_or_else(|| String::from(NO_TRAILER), TrailerLink::watch_url)
    }
}

/// Listing sections shown on the home and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Upcoming releases (whole first page).
    Upcoming,
    /// Top rated (first 10).
    TopRated,
    /// Popular (first 10).
    Popular,
    /// Similar to the given movie (first 5).
    MoreLikeThis(u64),
}

impl SectionKind {
    /// Home page sections in display order.
    pub const HOME: [Self; 3] = [Self::Upcoming, Self::TopRated, Self::Popular];

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::TopRated => "Top Rated",
            Self::Popular => "Popular",
            Self::MoreLikeThis(_) => "More like this",
        }
    }

    /// Maximum number of cards, `None` for all.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Upcoming => None,
            Self::TopRated | Self::Popular => Some(SECTION_LIMIT),
            Self::MoreLikeThis(_) => Some(SIMILAR_LIMIT),
        }
    }

    /// Category reached through "See more".
    #[must_use]
    pub const fn see_more(self) -> Option<MovieList> {
        match self {
            Self::Upcoming => Some(MovieList::Upcoming),
            Self::TopRated => Some(MovieList::TopRated),
            Self::Popular => Some(MovieList::Popular),
            Self::MoreLikeThis(_) => None,
        }
    }
}

fn display_title(preferred: Option<&str>, fallback: Option<&str>) -> String {
    [preferred, fallback]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::format::NO_GENRES;

    fn popular() -> TmdbMovieListResponse {
        serde_json::from_str(include_str!("../../../fixtures/tmdb/movie_popular.json")).unwrap()
    }

    #[test]
    fn test_cards_respect_limit() {
        // Arrange
        let response = popular();
        let images = ImageUrls::default();

        // Act
        let limited = cards(&response.results, Some(SECTION_LIMIT), &images);
        let all = cards(&response.results, None, &images);

        // Assert
        assert_eq!(limited.len(), 10);
        assert_eq!(all.len(), 12);
    }

    #[test]
    fn test_card_uses_original_title_and_poster() {
        // Arrange
        let response = popular();
        let images = ImageUrls::default();

        // Act
        let card = MovieCard::from_summary(&response.results[1], &images);

        // Assert
        assert_eq!(card.title, "Le Deuxième");
        assert_eq!(card.rating, "6.5");
        assert_eq!(card.year, Some(2024));
        assert_eq!(
            card.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/poster02.jpg")
        );
    }

    #[test]
    fn test_slide_from_summary() {
        // Arrange
        let response = popular();
        let images = ImageUrls::default();

        // Act
        let slide = Slide::from_summary(&response.results[0], &images);

        // Assert
        assert_eq!(slide.id, 1001);
        assert_eq!(slide.title, "Popular One");
        assert_eq!(slide.rating, "7.8");
        assert_eq!(slide.overview, "First popular movie.");
    }

    #[test]
    fn test_null_text_fields_degrade_to_fallbacks() {
        // Arrange
        let response: TmdbMovieListResponse = serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_list_null_text.json"
        ))
        .unwrap();
        let images = ImageUrls::default();

        // Act
        let page = CardPage::from_response(&response, None, &images);
        let slide = Slide::from_summary(&response.results[1], &images);
        let hit = SearchHit::from_summary(&response.results[1]);

        // Assert
        assert_eq!(page.cards.len(), 2);
        assert_eq!(page.cards[1].title, "Sans Titre");
        assert_eq!(slide.overview, "");
        assert!(slide.backdrop_url.is_none());
        assert_eq!(hit.label(), "Sans Titre");
    }

    #[test]
    fn test_search_hit_label() {
        // Arrange
        let response = popular();

        // Act
        let dated = SearchHit::from_summary(&response.results[0]);
        let undated = SearchHit::from_summary(&response.results[11]);

        // Assert
        assert_eq!(dated.label(), "Popular One (2024)");
        assert_eq!(undated.label(), "Popular Twelve");
    }

    #[test]
    fn test_detail_compose_fight_club() {
        // Arrange
        let details: TmdbMovieDetails = serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_details_550.json"
        ))
        .unwrap();
        let credits: TmdbCredits = serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_credits_550.json"
        ))
        .unwrap();
        let videos: TmdbVideos = serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_videos_550.json"
        ))
        .unwrap();

        // Act
        let view = DetailView::compose(
            &details,
            Some(&credits),
            Some(&videos),
            &ImageUrls::default(),
        );

        // Assert
        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.runtime, "2h 19m");
        assert_eq!(view.rating, "8.4");
        assert_eq!(view.genre_line(), "Drama, Thriller, Comedy");
        assert_eq!(view.credits.director, "David Fincher");
        assert_eq!(
            view.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
        assert_eq!(
            view.trailer_label(),
            "https://www.youtube.com/watch?v=O-b2VfmmbyA"
        );
    }

    #[test]
    fn test_detail_compose_without_genres_or_extras() {
        // Arrange
        let details: TmdbMovieDetails = serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_details_no_genres.json"
        ))
        .unwrap();

        // Act
        let view = DetailView::compose(&details, None, None, &ImageUrls::default());

        // Assert
        assert_eq!(view.genre_line(), NO_GENRES);
        assert_eq!(view.trailer_label(), NO_TRAILER);
        assert_eq!(view.credits, CreditsSummary::unknown());
        assert_eq!(view.runtime, NOT_AVAILABLE);
        assert_eq!(view.release_date, NOT_AVAILABLE);
        assert!(view.poster_url.is_none());
    }

    #[test]
    fn test_section_limits() {
        // Arrange & Act & Assert
        assert_eq!(SectionKind::Upcoming.limit(), None);
        assert_eq!(SectionKind::TopRated.limit(), Some(10));
        assert_eq!(SectionKind::Popular.limit(), Some(10));
        assert_eq!(SectionKind::MoreLikeThis(550).limit(), Some(5));
        assert_eq!(SectionKind::MoreLikeThis(550).see_more(), None);
        assert_eq!(SectionKind::TopRated.see_more(), Some(MovieList::TopRated));
    }

    #[test]
    fn test_card_page_has_next() {
        // Arrange
        let response = popular();

        // Act
        let page = CardPage::from_response(&response, None, &ImageUrls::default());

        // Assert
        assert!(page.has_next());
        assert_eq!(page.page, 1);
    }
}
