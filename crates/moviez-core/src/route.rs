//! Route parsing and rendering.
//!
//! Routes use the same URL shapes as the web front end:
//!
//! - `/`
//! - `/detail/{id}`
//! - `/category/{popular|upcoming|top_rated}?page=N`
//! - `/genres?genreIds=A&genreIds=B&page=N` (comma-separated ids accepted)

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use moviez_api::tmdb::MovieList;
use url::Url;

/// Base used to resolve relative route strings.
const ROUTE_BASE: &str = "http://moviez.local/";

/// A navigable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Slider plus listing sections.
    Home,
    /// Movie detail page.
    Detail(u64),
    /// One page of a curated list.
    Category {
        /// Which list.
        list: MovieList,
        /// 1-based page.
        page: u32,
    },
    /// Genre list plus discovery results.
    Genres {
        /// Selected genre IDs (may be empty).
        genre_ids: Vec<u32>,
        /// 1-based page.
        page: u32,
    },
}

impl Route {
    /// Parses a route string such as `/detail/550`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown paths, unknown category segments, or
    /// non-numeric / zero ids and pages.
    pub fn parse(input: &str) -> Result<Self> {
        let base = Url::parse(ROUTE_BASE).context("invalid route base")?;
        let url = base
            .join(input.trim())
            .with_context(|| format!("unknown route: {input}"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let mut page = None;
        let mut genre_ids = Vec::new();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => page = Some(parse_page(&value)?),
                "genreIds" => {
                    for id in value.split(',').filter(|s| !s.is_empty()) {
                        let id: u32 = id
                            .trim()
                            .parse()
                            .with_context(|| format!("invalid genre id: {id}"))?;
                        genre_ids.push(id);
                    }
                }
                _ => {}
            }
        }
        let page = page.unwrap_or(1);

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["detail", id] => {
                let id: u64 = id
                    .parse()
                    .with_context(|| format!("invalid movie id: {id}"))?;
                Ok(Self::Detail(id))
            }
            ["category", segment] => {
                let list = MovieList::from_segment(segment)
                    .with_context(|| format!("unknown category: {segment}"))?;
                Ok(Self::Category { list, page })
            }
            ["genres"] => Ok(Self::Genres { genre_ids, page }),
            _ => bail!("unknown route: {input}"),
        }
    }

    /// Renders the route back to its path form.
    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Detail(id) => format!("/detail/{id}"),
            Self::Category { list, page } => format!("/category/{}?page={page}", list.segment()),
            Self::Genres { genre_ids, page } => {
                let mut path = String::from("/genres?");
                for id in genre_ids {
                    path.push_str(&format!("genreIds={id}&"));
                }
                path.push_str(&format!("page={page}"));
                path
            }
        }
    }

    /// Same route on another page. Routes without paging are unchanged.
    #[must_use]
    pub fn with_page(&self, new_page: u32) -> Self {
        match self {
            Self::Category { list, .. } => Self::Category {
                list: *list,
                page: new_page.max(1),
            },
            Self::Genres { genre_ids, .. } => Self::Genres {
                genre_ids: genre_ids.clone(),
                page: new_page.max(1),
            },
            other => other.clone(),
        }
    }

    /// Current page, if the route is paged.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Category { page, .. } | Self::Genres { page, .. } => Some(*page),
            Self::Home | Self::Detail(_) => None,
        }
    }

    /// Genres route filtered to a single genre.
    #[must_use]
    pub fn genre(id: u32) -> Self {
        Self::Genres {
            genre_ids: vec![id],
            page: 1,
        }
    }
}

fn parse_page(value: &str) -> Result<u32> {
    let page: u32 = value
        .parse()
        .with_context(|| format!("invalid page: {value}"))?;
    if page == 0 {
        bail!("invalid page: 0");
    }
    Ok(page)
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_home() {
        // Arrange & Act & Assert
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
    }

    #[test]
    fn test_parse_detail() {
        // Arrange & Act
        let route = Route::parse("/detail/550").unwrap();

        // Assert
        assert_eq!(route, Route::Detail(550));
    }

    #[test]
    fn test_parse_category_default_page() {
        // Arrange & Act
        let route = Route::parse("/category/top_rated").unwrap();

        // Assert
        assert_eq!(
            route,
            Route::Category {
                list: MovieList::TopRated,
                page: 1
            }
        );
    }

    #[test]
    fn test_parse_genres_repeated_and_comma_ids() {
        // Arrange & Act
        let repeated = Route::parse("/genres?genreIds=28&genreIds=35&page=3").unwrap();
        let comma = Route::parse("/genres?genreIds=28,35&page=3").unwrap();

        // Assert
        let expected = Route::Genres {
            genre_ids: vec![28, 35],
            page: 3,
        };
        assert_eq!(repeated, expected);
        assert_eq!(comma, expected);
    }

    #[test]
    fn test_parse_genres_without_ids() {
        // Arrange & Act
        let route = Route::parse("/genres").unwrap();

        // Assert
        assert_eq!(
            route,
            Route::Genres {
                genre_ids: vec![],
                page: 1
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        // Arrange & Act & Assert
        assert!(Route::parse("/detail/abc").is_err());
        assert!(Route::parse("/category/now_playing").is_err());
        assert!(Route::parse("/category/popular?page=0").is_err());
        assert!(Route::parse("/genres?genreIds=x").is_err());
        let err = Route::parse("/tv/1").unwrap_err().to_string();
        assert!(err.contains("unknown route"));
    }

    #[test]
    fn test_to_path_roundtrip() {
        // Arrange
        let routes = [
            Route::Home,
            Route::Detail(550),
            Route::Category {
                list: MovieList::Upcoming,
                page: 2,
            },
            Route::Genres {
                genre_ids: vec![28, 35],
                page: 1,
            },
        ];

        for route in routes {
            // Act
            let parsed: Route = route.to_path().parse().unwrap();

            // Assert
            assert_eq!(parsed, route);
        }
    }

    #[test]
    fn test_with_page_clamps_to_one() {
        // Arrange
        let route = Route::Category {
            list: MovieList::Popular,
            page: 2,
        };

        // Act & Assert
        assert_eq!(route.with_page(0).page(), Some(1));
        assert_eq!(route.with_page(5).page(), Some(5));
        assert_eq!(Route::Home.with_page(3), Route::Home);
    }
}
