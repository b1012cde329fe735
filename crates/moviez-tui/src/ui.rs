//! Browser rendering logic.

use moviez_core::fetch::Fetch;
use moviez_core::format::NO_TRAILER;
use moviez_core::model::{CardPage, MovieCard};
use moviez_core::route::Route;
use moviez_core::slider::SLIDE_COUNT;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::state::{AppState, GenresPane, HomeFocus, InputMode, SectionState, TrailerStatus};

/// Text shown while a fetch is in flight.
const LOADING: &str = "Loading...";

/// Draws the whole browser.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header / search
            Constraint::Min(5),    // route content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    match state.route.clone() {
        Route::Home => draw_home(frame, chunks[1], state),
        Route::Detail(_) => draw_detail(frame, chunks[1], state),
        Route::Category { list, page } => {
            let title = format!(" {} ", list.title());
            draw_card_page(
                frame,
                chunks[1],
                &title,
                page,
                state.category.state(),
                &mut state.category_list,
                true,
            );
        }
        Route::Genres { page, .. } => draw_genres(frame, chunks[1], state, page),
    }

    draw_footer(frame, chunks[2], state);

    if state.input_mode == InputMode::Search {
        draw_search_dropdown(frame, chunks[1], state);
    }
    if state.modal.is_some() {
        let area = frame.area();
        draw_trailer_modal(frame, area, state);
    }
}

/// Border style for a pane, cyan when focused.
fn pane_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Placeholder line for a fetch that has nothing to show yet.
fn placeholder<T>(fetch: &Fetch<T>) -> Option<&str> {
    match fetch {
        Fetch::Idle => Some(""),
        Fetch::Loading => Some(LOADING),
        Fetch::Failed(message) => Some(message),
        Fetch::Ready(_) => None,
    }
}

/// Draws the header with the search box and the current route.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.query.clone())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let route = Paragraph::new(state.route.to_path())
        .block(Block::default().borders(Borders::ALL).title(" moviez "));
    frame.render_widget(route, header_chunks[1]);
}

/// Draws the slider above the three listing sections.
#[allow(clippy::indexing_slicing)]
fn draw_home(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    draw_slider(frame, chunks[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    let focus = state.home_focus;
    for (i, (section, column)) in state.sections.iter_mut().zip(columns.iter()).enumerate() {
        draw_section(frame, *column, section, focus == HomeFocus::Section(i));
    }
}

/// Draws the current slide.
fn draw_slider(frame: &mut Frame, area: Rect, state: &AppState) {
    let border = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing ")
        .border_style(pane_style(state.home_focus == HomeFocus::Slider));

    let position = format!("{}/{SLIDE_COUNT}", state.slider.index().saturating_add(1));
    let lines = match (placeholder(state.slides.state()), state.current_slide()) {
        (Some(text), _) => vec![Line::from(text.to_owned())],
        (None, Some(slide)) => vec![
            Line::from(vec![
                Span::styled("Now Playing: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    slide.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("{}/10", slide.rating)),
            Line::from(slide.overview.clone()),
            Line::from(position),
        ],
        (None, None) => vec![Line::from(position)],
    };

    let slider = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(border);
    frame.render_widget(slider, area);
}

/// Draws one listing section.
fn draw_section(frame: &mut Frame, area: Rect, section: &mut SectionState, active: bool) {
    let mut title = format!(" {} ", section.kind.title());
    if section.kind.see_more().is_some() {
        title.push_str("(m: see more) ");
    }
    let items = match placeholder(section.cards.state()) {
        Some(text) => vec![ListItem::new(text.to_owned())],
        None => card_items(section.cards.ready().map_or(&[][..], Vec::as_slice)),
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(pane_style(active)),
        )
        .highlight_style(highlight_style());
    frame.render_stateful_widget(list, area, &mut section.list);
}

/// Yellow `Name: ` prefix of a detail row.
fn label(name: &str) -> Span<'static> {
    Span::styled(format!("{name}: "), Style::default().fg(Color::Yellow))
}

fn card_items(cards: &[MovieCard]) -> Vec<ListItem<'static>> {
    cards
        .iter()
        .map(|card| {
            let year = card.year.map_or_else(String::new, |y| format!(" ({y})"));
            ListItem::new(format!("{}{year}  \u{2605} {}", card.title, card.rating))
        })
        .collect()
}

/// Draws the composed detail page and "More like this".
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let lines = match (placeholder(state.detail.state()), state.detail.ready()) {
        (None, Some(view)) => {
            let mut lines = vec![Line::from(Span::styled(
                view.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(tagline) = &view.tagline {
                lines.push(Line::from(Span::styled(
                    tagline.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            lines.extend([
                Line::from(""),
                Line::from(vec![
                    label("Rating"),
                    Span::raw(format!("{}/10 ({} votes)", view.rating, view.vote_count)),
                ]),
                Line::from(vec![label("Runtime"), Span::raw(&view.runtime)]),
                Line::from(vec![label("Release"), Span::raw(&view.release_date)]),
                Line::from(vec![label("Genres"), Span::raw(view.genre_line())]),
                Line::from(vec![label("Director"), Span::raw(&view.credits.director)]),
                Line::from(vec![label("Writers"), Span::raw(&view.credits.writers)]),
                Line::from(vec![label("Stars"), Span::raw(&view.credits.stars)]),
                Line::from(vec![label("Trailer"), Span::raw(view.trailer_label())]),
                Line::from(""),
                Line::from(view.overview.clone()),
            ]);
            lines
        }
        (text, _) => vec![Line::from(text.unwrap_or_default().to_owned())],
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Detail "));
    frame.render_widget(detail, chunks[0]);

    draw_section(frame, chunks[1], &mut state.similar, true);
}

/// Draws one page of cards with its paging info.
fn draw_card_page(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    page: u32,
    fetch: &Fetch<CardPage>,
    list_state: &mut ListState,
    active: bool,
) {
    let (items, paging) = match (placeholder(fetch), fetch.ready()) {
        (None, Some(loaded)) => (
            card_items(&loaded.cards),
            format!("{title}page {}/{} ", loaded.page, loaded.total_pages),
        ),
        (text, _) => (
            vec![ListItem::new(text.unwrap_or_default().to_owned())],
            format!("{title}page {page} "),
        ),
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(paging)
                .border_style(pane_style(active)),
        )
        .highlight_style(highlight_style());
    frame.render_stateful_widget(list, area, list_state);
}

/// Draws the genre list and the discovery results.
#[allow(clippy::indexing_slicing)]
fn draw_genres(frame: &mut Frame, area: Rect, state: &mut AppState, page: u32) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let items = match placeholder(state.genres.state()) {
        Some(text) => vec![ListItem::new(text.to_owned())],
        None => state
            .genres
            .ready()
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|genre| ListItem::new(genre.name.clone()))
            .collect(),
    };
    let genres = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Genres ")
                .border_style(pane_style(state.genres_pane == GenresPane::Genres)),
        )
        .highlight_style(highlight_style());
    frame.render_stateful_widget(genres, chunks[0], &mut state.genre_list);

    let results_active = state.genres_pane == GenresPane::Results;
    if matches!(state.discover.state(), Fetch::Idle) {
        let hint = Paragraph::new("Select a genre to discover movies.").block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Results ")
                .border_style(pane_style(results_active)),
        );
        frame.render_widget(hint, chunks[1]);
    } else {
        draw_card_page(
            frame,
            chunks[1],
            " Results ",
            page,
            state.discover.state(),
            &mut state.discover_list,
            results_active,
        );
    }
}

/// Draws the search dropdown over the top of the content area.
fn draw_search_dropdown(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let items = match placeholder(state.search_results.state()) {
        Some(text) => vec![ListItem::new(text.to_owned())],
        None => state
            .search_results
            .ready()
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|hit| ListItem::new(hit.label()))
            .collect(),
    };
    let height = u16::try_from(items.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let dropdown = Rect {
        height,
        width: area.width.saturating_mul(3) / 5,
        ..area
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Results ")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(highlight_style());
    frame.render_widget(Clear, dropdown);
    frame.render_stateful_widget(list, dropdown, &mut state.search_list);
}

/// Draws the trailer modal centered on `area`.
fn draw_trailer_modal(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some((title, status)) = state.modal_trailer() else {
        return;
    };
    let lines = match status {
        TrailerStatus::Loading => vec![Line::from(LOADING)],
        TrailerStatus::Found(link) => vec![
            Line::from(link.name.clone()),
            Line::from(link.watch_url()),
            Line::from(Span::styled(
                link.embed_url(),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        TrailerStatus::Missing => vec![Line::from(NO_TRAILER)],
        TrailerStatus::Failed(message) => vec![Line::from(message.to_owned())],
    };

    let popup = popup_area(area, 60, 7);
    let modal = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(modal, popup);
}

/// Centered rectangle of `percent_x` width and `height` rows.
fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[&str] = if state.modal.is_some() {
        &["o: open in browser", "Esc: close"]
    } else if state.input_mode == InputMode::Search {
        &[
            "Type to search",
            "\u{2191}\u{2193}: move",
            "Enter: open",
            "Esc: leave",
        ]
    } else {
        match state.route {
            Route::Home => &[
                "\u{2190}\u{2192}: slide",
                "Tab: pane",
                "\u{2191}\u{2193}: move",
                "Enter: open",
                "m: see more",
                "t: trailer",
                "/: search",
                "g: genres",
                "q: quit",
            ],
            Route::Detail(_) => &[
                "\u{2191}\u{2193}: move",
                "Enter: open",
                "t: trailer",
                "o: open trailer",
                "Esc: back",
                "/: search",
                "q: quit",
            ],
            Route::Category { .. } => &[
                "\u{2191}\u{2193}: move",
                "Enter: open",
                "n/p: page",
                "Esc: back",
                "h: home",
                "q: quit",
            ],
            Route::Genres { .. } => &[
                "Tab: pane",
                "\u{2191}\u{2193}: move",
                "Enter: select",
                "n/p: page",
                "Esc: back",
                "h: home",
                "q: quit",
            ],
        }
    };

    let block = Block::default().borders(Borders::ALL);
    let footer = Paragraph::new(Line::from(hints.join("  "))).block(block);
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Instant;

    use moviez_core::catalog::{Request, Response};
    use moviez_core::model::Slide;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::state::{BrowserSettings, Command, Delivery};

    fn rendered(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_home_shows_current_slide() {
        // Arrange
        let mut state = AppState::new(BrowserSettings::default());
        let commands = state.start(Route::Home);
        let ticket = commands
            .iter()
            .find_map(|command| match command {
                Command::Fetch(ticket, Request::Slides) => Some(*ticket),
                _ => None,
            })
            .unwrap();
        state.apply(
            Delivery {
                ticket,
                response: Response::Slides(Ok(vec![Slide {
                    id: 1,
                    title: String::from("Dune"),
                    rating: String::from("8.1"),
                    overview: String::from("Spice."),
                    backdrop_url: None,
                }])),
            },
            Instant::now(),
        );

        // Act
        let screen = rendered(&mut state);

        // Assert
        assert!(screen.contains("Now Playing: Dune"));
        assert!(screen.contains("8.1/10"));
        assert!(screen.contains("1/10"));
        assert!(screen.contains(LOADING));
        assert!(screen.contains("m: see more  t: trailer"));
    }

    #[test]
    fn test_genres_page_without_selection_shows_hint() {
        // Arrange
        let mut state = AppState::new(BrowserSettings::default());
        state.start(Route::Genres {
            genre_ids: Vec::new(),
            page: 1,
        });

        // Act
        let screen = rendered(&mut state);

        // Assert
        assert!(screen.contains("Select a genre"));
    }

    #[test]
    fn test_popup_area_is_centered() {
        // Arrange
        let area = Rect::new(0, 0, 100, 21);

        // Act
        let popup = popup_area(area, 60, 7);

        // Assert
        assert_eq!(popup, Rect::new(20, 7, 60, 7));
    }
}
