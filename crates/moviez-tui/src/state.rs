//! Browser state management.
//!
//! Owns every fetch slot, the slider timer, the search debounce and the
//! navigation history. Key handling and ticks return [`Command`]s for the
//! event loop to run; finished fetches come back through
//! [`AppState::apply`].

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use moviez_core::catalog::{Request, Response};
use moviez_core::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use moviez_core::derive::TrailerLink;
use moviez_core::fetch::{
    DETAIL_FAILED, Fetch, FetchSlot, GENRES_FAILED, MOVIES_FAILED, Ticket, UNKNOWN_ERROR,
};
use moviez_core::model::{
    CardPage, DetailView, GenreChip, MovieCard, SearchHit, SectionKind, Slide,
};
use moviez_core::route::Route;
use moviez_core::slider::{DEFAULT_SLIDE_INTERVAL, Slider};
use ratatui::widgets::ListState;

/// Timing settings for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Slider auto-advance interval.
    pub slide_interval: Duration,
    /// Search input debounce delay.
    pub search_debounce: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            slide_interval: DEFAULT_SLIDE_INTERVAL,
            search_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search box has focus.
    Search,
}

/// Focused pane on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    /// The image slider.
    Slider,
    /// A listing section, by position.
    Section(usize),
}

/// Focused pane on the genres page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenresPane {
    /// Genre list (left).
    Genres,
    /// Discovery results (right).
    Results,
}

/// Trailer modal source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Trailer of the current slide, fetched on open.
    SlideTrailer {
        /// Slide title.
        title: String,
    },
    /// Trailer of the movie on the detail page.
    DetailTrailer,
}

/// What the trailer modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerStatus<'a> {
    /// Videos still loading.
    Loading,
    /// A YouTube trailer.
    Found(&'a TrailerLink),
    /// No trailer for this movie.
    Missing,
    /// Videos failed to load.
    Failed(&'a str),
}

/// Side effect requested by the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a fetch and deliver its response with this ticket.
    Fetch(Ticket, Request),
    /// Open a URL in the system browser.
    OpenUrl(String),
    /// Leave the browser.
    Quit,
}

/// A finished fetch.
#[derive(Debug)]
pub struct Delivery {
    /// Ticket handed out when the fetch began.
    pub ticket: Ticket,
    /// Tagged result.
    pub response: Response,
}

/// One listing section with its cursor.
#[derive(Debug)]
pub struct SectionState {
    /// Which section.
    pub kind: SectionKind,
    /// Loaded cards.
    pub cards: FetchSlot<Vec<MovieCard>>,
    /// Cursor.
    pub list: ListState,
}

impl SectionState {
    /// Creates an idle section.
    #[must_use]
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            cards: FetchSlot::new(UNKNOWN_ERROR),
            list: ListState::default(),
        }
    }

    /// Starts a fetch for this section.
    fn load(&mut self) -> Command {
        self.list = ListState::default();
        Command::Fetch(self.cards.begin(), Request::Section(self.kind))
    }

    /// Card under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&MovieCard> {
        self.cards.ready()?.get(self.list.selected()?)
    }

    fn len(&self) -> usize {
        self.cards.ready().map_or(0, Vec::len)
    }
}

/// State for the movie browser.
#[derive(Debug)]
pub struct AppState {
    /// Current route.
    pub route: Route,
    /// Previously visited routes.
    history: Vec<Route>,
    /// Timing settings.
    settings: BrowserSettings,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Open trailer modal.
    pub modal: Option<Modal>,

    // Header / search
    /// Search text.
    pub query: String,
    /// Pending search query.
    debounce: Debouncer<String>,
    /// Search dropdown results.
    pub search_results: FetchSlot<Vec<SearchHit>>,
    /// Dropdown cursor.
    pub search_list: ListState,

    // Home
    /// Slider index and timer.
    pub slider: Slider,
    /// Slider slides.
    pub slides: FetchSlot<Vec<Slide>>,
    /// Trailer for the slide modal.
    pub slide_trailer: FetchSlot<Option<TrailerLink>>,
    /// Upcoming, Top Rated and Popular sections.
    pub sections: Vec<SectionState>,
    /// Focused home pane.
    pub home_focus: HomeFocus,

    // Detail
    /// Composed detail view.
    pub detail: FetchSlot<DetailView>,
    /// "More like this" section.
    pub similar: SectionState,

    // Category
    /// Current category page.
    pub category: FetchSlot<CardPage>,
    /// Category cursor.
    pub category_list: ListState,

    // Genres
    /// Genre list.
    pub genres: FetchSlot<Vec<GenreChip>>,
    /// Genre cursor.
    pub genre_list: ListState,
    /// Discovery results.
    pub discover: FetchSlot<CardPage>,
    /// Discovery cursor.
    pub discover_list: ListState,
    /// Focused genres pane.
    pub genres_pane: GenresPane,
}

impl AppState {
    /// Creates an idle state on the home route. Call [`start`](Self::start)
    /// to issue the first fetches.
    #[must_use]
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            route: Route::Home,
            history: Vec::new(),
            settings,
            input_mode: InputMode::Normal,
            modal: None,
            query: String::new(),
            debounce: Debouncer::new(settings.search_debounce),
            search_results: FetchSlot::new(MOVIES_FAILED),
            search_list: ListState::default(),
            slider: Slider::new(settings.slide_interval),
            slides: FetchSlot::new(UNKNOWN_ERROR),
            slide_trailer: FetchSlot::new(UNKNOWN_ERROR),
            sections: SectionKind::HOME
                .into_iter()
                .map(SectionState::new)
                .collect(),
            home_focus: HomeFocus::Slider,
            detail: FetchSlot::new(DETAIL_FAILED),
            similar: SectionState::new(SectionKind::MoreLikeThis(0)),
            category: FetchSlot::new(MOVIES_FAILED),
            category_list: ListState::default(),
            genres: FetchSlot::new(GENRES_FAILED),
            genre_list: ListState::default(),
            discover: FetchSlot::new(MOVIES_FAILED),
            discover_list: ListState::default(),
            genres_pane: GenresPane::Genres,
        }
    }

    /// Enters the first route without recording history.
    pub fn start(&mut self, route: Route) -> Vec<Command> {
        self.enter(route)
    }

    /// Moves to `route`, pushing the current one onto the history.
    pub fn navigate(&mut self, route: Route) -> Vec<Command> {
        self.history.push(self.route.clone());
        self.enter(route)
    }

    /// Re-enters the previous route. Does nothing on the first page.
    pub fn back(&mut self) -> Vec<Command> {
        match self.history.pop() {
            Some(previous) => self.enter(previous),
            None => Vec::new(),
        }
    }

    /// Tears down the current route and fetches everything the new one shows.
    fn enter(&mut self, route: Route) -> Vec<Command> {
        self.leave();
        self.modal = None;
        self.route = route.clone();
        tracing::debug!(route = %route, "entering route");

        match route {
            Route::Home => {
                self.slider = Slider::new(self.settings.slide_interval);
                self.home_focus = HomeFocus::Slider;
                let mut commands = vec![Command::Fetch(self.slides.begin(), Request::Slides)];
                commands.extend(self.sections.iter_mut().map(SectionState::load));
                commands
            }
            Route::Detail(id) => {
                self.similar.kind = SectionKind::MoreLikeThis(id);
                vec![
                    Command::Fetch(self.detail.begin(), Request::Detail(id)),
                    self.similar.load(),
                ]
            }
            Route::Category { list, page } => {
                self.category_list = ListState::default();
                vec![Command::Fetch(
                    self.category.begin(),
                    Request::Category { list, page },
                )]
            }
            Route::Genres { genre_ids, page } => {
                self.genres_pane = GenresPane::Genres;
                self.genre_list = ListState::default();
                self.discover_list = ListState::default();
                let mut commands = vec![Command::Fetch(self.genres.begin(), Request::Genres)];
                if genre_ids.is_empty() {
                    self.discover.reset();
                } else {
                    commands.push(Command::Fetch(
                        self.discover.begin(),
                        Request::Discover { genre_ids, page },
                    ));
                }
                commands
            }
        }
    }

    /// Invalidates the slots of the current route so late responses are dropped.
    fn leave(&mut self) {
        match self.route {
            Route::Home => {
                self.slider.stop();
                self.slides.reset();
                self.slide_trailer.reset();
                for section in &mut self.sections {
                    section.cards.reset();
                }
            }
            Route::Detail(_) => {
                self.detail.reset();
                self.similar.cards.reset();
            }
            Route::Category { .. } => self.category.reset(),
            Route::Genres { .. } => {
                self.genres.reset();
                self.discover.reset();
            }
        }
    }

    /// Applies a finished fetch.
    pub fn apply(&mut self, delivery: Delivery, now: Instant) {
        let Delivery { ticket, response } = delivery;
        match response {
            Response::Slides(result) => {
                if self.slides.resolve(ticket, result) && self.slides.ready().is_some() {
                    self.slider.restart(now);
                }
            }
            Response::Section(kind, result) => {
                let Some(section) = self.section_mut(kind) else {
                    tracing::debug!(
                        section = kind.title(),
                        "dropping response for inactive section"
                    );
                    return;
                };
                if section.cards.resolve(ticket, result) {
                    let len = section.len();
                    select_first(&mut section.list, len);
                }
            }
            Response::Category(result) => {
                if self.category.resolve(ticket, result) {
                    let len = self.category.ready().map_or(0, |p| p.cards.len());
                    select_first(&mut self.category_list, len);
                }
            }
            Response::Discover(result) => {
                if self.discover.resolve(ticket, result) {
                    let len = self.discover.ready().map_or(0, |p| p.cards.len());
                    select_first(&mut self.discover_list, len);
                }
            }
            Response::Genres(result) => {
                if self.genres.resolve(ticket, result) {
                    self.select_route_genre();
                }
            }
            Response::Search(result) => {
                if self.search_results.resolve(ticket, result) {
                    let len = self.search_results.ready().map_or(0, Vec::len);
                    select_first(&mut self.search_list, len);
                }
            }
            Response::Detail(result) => {
                self.detail.resolve(ticket, result);
            }
            Response::Trailer(_, result) => {
                self.slide_trailer.resolve(ticket, result);
            }
        }
    }

    /// Places the genre cursor on the first genre of the current route.
    fn select_route_genre(&mut self) {
        let Some(genres) = self.genres.ready() else {
            return;
        };
        let selected = match &self.route {
            Route::Genres { genre_ids, .. } => genre_ids
                .first()
                .and_then(|id| genres.iter().position(|g| g.id == *id)),
            _ => None,
        };
        let len = genres.len();
        match selected {
            Some(index) => self.genre_list.select(Some(index)),
            None => select_first(&mut self.genre_list, len),
        }
    }

    fn section_mut(&mut self, kind: SectionKind) -> Option<&mut SectionState> {
        match kind {
            SectionKind::MoreLikeThis(_) => {
                (self.similar.kind == kind).then_some(&mut self.similar)
            }
            _ => self.sections.iter_mut().find(|s| s.kind == kind),
        }
    }

    /// Advances timers: the slider and the search debounce.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        self.slider.tick(now);
        match self.debounce.poll(now) {
            Some(query) => vec![Command::Fetch(
                self.search_results.begin(),
                Request::Search(query),
            )],
            None => Vec::new(),
        }
    }

    /// Handles one key press.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        now: Instant,
    ) -> Vec<Command> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Command::Quit];
        }
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key, now),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    /// Handles key input while the search box has focus.
    fn handle_search_input(&mut self, key: KeyCode, now: Instant) -> Vec<Command> {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            KeyCode::Enter => self.open_search_hit(),
            KeyCode::Up => {
                cursor_up(&mut self.search_list);
                Vec::new()
            }
            KeyCode::Down => {
                let len = self.search_results.ready().map_or(0, Vec::len);
                cursor_down(&mut self.search_list, len);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.query_changed(now);
                Vec::new()
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.query_changed(now);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Reschedules the search, or clears results for blank input.
    fn query_changed(&mut self, now: Instant) {
        if self.query.trim().is_empty() {
            self.clear_search();
        } else {
            self.debounce.push(self.query.clone(), now);
        }
    }

    fn clear_search(&mut self) {
        self.debounce.cancel();
        self.search_results.reset();
        self.search_list = ListState::default();
    }

    /// Highlighted search hit.
    #[must_use]
    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.search_results
            .ready()?
            .get(self.search_list.selected()?)
    }

    fn open_search_hit(&mut self) -> Vec<Command> {
        let Some(id) = self.selected_hit().map(|hit| hit.id) else {
            return Vec::new();
        };
        self.input_mode = InputMode::Normal;
        self.query.clear();
        self.clear_search();
        self.navigate(Route::Detail(id))
    }

    /// Handles key input in normal mode.
    fn handle_normal_input(&mut self, key: KeyCode) -> Vec<Command> {
        match key {
            KeyCode::Char('q') => vec![Command::Quit],
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                Vec::new()
            }
            KeyCode::Esc | KeyCode::Backspace => {
                if self.modal.take().is_some() {
                    Vec::new()
                } else {
                    self.back()
                }
            }
            KeyCode::Char('g') => self.navigate(Route::Genres {
                genre_ids: Vec::new(),
                page: 1,
            }),
            KeyCode::Char('h') => self.navigate(Route::Home),
            KeyCode::Left => {
                if self.route == Route::Home {
                    self.slider.retreat();
                }
                Vec::new()
            }
            KeyCode::Right => {
                if self.route == Route::Home {
                    self.slider.advance();
                }
                Vec::new()
            }
            KeyCode::Tab => {
                self.next_pane();
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                Vec::new()
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('m') => self.see_more(),
            KeyCode::Char('t') => self.open_trailer(),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('n') => self.turn_page(true),
            KeyCode::Char('p') => self.turn_page(false),
            _ => Vec::new(),
        }
    }

    /// Cycles the focused pane.
    #[allow(clippy::arithmetic_side_effects)]
    fn next_pane(&mut self) {
        match self.route {
            Route::Home => {
                self.home_focus = match self.home_focus {
                    HomeFocus::Slider => HomeFocus::Section(0),
                    HomeFocus::Section(i) if i + 1 < self.sections.len() => {
                        HomeFocus::Section(i + 1)
                    }
                    HomeFocus::Section(_) => HomeFocus::Slider,
                };
            }
            Route::Genres { .. } => {
                self.genres_pane = match self.genres_pane {
                    GenresPane::Genres => GenresPane::Results,
                    GenresPane::Results => GenresPane::Genres,
                };
            }
            Route::Detail(_) | Route::Category { .. } => {}
        }
    }

    /// Cursor of the focused list and its length.
    fn focused_list(&mut self) -> Option<(&mut ListState, usize)> {
        match self.route {
            Route::Home => match self.home_focus {
                HomeFocus::Slider => None,
                HomeFocus::Section(i) => {
                    let section = self.sections.get_mut(i)?;
                    let len = section.len();
                    Some((&mut section.list, len))
                }
            },
            Route::Detail(_) => {
                let len = self.similar.len();
                Some((&mut self.similar.list, len))
            }
            Route::Category { .. } => {
                let len = self.category.ready().map_or(0, |p| p.cards.len());
                Some((&mut self.category_list, len))
            }
            Route::Genres { .. } => match self.genres_pane {
                GenresPane::Genres => {
                    let len = self.genres.ready().map_or(0, Vec::len);
                    Some((&mut self.genre_list, len))
                }
                GenresPane::Results => {
                    let len = self.discover.ready().map_or(0, |p| p.cards.len());
                    Some((&mut self.discover_list, len))
                }
            },
        }
    }

    fn move_up(&mut self) {
        if let Some((list, _)) = self.focused_list() {
            cursor_up(list);
        }
    }

    fn move_down(&mut self) {
        if let Some((list, len)) = self.focused_list() {
            cursor_down(list, len);
        }
    }

    /// Slide under the slider index, if loaded.
    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides
            .ready()
            .and_then(|slides| self.slider.current(slides))
    }

    /// Route the focused item leads to.
    fn selected_target(&self) -> Option<Route> {
        match &self.route {
            Route::Home => match self.home_focus {
                HomeFocus::Slider => self.current_slide().map(|s| Route::Detail(s.id)),
                HomeFocus::Section(i) => self
                    .sections
                    .get(i)
                    .and_then(SectionState::selected)
                    .map(|c| Route::Detail(c.id)),
            },
            Route::Detail(_) => self.similar.selected().map(|c| Route::Detail(c.id)),
            Route::Category { .. } => selected_card(self.category.state(), &self.category_list)
                .map(|c| Route::Detail(c.id)),
            Route::Genres { .. } => match self.genres_pane {
                GenresPane::Genres => self
                    .genres
                    .ready()
                    .and_then(|g| g.get(self.genre_list.selected()?))
                    .map(|g| Route::genre(g.id)),
                GenresPane::Results => selected_card(self.discover.state(), &self.discover_list)
                    .map(|c| Route::Detail(c.id)),
            },
        }
    }

    fn open_selected(&mut self) -> Vec<Command> {
        self.selected_target()
            .map_or_else(Vec::new, |route| self.navigate(route))
    }

    /// "See more" from the focused home section.
    fn see_more(&mut self) -> Vec<Command> {
        let target = match (&self.route, self.home_focus) {
            (Route::Home, HomeFocus::Section(i)) => self
                .sections
                .get(i)
                .and_then(|s| s.kind.see_more())
                .map(|list| Route::Category { list, page: 1 }),
            _ => None,
        };
        target.map_or_else(Vec::new, |route| self.navigate(route))
    }

    /// Opens the trailer modal for the current slide or detail page.
    fn open_trailer(&mut self) -> Vec<Command> {
        match self.route {
            Route::Home => {
                let Some(slide) = self.current_slide() else {
                    return Vec::new();
                };
                let (id, title) = (slide.id, slide.title.clone());
                self.modal = Some(Modal::SlideTrailer { title });
                vec![Command::Fetch(
                    self.slide_trailer.begin(),
                    Request::Trailer(id),
                )]
            }
            Route::Detail(_) => {
                if self.detail.ready().is_some() {
                    self.modal = Some(Modal::DetailTrailer);
                }
                Vec::new()
            }
            Route::Category { .. } | Route::Genres { .. } => Vec::new(),
        }
    }

    /// Title and content of the open trailer modal.
    #[must_use]
    pub fn modal_trailer(&self) -> Option<(&str, TrailerStatus<'_>)> {
        match self.modal.as_ref()? {
            Modal::SlideTrailer { title } => {
                let status = match self.slide_trailer.state() {
                    Fetch::Idle | Fetch::Loading => TrailerStatus::Loading,
                    Fetch::Ready(Some(link)) => TrailerStatus::Found(link),
                    Fetch::Ready(None) => TrailerStatus::Missing,
                    Fetch::Failed(message) => TrailerStatus::Failed(message),
                };
                Some((title.as_str(), status))
            }
            Modal::DetailTrailer => {
                let view = self.detail.ready()?;
                let status = view
                    .trailer
                    .as_ref()
                    .map_or(TrailerStatus::Missing, TrailerStatus::Found);
                Some((view.title.as_str(), status))
            }
        }
    }

    /// Opens the visible trailer in the system browser.
    fn open_in_browser(&self) -> Vec<Command> {
        if let Some((_, TrailerStatus::Found(link))) = self.modal_trailer() {
            return vec![Command::OpenUrl(link.watch_url())];
        }
        if let Route::Detail(_) = self.route
            && let Some(link) = self.detail.ready().and_then(|v| v.trailer.as_ref())
        {
            return vec![Command::OpenUrl(link.watch_url())];
        }
        Vec::new()
    }

    /// Moves to the next or previous page of a paged route.
    fn turn_page(&mut self, forward: bool) -> Vec<Command> {
        let Some(page) = self.route.page() else {
            return Vec::new();
        };
        let loaded = match self.route {
            Route::Category { .. } => self.category.ready(),
            Route::Genres { .. } => self.discover.ready(),
            Route::Home | Route::Detail(_) => None,
        };
        let target = if forward {
            loaded
                .filter(|p| p.has_next())
                .map(|_| page.saturating_add(1))
        } else {
            (page > 1).then(|| page.saturating_sub(1))
        };
        match target {
            Some(target) => {
                let route = self.route.with_page(target);
                self.navigate(route)
            }
            None => Vec::new(),
        }
    }
}

/// Card under `list`'s cursor in a loaded page.
fn selected_card<'a>(page: &'a Fetch<CardPage>, list: &ListState) -> Option<&'a MovieCard> {
    page.ready()?.cards.get(list.selected()?)
}

fn select_first(list: &mut ListState, len: usize) {
    list.select(if len == 0 { None } else { Some(0) });
}

fn cursor_up(list: &mut ListState) {
    if let Some(current) = list.selected() {
        list.select(Some(current.saturating_sub(1)));
    }
}

fn cursor_down(list: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let next = list
        .selected()
        .map_or(0, |current| current.saturating_add(1))
        .min(len.saturating_sub(1));
    list.select(Some(next));
}
