//! moviez - terminal movie discovery front end for TMDB.

/// Application configuration (TOML + environment).
mod config;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use moviez_api::tmdb::{ImageUrls, MovieList, TmdbClient};
use moviez_core::catalog::Catalog;
use moviez_core::model::{CardPage, MovieCard, SectionKind};
use moviez_core::route::Route;
use moviez_tui::state::BrowserSettings;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "moviez", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Write logs to this file instead of the terminal.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies in the terminal UI.
    Browse(BrowseArgs),
    /// Query TMDB and print the result.
    Tmdb(TmdbCommand),
    /// Inspect the configuration.
    Config(ConfigCommand),
    /// Print shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Route to open first (e.g. "/detail/550", "/genres?genreIds=28").
    #[arg(long, default_value = "/")]
    route: String,
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Popular movies.
    Popular(PageArgs),
    /// Upcoming movies.
    Upcoming(PageArgs),
    /// Top rated movies.
    TopRated(PageArgs),
    /// Composed movie detail.
    Detail(MovieIdArgs),
    /// Movies similar to the given one.
    Similar(MovieIdArgs),
    /// Movie genres.
    Genres,
    /// Discover movies by genre.
    Discover(DiscoverArgs),
    /// Search movies by title.
    Search(SearchArgs),
}

/// Page selection.
#[derive(clap::Args)]
struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Movie selection.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: u64,
}

/// Arguments for `tmdb discover`.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Comma-separated genre IDs.
    #[arg(long, value_delimiter = ',', required = true)]
    genre_ids: Vec<u32>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for `tmdb search`.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    #[arg(long)]
    query: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file location.
    Path,
    /// Print the effective config with secrets masked.
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Loads the config file and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let path = AppConfig::path(dir, env_var)?;
    let config = AppConfig::load(&path)?;
    Ok(config.with_env(env_var))
}

/// Reads an environment variable, treating non-UTF-8 values as unset.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Builds the catalog from configuration.
///
/// # Errors
///
/// Returns an error if no API token is configured or the client fails to build.
#[instrument(skip_all)]
fn build_catalog(config: &AppConfig) -> Result<Catalog<TmdbClient>> {
    let mut builder = TmdbClient::builder()
        .base_url(config.base_url()?)
        .api_token(config.api_token()?)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(key) = config.api_key() {
        builder = builder.api_key(key);
    }
    let client = builder.build().context("failed to build TMDB client")?;
    let images = ImageUrls::new(config.image_base_url());

    Ok(Catalog::new(client, images).language(config.language()))
}

/// Logs one card per line.
fn log_cards(cards: &[MovieCard]) {
    tracing::info!("ID\tRating\tYear\tTitle");
    for card in cards {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            card.id,
            card.rating,
            card.year
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            card.title,
        );
    }
}

/// Logs a page of cards with its paging line.
fn log_card_page(page: &CardPage) {
    tracing::info!("Page {}/{}", page.page, page.total_pages);
    log_cards(&page.cards);
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the route is invalid, the catalog cannot be built,
/// or the terminal fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, config: &AppConfig) -> Result<()> {
    let route = Route::parse(&args.route)?;
    let catalog = Arc::new(build_catalog(config)?);
    let settings = BrowserSettings {
        slide_interval: config.slide_interval(),
        search_debounce: config.search_debounce(),
    };
    moviez_tui::run_browser(catalog, route, settings).await
}

/// Runs `tmdb popular|upcoming|top-rated`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the API request fails.
#[instrument(skip_all, fields(list = list.segment()))]
async fn run_tmdb_list(list: MovieList, args: &PageArgs, config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let page = catalog.category(list, args.page).await?;

    tracing::info!("{}", list.title());
    log_card_page(&page);
    Ok(())
}

/// Runs `tmdb detail`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the movie request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_tmdb_detail(args: &MovieIdArgs, config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let view = catalog.detail(args.id).await?;

    tracing::info!("Title:    {}", view.title);
    if let Some(tagline) = &view.tagline {
        tracing::info!("Tagline:  {tagline}");
    }
    tracing::info!("Rating:   {}/10 ({} votes)", view.rating, view.vote_count);
    tracing::info!("Runtime:  {}", view.runtime);
    tracing::info!("Release:  {}", view.release_date);
    tracing::info!("Genres:   {}", view.genre_line());
    tracing::info!("Director: {}", view.credits.director);
    tracing::info!("Writers:  {}", view.credits.writers);
    tracing::info!("Stars:    {}", view.credits.stars);
    tracing::info!("Trailer:  {}", view.trailer_label());
    if let Some(poster) = &view.poster_url {
        tracing::info!("Poster:   {poster}");
    }
    tracing::info!("Overview: {}", view.overview);
    Ok(())
}

/// Runs `tmdb similar`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the API request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_tmdb_similar(args: &MovieIdArgs, config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let kind = SectionKind::MoreLikeThis(args.id);
    let cards = catalog.section(kind).await?;

    tracing::info!("{}", kind.title());
    log_cards(&cards);
    Ok(())
}

/// Runs `tmdb genres`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_genres(config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let genres = catalog.genres().await?;

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    Ok(())
}

/// Runs `tmdb discover`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_discover(args: &DiscoverArgs, config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let page = catalog.discover(&args.genre_ids, args.page).await?;

    log_card_page(&page);
    Ok(())
}

/// Runs `tmdb search`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let catalog = build_catalog(config)?;
    let hits = catalog.search(&args.query).await?;

    tracing::info!("Total results: {}", hits.len());
    for hit in &hits {
        tracing::info!("{}\t{}", hit.id, hit.label());
    }
    Ok(())
}

/// Runs `config path`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved.
fn run_config_path(dir: Option<&Path>) -> Result<()> {
    let path = AppConfig::path(dir, env_var)?;
    tracing::info!("{}", path.display());
    Ok(())
}

/// Runs `config show`.
///
/// # Errors
///
/// Returns an error if serialization fails.
fn run_config_show(config: &AppConfig) -> Result<()> {
    let rendered =
        toml::to_string_pretty(&config.masked()).context("failed to serialize config to TOML")?;
    for line in rendered.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Picks where log output goes.
///
/// The browser owns the terminal, so without `--log-file` its logs are
/// discarded.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
fn log_writer(cli: &Cli) -> Result<BoxMakeWriter> {
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        return Ok(BoxMakeWriter::new(Mutex::new(file)));
    }
    if matches!(cli.command, Commands::Browse(_)) {
        return Ok(BoxMakeWriter::new(io::sink));
    }
    Ok(BoxMakeWriter::new(io::stdout))
}

/// Installs the tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log writer cannot be created.
fn init_tracing(cli: &Cli) -> Result<()> {
    let writer = log_writer(cli)?;
    let ansi = cli.log_file.is_none();

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otlp_enabled = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok();

        let otel_layer = otlp_enabled
            .then(|| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            })
            .flatten();

        let log_layer = otlp_enabled
            .then(|| {
                let exporter = opentelemetry_otlp::LogExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                Some(
                    opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge::new(
                        &logger_provider,
                    ),
                )
            })
            .flatten();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .with(log_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let dir = cli.dir.as_deref();
    match &cli.command {
        Commands::Browse(args) => run_browse(args, &load_config(dir)?).await,
        Commands::Tmdb(tmdb) => {
            let config = load_config(dir)?;
            match &tmdb.command {
                TmdbSubcommands::Popular(args) => {
                    run_tmdb_list(MovieList::Popular, args, &config).await
                }
                TmdbSubcommands::Upcoming(args) => {
                    run_tmdb_list(MovieList::Upcoming, args, &config).await
                }
                TmdbSubcommands::TopRated(args) => {
                    run_tmdb_list(MovieList::TopRated, args, &config).await
                }
                TmdbSubcommands::Detail(args) => run_tmdb_detail(args, &config).await,
                TmdbSubcommands::Similar(args) => run_tmdb_similar(args, &config).await,
                TmdbSubcommands::Genres => run_tmdb_genres(&config).await,
                TmdbSubcommands::Discover(args) => run_tmdb_discover(args, &config).await,
                TmdbSubcommands::Search(args) => run_tmdb_search(args, &config).await,
            }
        }
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Path => run_config_path(dir),
            ConfigSubcommands::Show => run_config_show(&load_config(dir)?),
        },
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "moviez", &mut io::stdout());
            Ok(())
        }
    }
}
