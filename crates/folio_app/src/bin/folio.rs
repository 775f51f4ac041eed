//! `folio` - inspect the home page layout from the command line

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_animation::{compute_ratio, HeroVisualState};
use folio_app::headless::window_text;
use folio_app::{logging, FolioConfig};
use folio_core::Viewport;
use folio_widgets::{NavSurfaces, NavVisibilityController, Pager};

#[derive(Parser)]
#[command(name = "folio", version, about = "Folio home page tools")]
struct Cli {
    /// Site directory or folio.toml path
    #[arg(short, long, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the hero layout for a scroll position
    Layout {
        /// Vertical scroll offset (px)
        #[arg(long, default_value_t = 0.0)]
        scroll: f32,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 800.0)]
        height: f32,
    },
    /// Print the pager window for a page
    Pager {
        /// Number of articles
        #[arg(long)]
        articles: usize,
        #[arg(long, default_value_t = 6)]
        page_size: usize,
        /// Page to show, or jump input to validate
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// Print the effective configuration
    Config,
    /// Fetch and list the site's article catalog
    #[cfg(feature = "network")]
    Catalog,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = FolioConfig::load_from_dir(&cli.config)?;

    match cli.command {
        Command::Layout {
            scroll,
            width,
            height,
        } => layout(&config, scroll, Viewport::new(width, height)),
        Command::Pager {
            articles,
            page_size,
            page,
        } => pager(articles, page_size, &page),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        #[cfg(feature = "network")]
        Command::Catalog => catalog(&config),
    }
}

fn layout(config: &FolioConfig, scroll: f32, viewport: Viewport) -> Result<()> {
    let ratio = compute_ratio(scroll, viewport.height, config.hero.collapsed_height);
    let state = HeroVisualState::compute(ratio, &config.hero, viewport);

    let mut nav = NavVisibilityController::new(config.nav.clone(), NavSurfaces::default());
    nav.update(ratio);

    println!("ratio            {ratio}");
    println!("container height {}px", state.container_height);
    println!(
        "background       blur({}px) translateY({}px) scale({}) opacity {}",
        state.background_blur,
        state.background_offset_y,
        state.background_scale,
        state.background_opacity
    );
    println!(
        "title            font-size {} ({}px), left {}px, top {}px, translate(-{}%, -50%)",
        state.title_font_size.css(),
        state.title_font_size.resolve_px(viewport),
        state.title_left,
        state.title_top,
        state.title_translate_x
    );
    println!("icon top         {}vh", state.icon_top);
    println!(
        "navigation       {:?}{}",
        nav.visibility(),
        if nav.is_locked() { " (locked)" } else { "" }
    );
    Ok(())
}

fn pager(articles: usize, page_size: usize, input: &str) -> Result<()> {
    let mut pager = Pager::new(articles, page_size);
    let range = pager.jump_to(input)?.or_else(|| pager.current_range());

    println!("{}", window_text(&pager.window()));
    match range {
        Some(range) => println!(
            "page {} of {}: articles {}..={}",
            pager.current_page(),
            pager.max_page(),
            range.start,
            range.end
        ),
        None => println!("page 1 of 1: no articles"),
    }
    Ok(())
}

#[cfg(feature = "network")]
fn catalog(config: &FolioConfig) -> Result<()> {
    use anyhow::Context;
    use folio_content::{Catalog, HttpFetcher};

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let urls = config.content.urls();
    let timeout = config.content.fetch_timeout();
    let fetcher = HttpFetcher::new(timeout)?;
    let catalog = runtime.block_on(Catalog::load(&fetcher, &urls, timeout))?;

    for entry in catalog.entries() {
        let card = if entry.uses_default_card() {
            "default"
        } else {
            "custom"
        };
        println!("{:<12} {:<8} {}", entry.id, card, entry.title);
    }
    println!(
        "{} articles, {} per page",
        catalog.count(),
        catalog.page_size()
    );
    Ok(())
}
