use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use blog_explorer::action::Action;
use blog_explorer::api::HttpPostSource;
use blog_explorer::app::App;
use blog_explorer::cache::FetchCache;
use blog_explorer::config::{Config, API_URL_ENV};
use blog_explorer::error::Result;
use blog_explorer::event::Event;
use blog_explorer::tui::{self, EventHandler};
use blog_explorer::{logging, ui};

/// Browse blog posts from a JSON REST API in the terminal
#[derive(Parser, Debug)]
#[command(name = "blog-explorer", version, about)]
struct Cli {
    /// Base URL of the posts API (overrides config and BLOG_EXPLORER_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init();

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    }
    .with_overrides(std::env::var(API_URL_ENV).ok(), cli.api_url);

    tracing::info!(base_url = %config.api.base_url, "starting");

    let source = HttpPostSource::new(&config.api.base_url, config.api.timeout())?;
    let cache = FetchCache::new(Arc::new(source));

    // Run the application
    let result = run(cache).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(cache: FetchCache) -> Result<()> {
    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(cache, action_tx.clone());
    let mut view_changes = app.store.subscribe();

    // Create event handler
    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    // Main loop
    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if action != Action::None {
                            action_tx.send(action).ok();
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
            // Selection and theme changes redraw without waiting for the next frame
            Ok(()) = view_changes.changed() => {
                terminal.draw(|frame| ui::render(frame, &app))?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
