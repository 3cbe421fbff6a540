mod app;
mod cli;
mod config;
mod db;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Quiet by default; --debug or RUST_LOG opens it up. Logs go to stderr
    // so they don't fight the alternate screen.
    let default_directive = if args.debug {
        "techradar_tui=debug,techradar_layout=debug"
    } else {
        "techradar_tui=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let database_url = config::init_app_config()?;
    let settings = config::radar_settings();
    let seed = args.seed.unwrap_or_else(rand::random);

    // Initialize application state
    let mut app = App::new(settings, seed);

    // A broken database degrades to the built-in demo radar.
    if let Err(e) = app.initialize_db(&database_url).await {
        warn!("database unavailable ({e}), continuing with demo data");
        app.load_fallback_blips();
    }

    // Headless mode when asked for, or when stdout is not a terminal.
    if args.headless || !is_terminal() {
        return event::run_headless(&app, args.json).await;
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
