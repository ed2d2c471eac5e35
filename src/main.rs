use std::io;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod editor;
mod input;
mod menu;
mod registry;
mod render;
mod scripting;

use app::App;
use config::ConfigEngine;
use input::ConsoleInput;
use menu::Controller;
use scripting::RhaiExecutor;

fn main() -> io::Result<()> {
    // Logs go to stderr; stdout belongs to the interactive session
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "scribe=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load user config, falling back to defaults
    let mut config = ConfigEngine::new();
    if let Err(e) = config.load_default() {
        tracing::warn!(error = %e, "init file failed, using defaults");
    }
    let settings = config.settings();

    let executor = RhaiExecutor::new(&settings);
    let app = App::new(settings, Box::new(executor), io::stdout());

    let mut input = ConsoleInput::new()?;
    Controller::new(app).run(&mut input)
}
