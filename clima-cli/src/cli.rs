use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use clima_core::{Config, DisplayMode, MemoryStore, WeatherApp};

use crate::{configure, render, screen};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Clima atual de qualquer cidade")]
pub struct Cli {
    /// Do not read or write the last searched city on disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive search screen (default).
    Search,

    /// Look up one city and print its weather.
    Show {
        /// City name, e.g. "São Paulo".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Edit endpoints, language and timeout interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Search) {
            Command::Configure => configure::run(),
            Command::Search => {
                let app = build_app(self.ephemeral)?;
                screen::run(&app).await
            }
            Command::Show { city } => {
                let app = build_app(self.ephemeral)?;
                app.lookup(&city.join(" ")).await;

                let state = app.state();
                if let DisplayMode::Error(message) = state.mode() {
                    bail!("{message}");
                }
                print!("{}", render::render(&state));
                Ok(())
            }
        }
    }
}

fn build_app(ephemeral: bool) -> anyhow::Result<WeatherApp> {
    let config = Config::load()?;
    if ephemeral {
        WeatherApp::with_store(&config, Arc::new(MemoryStore::new()))
    } else {
        WeatherApp::from_config(&config)
    }
}
