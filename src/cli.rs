use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{resolve_theme, Preferences, Settings, DEFAULT_CONFIG_FILE};
use crate::games::{get_all_games, get_game};
use crate::hub::Hub;

#[derive(Parser, Debug)]
#[command(name = "gamehub")]
#[command(about = "🕹️ Casual games for the terminal: Where Fun Meets Focus!")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Start in dark mode
    #[arg(long, global = true, conflicts_with = "light")]
    pub dark: bool,

    /// Start in light mode
    #[arg(long, global = true)]
    pub light: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Jump straight into a game
    Play {
        /// Game id, see `gamehub list`
        game: String,
    },
    /// List available games
    List,
}

impl Cli {
    /// Theme requested on the command line, if any.
    pub fn theme_override(&self) -> Option<bool> {
        match (self.dark, self.light) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(&cli.config)?;

    match cli.command {
        Some(Commands::List) => {
            println!("🎮 Available games:");
            println!();
            for game in get_all_games() {
                println!("📦 {} ({})", game.info.name, game.info.id);
                println!("   {}", game.info.description);
                println!();
            }
            Ok(())
        }
        Some(Commands::Play { ref game }) => {
            if get_game(game).is_none() {
                let known: Vec<_> = get_all_games().iter().map(|g| g.info.id).collect();
                return Err(anyhow!(
                    "❌ Game '{}' not found. Available: {}",
                    game,
                    known.join(", ")
                ));
            }
            init_logging(&settings)?;
            let mut hub = hub_for(&cli, settings);
            let mut terminal = ratatui::init();
            let result = hub.play(&mut terminal, game).await;
            ratatui::restore();
            result
        }
        None => {
            init_logging(&settings)?;
            let mut hub = hub_for(&cli, settings);
            let mut terminal = ratatui::init();
            let result = hub.run(&mut terminal).await;
            ratatui::restore();
            result
        }
    }
}

fn hub_for(cli: &Cli, settings: Settings) -> Hub {
    let saved = Preferences::load(&settings.state_file);
    let theme = resolve_theme(cli.theme_override(), saved, &settings);
    Hub::new(settings, theme)
}

/// Stdout belongs to the TUI, so logs go to a file.
fn init_logging(settings: &Settings) -> Result<()> {
    let log_file = std::fs::File::create(&settings.log_file)
        .with_context(|| format!("failed to create log file {}", settings.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log_file = %settings.log_file.display(), "logging initialised");
    Ok(())
}
