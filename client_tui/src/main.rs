use std::env;
use std::path::PathBuf;

use game_core::platform::Platform;
use game_core::{Config, Game, GameError, GameRng};
use ratatui::DefaultTerminal;

mod canvas;
mod keys;
mod logging;
mod terminal;

use crate::terminal::TerminalPlatform;

const CONFIG_ENV: &str = "PONG_CONFIG";
const DEFAULT_CONFIG: &str = "pong.toml";
const LOG_FILE: &str = "pong.log";

fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from)
}

fn run(terminal: DefaultTerminal, config: Config) -> Result<(u32, u32), GameError> {
    let mut platform = TerminalPlatform::new(terminal, &config)?;
    let mut game = Game::new(config, platform.screen(), GameRng::from_clock());
    game.run(&mut platform)?;
    Ok(game.scores())
}

fn main() -> Result<(), GameError> {
    let log_path = env::temp_dir().join(LOG_FILE);
    if let Err(err) = logging::init(&log_path) {
        eprintln!("logging disabled: {err}");
    }

    let config = Config::load(config_path())?;

    let terminal = ratatui::init();
    let result = run(terminal, config);
    ratatui::restore();

    match result {
        Ok((player1, player2)) => {
            println!("Final Score: {player1} - {player2}");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "game aborted");
            eprintln!("pong: {err}");
            Err(err)
        }
    }
}
