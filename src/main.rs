use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};

use connect_four::client::{load_move_list, GameApi, HttpGameApi, LocalGameApi, Session};
use connect_four::config::AppConfig;
use connect_four::service::{GameService, MoveJournal};
use connect_four::game::{Algorithm, Difficulty, GameMode};
use connect_four::ui::{App, SetupForm};

/// Play Connect Four in the terminal against a game server.
#[derive(Parser, Debug)]
#[command(name = "connect-four", version, about)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the game service URL
    #[arg(long)]
    server: Option<String>,

    /// Run the game service in-process instead of connecting to a server
    #[arg(long)]
    offline: bool,

    /// Load a move list to replay when the game starts
    #[arg(long)]
    moves: Option<PathBuf>,

    /// Preselect the game type: human-human, human-computer or computer-computer
    #[arg(long)]
    game_type: Option<GameMode>,

    /// Preselect the difficulty: easy, medium or expert
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Preselect the algorithm: minimax or negascout
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Override the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(server) = cli.server {
        config.client.base_url = server;
    }
    if let Some(log_file) = cli.log_file {
        config.client.log_file = log_file;
    }

    init_logging(&cli.verbose, &config.client.log_file)?;

    let initial_moves = match &cli.moves {
        Some(path) => load_move_list(path)?,
        None => Vec::new(),
    };
    let mut setup = SetupForm::new(initial_moves);
    setup.game_type = cli.game_type;
    if let Some(difficulty) = cli.difficulty {
        setup.difficulty = difficulty;
    }
    if let Some(algorithm) = cli.algorithm {
        setup.algorithm = algorithm;
    }

    if cli.offline {
        let journal = match &config.server.move_log {
            Some(path) => Some(
                MoveJournal::open(path)
                    .with_context(|| format!("opening move log {}", path.display()))?,
            ),
            None => None,
        };
        let service = Arc::new(GameService::new(config.search, journal));
        log::info!("running offline with an in-process game service");
        run(LocalGameApi::new(service), &config, setup)
    } else {
        let api = HttpGameApi::new(&config.client.base_url, config.client.request_timeout())?;
        log::info!("using game service at {}", api.base_url());
        run(api, &config, setup)
    }
}

/// The terminal owns stdout, so log lines go to a file.
fn init_logging(verbose: &clap_verbosity_flag::Verbosity, path: &Path) -> Result<()> {
    let Some(level) = verbose.log_level() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("initializing logger")?;
    Ok(())
}

fn run<A: GameApi>(api: A, config: &AppConfig, setup: SetupForm) -> Result<()> {
    let session = Session::new(api, config.client.computer_delay());
    let mut app = App::new(session, setup);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even when the app failed
    restore_terminal(&mut terminal);

    res.context("running terminal UI")
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_choices_parse_from_wire_names() {
        let cli = Cli::try_parse_from([
            "connect-four",
            "--game-type",
            "computer-computer",
            "--difficulty",
            "expert",
            "--algorithm",
            "negascout",
        ])
        .unwrap();
        assert_eq!(cli.game_type, Some(GameMode::ComputerComputer));
        assert_eq!(cli.difficulty, Some(Difficulty::Expert));
        assert_eq!(cli.algorithm, Some(Algorithm::Negascout));

        assert!(Cli::try_parse_from(["connect-four", "--difficulty", "impossible"]).is_err());
    }
}
