use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mcp::{
    error_chain, run_local_match, run_remote_client, Config, GameResult, NetworkFailure,
    PlayerConfig, RemoteResult,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tron::{self_check, visualize, GameState, Grid};

/// A program to coordinate tron bots fighting each other. Named after the
/// Master Control Program from the Tron movies.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Number of columns of the board
    #[arg(long, global = true, default_value_t = 30)]
    width: i32,

    /// Number of rows of the board, including the two poles
    #[arg(long, global = true, default_value_t = 30)]
    height: i32,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Mode {
    /// Run a game locally
    Local {
        /// Path to the config JSON file of player 1. Without it, start.sh
        /// (start.bat on Windows) in the current directory is run.
        #[arg(long)]
        player1: Option<PathBuf>,

        /// Path to the config JSON file of player 2
        #[arg(long)]
        player2: Option<PathBuf>,

        /// The initial game state. Otherwise one is randomly generated
        #[arg(long)]
        game_state: Option<PathBuf>,

        /// RNG seed for the initial game state
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Take part in a remote game
    Remote {
        /// Path to the config JSON file of your player
        #[arg(long)]
        player: Option<PathBuf>,

        /// Seconds to wait between asking the server for news
        #[arg(long, default_value_t = 2)]
        poll_interval_secs: u64,

        /// The URL for the game being played
        url: String,
    },
    /// Validate a game state file
    Validate {
        /// Path to the game state file
        game_state: PathBuf,

        /// Only check that the file parses, without testing it further or
        /// printing the board
        #[arg(short, long, default_value_t = false)]
        quiet: bool,

        /// RNG seed for the test move
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let grid = Grid::try_new(args.width, args.height).with_context(|| {
        format!(
            "Invalid board size {} x {}: it needs at least one column and three rows, and must not be huge",
            args.width, args.height
        )
    })?;

    match args.mode {
        Mode::Local {
            player1,
            player2,
            game_state,
            seed,
        } => run_local(grid, player1, player2, game_state, seed),
        Mode::Remote {
            player,
            poll_interval_secs,
            url,
        } => {
            let config = Config {
                grid,
                poll_interval: Duration::from_secs(poll_interval_secs),
            };
            run_remote(&config, player, &url)
        }
        Mode::Validate {
            game_state,
            quiet,
            seed,
        } => run_validate(grid, &game_state, quiet, seed),
    }
}

fn load_player(path: Option<PathBuf>, nick: &str) -> anyhow::Result<PlayerConfig> {
    match path {
        Some(path) => PlayerConfig::load(&path),
        None => Ok(PlayerConfig::with_default_command(nick)),
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed);
    StdRng::seed_from_u64(seed)
}

fn run_local(
    grid: Grid,
    player1: Option<PathBuf>,
    player2: Option<PathBuf>,
    game_state: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let state = match game_state {
        Some(path) => GameState::load_file(grid, &path)?,
        None => {
            anyhow::ensure!(grid.width() >= 2, "A random start needs two columns");
            GameState::random_start(grid, &mut seeded_rng(seed))
        }
    };
    let player_configs = [
        load_player(player1, "Player 1")?,
        load_player(player2, "Player 2")?,
    ];

    let result = run_local_match(state, &player_configs[0], &player_configs[1])?;
    match result {
        GameResult::Tie => eprintln!("Tie"),
        GameResult::WonByPlayer { player_idx } => {
            eprintln!("Player {} ({}) wins", player_idx + 1, player_configs[player_idx].nick)
        }
        GameResult::IllegalMoveByPlayer { player_idx, err } => {
            eprintln!(
                "Player {} ({}) made an illegal move: {}",
                player_idx + 1,
                player_configs[player_idx].nick,
                error_chain(&err)
            );
            eprintln!(
                "Player {} ({}) wins",
                2 - player_idx,
                player_configs[1 - player_idx].nick
            );
        }
    }
    Ok(())
}

fn resume_command() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}

fn run_remote(config: &Config, player: Option<PathBuf>, url: &str) -> anyhow::Result<()> {
    let player_config = load_player(player, "You")?;
    match run_remote_client(config, url, &player_config) {
        Ok(RemoteResult::Finished {
            winners,
            description,
        }) => {
            let winners: Vec<String> = winners.iter().map(ToString::to_string).collect();
            eprintln!("{}", description);
            eprintln!("Game over. The winner(s) are {}", winners.join(" and "));
            Ok(())
        }
        Ok(RemoteResult::IllegalMove { err }) => {
            eprintln!("Your bot made an illegal move: {}", error_chain(&err));
            eprintln!("Please fix your bot and rerun this command to resume the game:");
            eprintln!("{}", resume_command());
            Ok(())
        }
        Err(err) => {
            if err.downcast_ref::<NetworkFailure>().is_some() {
                eprintln!("Could not connect to the server. Please try again later:");
                eprintln!("{}", resume_command());
            }
            Err(err)
        }
    }
}

fn run_validate(grid: Grid, path: &Path, quiet: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let state = GameState::load_file(grid, path)?;
    if quiet {
        return Ok(());
    }

    let flipped = state.flip();
    for (line, flipped_line) in visualize(&state).lines().zip(visualize(&flipped).lines()) {
        println!("{}  {}", line, flipped_line);
    }
    for head in [state.you(), state.opponent()] {
        let neighbours: Vec<String> = state
            .neighbours_clear(head)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("{} => [{}]", head, neighbours.join(", "));
    }

    self_check(&state, &mut seeded_rng(seed))?;
    println!("{} is valid", path.display());
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
