use battleship_engine::{
    init_logging_with, level_from_env, Coord, Difficulty, EngineConfig, GameEngine, GameStatus,
    GuessResult, BOARD_SIZE,
};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level; defaults to $BATTLESHIP_LOG, then `info`.
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play headless games between a random-firing stand-in for the human and
    /// the computer, printing one JSON summary per game.
    Sim {
        #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[arg(long, default_value_t = BOARD_SIZE)]
        board_size: usize,
        /// Include every computer shot in the summary.
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Serialize)]
struct ShotRecord {
    at: Coord,
    result: &'static str,
}

#[derive(Serialize)]
struct GameSummary {
    game: u32,
    difficulty: Difficulty,
    seed: Option<u64>,
    winner: &'static str,
    player_shots: usize,
    computer_shots: usize,
    ships_sunk_by_computer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    computer_trace: Option<Vec<ShotRecord>>,
}

fn describe(result: Option<GuessResult>) -> &'static str {
    match result {
        None => "repeat",
        Some(GuessResult::Miss) => "miss",
        Some(GuessResult::Hit) => "hit",
        Some(GuessResult::Sink(_)) => "sunk",
    }
}

fn play_one(
    game: u32,
    config: EngineConfig,
    trace: bool,
    autopilot: &mut SmallRng,
) -> anyhow::Result<GameSummary> {
    let mut engine = GameEngine::new(config)?;
    engine.place_player_fleet_randomly()?;

    let size = config.board_size;
    let mut computer_trace = trace.then(Vec::new);
    let mut turns = 0usize;
    let limit = size * size;
    while engine.check_game_over().is_none() {
        turns += 1;
        if turns > limit {
            anyhow::bail!("game {} did not finish within {} turns", game, limit);
        }

        let (x, y) = loop {
            let x = autopilot.random_range(0..size);
            let y = autopilot.random_range(0..size);
            if engine.human().can_shoot_at(x, y) {
                break (x, y);
            }
        };
        engine.handle_player_shot(x, y);
        if engine.check_game_over().is_some() {
            break;
        }

        let shot = engine.handle_computer_shot()?;
        if let Some(t) = computer_trace.as_mut() {
            t.push(ShotRecord {
                at: shot.at,
                result: describe(shot.outcome.result()),
            });
        }
    }

    let winner = match engine.status() {
        GameStatus::Won => "player",
        GameStatus::Lost => "computer",
        other => anyhow::bail!("game {} ended in unexpected state {:?}", game, other),
    };
    log::info!("game {} won by {}", game, winner);

    Ok(GameSummary {
        game,
        difficulty: config.difficulty,
        seed: config.seed,
        winner,
        player_shots: engine.human().shots().count_ones(),
        computer_shots: engine.targeting().fired().count_ones(),
        ships_sunk_by_computer: engine.human().board().sunk_ships().count(),
        computer_trace,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with(cli.log_level.unwrap_or_else(level_from_env));

    match cli.command {
        Commands::Sim {
            difficulty,
            seed,
            games,
            board_size,
            trace,
        } => {
            if let Some(s) = seed {
                log::info!("using fixed seed {} (games are reproducible)", s);
            }
            let mut autopilot = match seed {
                Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            for game in 0..games {
                let mut config = EngineConfig::new(difficulty).with_board_size(board_size);
                if let Some(s) = seed {
                    config = config.with_seed(s.wrapping_add(u64::from(game)));
                }
                let summary = play_one(game, config, trace, &mut autopilot)?;
                println!("{}", serde_json::to_string(&summary)?);
            }
        }
    }
    Ok(())
}
