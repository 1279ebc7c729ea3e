use broadside::{create_player, init_logging, Game, GameConfig, PlayerKind, SilentObserver};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

/// Play many automated matches and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = PlayerKind::Good)]
    p1: PlayerKind,
    #[arg(long, value_enum, default_value_t = PlayerKind::Mediocre)]
    p2: PlayerKind,
    #[arg(long, default_value_t = 100)]
    games: u64,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Serialize)]
struct SideSummary {
    kind: PlayerKind,
    wins: u64,
    average_shots: f64,
}

#[derive(Serialize)]
struct Summary {
    games: u64,
    average_turns: f64,
    player1: SideSummary,
    player2: SideSummary,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    if matches!(args.p1, PlayerKind::Human) || matches!(args.p2, PlayerKind::Human) {
        anyhow::bail!("the simulator only runs automated players");
    }

    let config = GameConfig::standard();
    let game = Game::new(config.clone());
    let mut wins = [0u64; 2];
    let mut shots = [0u64; 2];
    let mut turns = 0u64;

    for i in 0..args.games {
        let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(i));
        let mut p1 = create_player(args.p1, "player1", &config).map_err(|e| anyhow::anyhow!(e))?;
        let mut p2 = create_player(args.p2, "player2", &config).map_err(|e| anyhow::anyhow!(e))?;
        let report = game
            .play(p1.as_mut(), p2.as_mut(), &mut rng, &mut SilentObserver)
            .map_err(|e| anyhow::anyhow!(e))?;
        wins[report.winner] += 1;
        turns += report.turns as u64;
        for side in 0..2 {
            shots[side] += report.sides[side].shots as u64;
        }
    }

    let games = args.games.max(1) as f64;
    let summary = Summary {
        games: args.games,
        average_turns: turns as f64 / games,
        player1: SideSummary {
            kind: args.p1,
            wins: wins[0],
            average_shots: shots[0] as f64 / games,
        },
        player2: SideSummary {
            kind: args.p2,
            wins: wins[1],
            average_shots: shots[1] as f64 / games,
        },
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
