#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{create_player, init_logging, ConsoleObserver, Game, GameConfig, PlayerKind};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Strategy for the first player.
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    p1: PlayerKind,
    /// Strategy for the second player.
    #[arg(long, value_enum, default_value_t = PlayerKind::Good)]
    p2: PlayerKind,
    #[arg(long, default_value = "Player 1")]
    name1: String,
    #[arg(long, default_value = "Player 2")]
    name2: String,
    #[arg(long, default_value_t = 10)]
    rows: usize,
    #[arg(long, default_value_t = 10)]
    cols: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Wait for enter after every shot.
    #[arg(long)]
    pause: bool,
}

/// The standard fleet on a `rows×cols` grid.
#[cfg(feature = "std")]
fn fleet(rows: usize, cols: usize) -> anyhow::Result<GameConfig> {
    let mut config = GameConfig::new(rows, cols).map_err(|e| anyhow::anyhow!(e))?;
    for ship in GameConfig::standard().ships() {
        config
            .add_ship(ship.length(), ship.symbol(), ship.name())
            .map_err(|e| anyhow::anyhow!("{}: {}", ship.name(), e))?;
    }
    Ok(config)
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = fleet(cli.rows, cli.cols)?;
    let mut rng = if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut p1 = create_player(cli.p1, &cli.name1, &config).map_err(|e| anyhow::anyhow!(e))?;
    let mut p2 = create_player(cli.p2, &cli.name2, &config).map_err(|e| anyhow::anyhow!(e))?;
    let mut observer = ConsoleObserver::stdout(cli.pause);

    let game = Game::new(config);
    let report = game
        .play(p1.as_mut(), p2.as_mut(), &mut rng, &mut observer)
        .map_err(|e| anyhow::anyhow!(e))?;
    if report.forfeit {
        println!("{} wins by forfeit.", report.winner_name);
    }
    Ok(())
}
