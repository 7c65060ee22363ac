use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use twenty48_core::engine::{Direction, GridEngine};

#[derive(Parser, Debug)]
#[command(about = "Self-playing 2048 demo for the twenty48-core engine")]
struct Args {
    /// Grid side length
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// RNG seed for a reproducible run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many moves
    #[arg(long)]
    steps: Option<u64>,

    /// Only print the final summary
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut engine = GridEngine::new(args.size, &mut rng)?;
    if !args.quiet {
        println!("{}", engine);
    }

    let mut move_count: u64 = 0;
    while !engine.is_terminal() {
        // Greedy: first direction that changes the grid, scanning in a
        // fixed order so seeded runs replay exactly.
        let Some(result) = Direction::ALL
            .iter()
            .map(|&dir| engine.step(dir, &mut rng))
            .find(|result| result.changed)
        else {
            break;
        };
        move_count += 1;
        if !args.quiet {
            println!("{}", engine);
            println!("Score: {}", result.score);
        }
        if let Some(limit) = args.steps {
            if move_count >= limit {
                break;
            }
        }
    }

    println!(
        "Moves made: {} | Score: {} | Highest tile: {}",
        move_count,
        engine.score(),
        engine.highest_tile()
    );
    Ok(())
}
