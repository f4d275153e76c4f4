//! Game of Life CLI - Run a simulation from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io;
use std::sync::mpsc;

use life_engine::{
    compute::GridState,
    driver::{Game, StateObserver, TextRenderer},
    schedule::ThreadScheduler,
    schema::SimulationConfig,
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  generations  Number of generations to run (default: 20)");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    let config = SimulationConfig::from_json_file(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let mut game = Game::from_config(&config, ThreadScheduler).unwrap_or_else(|e| {
        eprintln!("Error creating game: {}", e);
        std::process::exit(1);
    });

    println!("Game of Life");
    println!("============");
    println!("Board: {}x{}", config.width, config.height);
    println!("Interval: {:?}", config.speed.interval());
    println!("Generations: {}", generations);
    println!();

    let (done_tx, done_rx) = mpsc::channel();
    let mut renderer = TextRenderer::new(io::stdout(), config.width);
    let observer = move |state: &GridState, generation: u64| {
        renderer.on_state(state, generation);
        if generation >= generations {
            // Receiver gone means main already finished
            let _ = done_tx.send(());
        }
    };

    if let Err(e) = game.resume(config.speed.interval(), observer) {
        eprintln!("Error starting simulation: {}", e);
        std::process::exit(1);
    }

    if done_rx.recv().is_err() {
        eprintln!("Simulation ended unexpectedly");
        std::process::exit(1);
    }
    game.stop();

    let stats = game.stats();
    println!(
        "Final state: generation {}, {} of {} alive ({:.1}%)",
        stats.generation,
        stats.live_cells,
        stats.total_cells,
        stats.density() * 100.0
    );
}

fn print_example_config() {
    let config = SimulationConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("Example configuration (config.json):");
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
