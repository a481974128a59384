//! pareto-evo CLI - Run the optimizer from a JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use pareto_evo::{EvolutionDriver, OptimizerConfig, Zdt1Solution};

/// Gene count for the built-in ZDT1 benchmark.
const GENOME_LENGTH: usize = 30;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [report.txt]", args[0]);
        eprintln!();
        eprintln!("Run the multi-objective optimizer on the built-in ZDT1 benchmark.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to optimizer configuration file");
        eprintln!("  report.txt   Optional report destination for Pareto front 1");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let report_path = args.get(2).map(PathBuf::from);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: OptimizerConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    println!("Multi-objective evolutionary optimization");
    println!("=========================================");
    println!("Population: {}", config.population_size);
    println!("Iterations: {}", config.iterations);
    println!("Crossover probability: {}", config.breeding_prob);
    println!("Tournament size: {}", config.tournament_size);
    println!();

    let start = Instant::now();
    let mut driver = EvolutionDriver::new(config);
    let mut result = driver.optimize(|rng| Box::new(Zdt1Solution::random(GENOME_LENGTH, rng)));
    let elapsed = start.elapsed();

    println!(
        "Done in {:.2}s, front 1 holds {} of {} individuals:",
        elapsed.as_secs_f32(),
        result.pareto_front(1).len(),
        result.len()
    );
    result.print_front(1);

    if let Some(path) = report_path {
        if let Err(e) = result.write_front(1, &path) {
            eprintln!("Error writing report: {}", e);
            std::process::exit(1);
        }
        println!();
        println!("Report written to {}", path.display());
    }
}

fn print_example_config() {
    let config = OptimizerConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
