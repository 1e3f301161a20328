use std::{env, fs, path::Path, process};

use cppp::{
    PhylogenyError, SearchEngine, State,
    cli::CommandLineConfig,
    graph::GraphPrimitives,
    instance::{Matrix, build_initial_state},
    persist::{read_state, write_state},
    realize::{Realization, realize_character},
    replay::{ReplayDescriptor, run_descriptor},
    safety::check_state,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn run_command(config: &CommandLineConfig) -> Result<(), PhylogenyError> {
    match config.command.as_str() {
        "build" => {
            let state = load_root(config)?;
            let output = require(config.output.as_deref(), "--output")?;
            write_state(output, &state)?;
            println!(
                "species={} characters={} conflicts={}",
                state.num_species,
                state.num_characters,
                state.conflict_graph.edge_count()
            );
            Ok(())
        }
        "search" => {
            let root = load_root(config)?;
            let mut engine = SearchEngine::from_config(root, config.search.clone())?;
            let outcome = engine.run()?;
            let report = serde_json::json!({
                "outcome": outcome,
                "statistics": engine.statistics(),
            });
            println!("{}", to_pretty(&report)?);
            Ok(())
        }
        "realize" => {
            let state = read_state(require(config.state.as_deref(), "--state")?)?;
            let character = config
                .character
                .ok_or_else(|| PhylogenyError::invalid_input("--character is required"))?;
            match realize_character(&state, character)? {
                Realization::Realized(next) => {
                    println!("outcome={:?}", next.last_outcome);
                    if let Some(output) = config.output.as_deref() {
                        write_state(output, &next)?;
                    }
                }
                Realization::Infeasible => println!("outcome=Infeasible"),
            }
            Ok(())
        }
        "replay" => {
            let path = require(config.descriptor.as_deref(), "--descriptor")?;
            let descriptor = ReplayDescriptor::load(path)?;
            let state = run_descriptor(&descriptor)?;
            println!(
                "species={} characters={}",
                state.num_species, state.num_characters
            );
            Ok(())
        }
        "check" => {
            let state = read_state(require(config.state.as_deref(), "--state")?)?;
            println!("{}", to_pretty(&check_state(&state))?);
            Ok(())
        }
        other => Err(PhylogenyError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn load_root(config: &CommandLineConfig) -> Result<State, PhylogenyError> {
    if let Some(path) = config.state.as_deref() {
        return read_state(path);
    }
    let path = require(config.matrix.as_deref(), "--matrix or --state")?;
    let data = fs::read_to_string(path)
        .map_err(|e| PhylogenyError::io(format!("{}: {e}", path.display())))?;
    build_initial_state(&Matrix::from_json_str(&data)?)
}

fn require<'a>(path: Option<&'a Path>, flag: &str) -> Result<&'a Path, PhylogenyError> {
    path.ok_or_else(|| PhylogenyError::invalid_input(format!("{flag} is required")))
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, PhylogenyError> {
    serde_json::to_string_pretty(value).map_err(|e| PhylogenyError::serialization(e.to_string()))
}
