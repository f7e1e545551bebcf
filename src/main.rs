use anyhow::{bail, Context, Result};
use gpfitness::config::ConfigManager;
use gpfitness::data::tasks;
use gpfitness::engines::evaluation::FitnessEvaluator;
use gpfitness::engines::generation::{EvolutionEngine, LogProgressCallback};
use gpfitness::types::{HealthResponse, ScoreRequest};
use std::io::Read;

const USAGE: &str = "usage: gpfitness <score [REQUEST.json] | evolve | tasks | health> [--config FILE]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();
    let mut config_path: Option<String> = None;
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            config_path = Some(args.next().context("--config requires a path")?);
        } else {
            positional.push(arg);
        }
    }

    let manager = ConfigManager::new();
    manager
        .load(config_path.as_deref())
        .context("failed to load configuration")?;
    let config = manager.get();

    match command.as_str() {
        "score" => {
            let body = match positional.first() {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path))?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };
            let request: ScoreRequest =
                serde_json::from_str(&body).context("malformed score request")?;

            let evaluator = FitnessEvaluator::new(config.vm, config.scoring);
            let response = evaluator.score_request(&request);
            println!("{}", serde_json::to_string(&response)?);
        }
        "evolve" => {
            let evaluator = FitnessEvaluator::new(config.vm, config.scoring);
            let mut engine = EvolutionEngine::new(config.evolution, evaluator)?;
            let report = engine.run(LogProgressCallback)?;
            log::info!(
                "best genome after {} generations: {}",
                report.state.generation + 1,
                report.state.best_genome.to_listing()
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "tasks" => {
            for name in tasks::known_tasks() {
                println!("{}", name);
            }
        }
        "health" => println!("{}", serde_json::to_string(&HealthResponse::ok())?),
        _ => bail!(USAGE),
    }

    Ok(())
}
