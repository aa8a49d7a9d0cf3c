use anyhow::{Context, Result};
use autol::{CheckRegistry, ConfigManager, Individual, Population, PrimitiveSet, SearchSpace};

const USAGE: &str = "usage: autol <search-space.toml|json> [pipeline]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let space_path = args.next().context(USAGE)?;

    let settings = ConfigManager::new();
    match std::env::var("AUTOL_SETTINGS") {
        Ok(path) => settings
            .load_from_file(&path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        Err(_) => settings.load_from_env()?,
    }

    let space = SearchSpace::from_file(&space_path)
        .with_context(|| format!("Failed to load search space {}", space_path))?;
    let primitive_set = PrimitiveSet::build(&space, &CheckRegistry::with_builtins())?;

    match args.next() {
        Some(pipeline) => {
            let individual = Individual::from_string(&pipeline, &primitive_set)?;
            println!("{}", individual);
            if !individual.satisfies_checks(&primitive_set) {
                log::warn!("Pipeline violates a hyperparameter check");
            }
        }
        None => {
            let mut population = Population::random(&primitive_set, &settings.get().generation)?;
            population.dedup_by_pipeline();
            for individual in &population {
                println!("{}", individual.pipeline_str());
            }
        }
    }

    Ok(())
}
