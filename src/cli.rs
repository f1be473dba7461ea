//! Arguments and setup shared by the figure binaries.

use clap::Args;
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::FigureConfig;
use crate::error::Result;

pub const LOG_ENV: &str = "RMT_LOG";

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// TOML file overriding the textbook parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root directory for Chapter<x>/Fig_<x>_<y>_<z> outputs
    #[arg(short, long, default_value = "figures")]
    pub output_dir: PathBuf,

    /// Also write the plotted series as CSV next to each chart
    #[arg(long)]
    pub data: bool,

    /// Override the simulation seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<FigureConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                FigureConfig::from_file(path)?
            }
            None => FigureConfig::default(),
        };

        if let Some(seed) = self.seed {
            log::debug!("seed overridden to {}", seed);
            config.consumption_paths.seed = seed;
        }

        Ok(config)
    }
}

pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV, default_filter))
        .init();
}
