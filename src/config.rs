use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::economy::EconomyParams;
use crate::error::{FigureError, Result};
use crate::fixed_point::{FixedPointSolver, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};

/// Parameters for every figure, loadable from TOML. Missing sections and
/// fields fall back to the textbook values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub economy: EconomyParams,
    pub solver: SolverConfig,
    pub consumption_paths: ConsumptionPathsConfig,
    pub participation: ParticipationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl SolverConfig {
    pub fn solver(&self) -> FixedPointSolver {
        FixedPointSolver::new(self.tolerance, self.max_iter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionPathsConfig {
    pub npaths: usize,
    pub periods: usize,
    pub seed: u64,
}

impl Default for ConsumptionPathsConfig {
    fn default() -> Self {
        Self {
            npaths: 250,
            periods: 150,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationConfig {
    pub nw: usize,
}

impl Default for ParticipationConfig {
    fn default() -> Self {
        Self { nw: 50 }
    }
}

impl FigureConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FigureConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.economy.validate()?;

        if !(self.solver.tolerance > 0.0 && self.solver.tolerance.is_finite()) {
            return Err(FigureError::invalid("solver.tolerance", "must be positive"));
        }
        if self.solver.max_iter == 0 {
            return Err(FigureError::invalid("solver.max_iter", "must be at least 1"));
        }
        if self.consumption_paths.npaths == 0 {
            return Err(FigureError::invalid(
                "consumption_paths.npaths",
                "need at least one path",
            ));
        }
        if self.consumption_paths.periods == 0 {
            return Err(FigureError::invalid(
                "consumption_paths.periods",
                "need at least one period",
            ));
        }
        if self.participation.nw < 2 {
            return Err(FigureError::invalid(
                "participation.nw",
                "need at least two grid points",
            ));
        }
        Ok(())
    }
}
