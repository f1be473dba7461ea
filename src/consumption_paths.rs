//! Figure 20.2.1a: Consumption Paths Under One-Sided Commitment
//!
//! Simulates many histories of the optimal contract and overlays them
//! against the complete-markets consumption level. The textbook panel shows
//! a single path; drawing a few hundred makes the ratchet visible.

use plotly::Plot;
use rand::prelude::*;

use crate::config::FigureConfig;
use crate::economy::{Contract, Economy, Path};
use crate::error::Result;
use crate::figure::{Figure, FigureData, RenderedFigure, Series};
use crate::plot::{line_plot, line_trace, LineStyle};

pub struct ConsumptionPaths {
    pub economy: Economy,
    pub contract: Contract,
    pub paths: Vec<Path>,
    pub periods: usize,
}

pub fn compute(config: &FigureConfig) -> Result<ConsumptionPaths> {
    let economy = Economy::new(config.economy)?;
    let contract = economy.solve(&config.solver.solver())?;

    let settings = config.consumption_paths;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let paths = economy.simulate_many(&contract, settings.npaths, settings.periods, &mut rng);

    log::debug!(
        "simulated {} paths of {} periods (seed {})",
        paths.len(),
        settings.periods,
        settings.seed
    );

    Ok(ConsumptionPaths {
        economy,
        contract,
        paths,
        periods: settings.periods,
    })
}

impl ConsumptionPaths {
    fn time_axis(&self) -> Vec<f64> {
        (0..self.periods).map(|t| t as f64).collect()
    }

    pub fn complete_markets(&self) -> Series {
        let c = self.economy.c_complete_markets;
        Series::new("Complete markets", vec![0.0, self.periods as f64], vec![c, c])
    }

    /// Share of simulated paths that have reached the top consumption level
    /// by the final period.
    pub fn share_at_top(&self) -> f64 {
        if self.paths.is_empty() {
            return 0.0;
        }
        let top = self.contract.long_run_consumption();
        let reached = self
            .paths
            .iter()
            .filter(|p| p.consumption.last().is_some_and(|c| *c >= top))
            .count();
        reached as f64 / self.paths.len() as f64
    }

    pub fn data(&self) -> FigureData {
        let time = self.time_axis();
        let mut series: Vec<Series> = self
            .paths
            .iter()
            .enumerate()
            .map(|(i, p)| Series::new(format!("path {i}"), time.clone(), p.consumption.clone()))
            .collect();
        series.push(self.complete_markets());
        FigureData { series }
    }
}

pub fn plot(computed: &ConsumptionPaths) -> Plot {
    let data = computed.data();
    let mut traces = Vec::with_capacity(data.series.len());

    // Background paths first so the highlighted one is drawn on top.
    for series in data.series.iter().skip(1).take(computed.paths.len().saturating_sub(1)) {
        traces.push(line_trace(
            series,
            LineStyle {
                color: Some("red"),
                width: 0.75,
                opacity: 0.25,
                show_legend: false,
                ..LineStyle::default()
            },
        ));
    }

    if let Some(first) = data.series.first().filter(|_| !computed.paths.is_empty()) {
        traces.push(line_trace(
            first,
            LineStyle {
                color: Some("black"),
                width: 2.0,
                ..LineStyle::default()
            },
        ));
    }

    traces.push(line_trace(
        &computed.complete_markets(),
        LineStyle {
            color: Some("black"),
            width: 1.5,
            opacity: 0.75,
            dashed: true,
            ..LineStyle::default()
        },
    ));

    line_plot(
        "Consumption for one-sided commitment",
        "Time",
        "Consumption",
        traces,
    )
}

pub fn render(computed: &ConsumptionPaths) -> RenderedFigure {
    RenderedFigure {
        id: Figure::ConsumptionPaths.id(),
        plot: plot(computed),
        data: computed.data(),
    }
}
