//! Figure 20.3.1: Participation Constraint Frontiers
//!
//! For each income state, the locus of (consumption, promised value) pairs
//! that leaves the household exactly indifferent between staying in the
//! contract and leaving for autarky:
//!
//! u(c) + beta * w = u(ybar_k) + beta * v_aut

use itertools_num::linspace;
use plotly::Plot;

use crate::config::FigureConfig;
use crate::economy::Economy;
use crate::error::Result;
use crate::figure::{Figure, FigureData, RenderedFigure, Series};
use crate::plot::{line_plot, line_trace, LineStyle};

pub struct Frontier {
    pub state: usize,
    pub income: f64,
    pub consumption: Vec<f64>,
    pub promised: Vec<f64>,
}

pub struct ParticipationFrontiers {
    pub economy: Economy,
    pub grid: Vec<f64>,
    pub frontiers: Vec<Frontier>,
}

/// Promised values from lifetime utility of `ymin` forever to `ymax` forever.
pub fn promise_grid(economy: &Economy, nw: usize) -> Vec<f64> {
    let scale = 1.0 - economy.beta;
    let lo = economy.u(economy.ybar[0]) / scale;
    let hi = economy.u(economy.ybar[economy.nstates() - 1]) / scale;
    linspace(lo, hi, nw).collect()
}

pub fn frontier(economy: &Economy, state: usize, grid: &[f64]) -> Frontier {
    let exit = economy.exit_value(state);
    let mut consumption = Vec::with_capacity(grid.len());
    let mut promised = Vec::with_capacity(grid.len());

    for &w in grid {
        // Promises this far below autarky cannot be offset by any consumption.
        if let Some(c) = economy.u_inverse(exit - economy.beta * w) {
            consumption.push(c);
            promised.push(w);
        }
    }

    let dropped = grid.len() - promised.len();
    if dropped > 0 {
        log::debug!("state {}: dropped {} grid points outside the utility range", state, dropped);
    }

    Frontier {
        state,
        income: economy.ybar[state],
        consumption,
        promised,
    }
}

pub fn compute(config: &FigureConfig) -> Result<ParticipationFrontiers> {
    let economy = Economy::new(config.economy)?;
    let grid = promise_grid(&economy, config.participation.nw);
    let frontiers = (0..economy.nstates())
        .map(|k| frontier(&economy, k, &grid))
        .collect();

    Ok(ParticipationFrontiers {
        economy,
        grid,
        frontiers,
    })
}

impl ParticipationFrontiers {
    pub fn data(&self) -> FigureData {
        let series = self
            .frontiers
            .iter()
            .map(|f| {
                Series::new(
                    format!("y = {:.2}", f.income),
                    f.consumption.clone(),
                    f.promised.clone(),
                )
            })
            .collect();
        FigureData { series }
    }
}

pub fn plot(computed: &ParticipationFrontiers) -> Plot {
    let traces = computed
        .data()
        .series
        .iter()
        .map(|s| line_trace(s, LineStyle::default()))
        .collect();

    line_plot(
        "Participation constraints by income state",
        "Consumption",
        "Promised value",
        traces,
    )
}

pub fn render(computed: &ParticipationFrontiers) -> RenderedFigure {
    RenderedFigure {
        id: Figure::ParticipationFrontier.id(),
        plot: plot(computed),
        data: computed.data(),
    }
}
