//! Recursive Macroeconomic Theory Figure Library
//!
//! Numeric models behind textbook figures, each rendered to an interactive
//! chart under `Chapter<x>/Fig_<x>_<y>_<z>`.
//!
//! ## Modules
//!
//! - `economy`: Chapter 20 one-sided commitment economy and contract solver
//! - `fixed_point`: sup-norm fixed-point iteration with an iteration cap
//! - `consumption_paths`: Figure 20.2.1a (simulated consumption paths)
//! - `participation`: Figure 20.3.1 (participation constraint frontiers)
//! - `figure`: figure ids and registry
//! - `plot` / `output`: plotly rendering and the on-disk layout
//!
//! ## Usage
//!
//! ```bash
//! # Figure 20.2.1a
//! cargo run --bin fig_20_2_1a --release
//!
//! # Figure 20.3.1
//! cargo run --bin fig_20_3_1 --release
//!
//! # Everything, with CSV data alongside the charts
//! cargo run --bin rmt_figures --release -- --data
//! ```

pub mod cli;
pub mod config;
pub mod consumption_paths;
pub mod economy;
pub mod error;
pub mod figure;
pub mod fixed_point;
pub mod output;
pub mod participation;
pub mod plot;

pub use config::FigureConfig;
pub use error::{FigureError, Result};
pub use figure::{Figure, FigureId, RenderedFigure};
