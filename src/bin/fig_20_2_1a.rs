//! Figure 20.2.1a Binary
//!
//! Consumption paths under one-sided commitment against the complete-markets
//! benchmark.
//!
//! ## Usage
//! ```bash
//! cargo run --bin fig_20_2_1a --release -- --seed 7 --data
//! ```

use anyhow::Result;
use clap::Parser;

use rmt_figures::cli::{init_logger, CommonArgs};
use rmt_figures::consumption_paths;
use rmt_figures::figure::Figure;
use rmt_figures::output::write_figure;

#[derive(Parser)]
#[command(name = "fig_20_2_1a")]
#[command(about = "Consumption for one-sided commitment (RMT Figure 20.2.1a)")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.common.verbose);

    let config = cli.common.load_config()?;
    let figure = Figure::ConsumptionPaths;
    let computed = consumption_paths::compute(&config)?;

    println!("=======================================================");
    println!("  {}: {}", figure.id(), figure.name());
    println!("=======================================================\n");

    println!("Contract:");
    println!("{}", "-".repeat(50));
    println!("  State   Income   Consumption   Promised value");
    for (k, y) in computed.economy.ybar.iter().enumerate() {
        println!(
            "  {:>5}   {:>6.2}   {:>11.4}   {:>14.6}",
            k, y, computed.contract.consumption[k], computed.contract.continuation[k]
        );
    }
    println!();

    println!("Simulation:");
    println!("{}", "-".repeat(50));
    println!("  Paths x periods:         {} x {}", computed.paths.len(), computed.periods);
    println!("  Seed:                    {}", config.consumption_paths.seed);
    println!("  Complete-markets c:      {:.4}", computed.economy.c_complete_markets);
    println!("  Long-run c:              {:.4}", computed.contract.long_run_consumption());
    println!("  Paths at top by T:       {:.1}%", computed.share_at_top() * 100.0);
    println!("  Lender value at start:   {:.4}", computed.contract.initial_lender_value());
    println!();

    let rendered = consumption_paths::render(&computed);
    let written = write_figure(&cli.common.output_dir, &rendered, cli.common.data)?;

    println!("  Chart: {}", written.html.display());
    if let Some(data) = written.data {
        println!("  Data:  {}", data.display());
    }

    Ok(())
}
