//! Figure 20.3.1 Binary
//!
//! Participation constraint frontiers, one per income state.
//!
//! ## Usage
//! ```bash
//! cargo run --bin fig_20_3_1 --release
//! ```

use anyhow::Result;
use clap::Parser;

use rmt_figures::cli::{init_logger, CommonArgs};
use rmt_figures::figure::Figure;
use rmt_figures::output::write_figure;
use rmt_figures::participation;

#[derive(Parser)]
#[command(name = "fig_20_3_1")]
#[command(about = "Participation constraints by income state (RMT Figure 20.3.1)")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.common.verbose);

    let config = cli.common.load_config()?;
    let figure = Figure::ParticipationFrontier;
    let computed = participation::compute(&config)?;

    println!("=======================================================");
    println!("  {}: {}", figure.id(), figure.name());
    println!("=======================================================\n");

    println!("  Autarky value:           {:.6}", computed.economy.v_aut);
    println!(
        "  Promise grid:            [{:.6}, {:.6}] ({} points)",
        computed.grid.first().copied().unwrap_or_default(),
        computed.grid.last().copied().unwrap_or_default(),
        computed.grid.len()
    );
    println!();

    println!("  State   Income   Points   Exit value");
    println!("  {}", "-".repeat(40));
    for f in &computed.frontiers {
        println!(
            "  {:>5}   {:>6.2}   {:>6}   {:>10.6}",
            f.state,
            f.income,
            f.promised.len(),
            computed.economy.exit_value(f.state)
        );
    }
    println!();

    let rendered = participation::render(&computed);
    let written = write_figure(&cli.common.output_dir, &rendered, cli.common.data)?;

    println!("  Chart: {}", written.html.display());
    if let Some(data) = written.data {
        println!("  Data:  {}", data.display());
    }

    Ok(())
}
