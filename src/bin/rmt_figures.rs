//! Figure Renderer Binary
//!
//! Lists the available figures or renders a selection of them (all by
//! default).
//!
//! ## Usage
//! ```bash
//! cargo run --bin rmt_figures --release -- --list
//! cargo run --bin rmt_figures --release -- 20.3.1 Fig_20_2_1a --data
//! ```

use anyhow::Result;
use clap::Parser;

use rmt_figures::cli::{init_logger, CommonArgs};
use rmt_figures::figure::Figure;
use rmt_figures::output::write_figure;

#[derive(Parser)]
#[command(name = "rmt_figures")]
#[command(about = "Render Recursive Macroeconomic Theory figures")]
struct Cli {
    /// Figure ids such as Fig_20_2_1a or 20.3.1 (default: all)
    figures: Vec<String>,

    /// List available figures and exit
    #[arg(long)]
    list: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.common.verbose);

    if cli.list {
        println!("| Figure       | Path                      | Title");
        println!("|--------------|---------------------------|------------------------------");
        for figure in Figure::all() {
            println!(
                "| {:12} | {:25} | {}",
                figure.id().to_string(),
                figure.id().relative_path().display().to_string(),
                figure.name()
            );
        }
        return Ok(());
    }

    let selected = if cli.figures.is_empty() {
        Figure::all()
    } else {
        cli.figures
            .iter()
            .map(|s| s.parse::<Figure>())
            .collect::<rmt_figures::Result<Vec<_>>>()?
    };

    let config = cli.common.load_config()?;

    println!("=======================================================");
    println!("  Rendering {} figure(s) into {}", selected.len(), cli.common.output_dir.display());
    println!("=======================================================\n");

    for figure in selected {
        let rendered = figure.render(&config)?;
        let written = write_figure(&cli.common.output_dir, &rendered, cli.common.data)?;
        println!(
            "  {:12} {:>7} points -> {}",
            figure.id().to_string(),
            rendered.data.points(),
            written.html.display()
        );
    }

    Ok(())
}
