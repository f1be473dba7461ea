use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::figure::{FigureData, RenderedFigure};

#[derive(Debug, Serialize)]
struct DataRow<'a> {
    series: &'a str,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFigure {
    pub html: PathBuf,
    pub data: Option<PathBuf>,
}

/// Writes `<root>/Chapter<x>/Fig_<x>_<y>_<z>.html`, plus a `.csv` of the
/// plotted series when `write_data` is set.
pub fn write_figure(
    root: &Path,
    rendered: &RenderedFigure,
    write_data: bool,
) -> Result<WrittenFigure> {
    let base = root.join(rendered.id.relative_path());
    if let Some(dir) = base.parent() {
        fs::create_dir_all(dir)?;
    }

    let html = base.with_extension("html");
    fs::write(&html, rendered.plot.to_html())?;
    log::info!("wrote {}", html.display());

    let data = if write_data {
        let csv_path = base.with_extension("csv");
        write_data_csv(&csv_path, &rendered.data)?;
        log::info!("wrote {} ({} points)", csv_path.display(), rendered.data.points());
        Some(csv_path)
    } else {
        None
    };

    Ok(WrittenFigure { html, data })
}

/// Long format: one `series,x,y` row per plotted point.
pub fn write_data_csv(path: &Path, data: &FigureData) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for series in &data.series {
        for (x, y) in series.x.iter().zip(series.y.iter()) {
            writer.serialize(DataRow {
                series: &series.name,
                x: *x,
                y: *y,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}
