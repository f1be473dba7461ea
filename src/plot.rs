use plotly::common::{DashType, Line, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

use crate::figure::Series;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Option<&'static str>,
    pub width: f64,
    pub opacity: f64,
    pub dashed: bool,
    pub show_legend: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            width: 2.0,
            opacity: 1.0,
            dashed: false,
            show_legend: true,
        }
    }
}

/// Line trace for one series.
pub fn line_trace(series: &Series, style: LineStyle) -> Box<Scatter<f64, f64>> {
    let mut line = Line::new().width(style.width);
    if let Some(color) = style.color {
        line = line.color(color);
    }
    if style.dashed {
        line = line.dash(DashType::Dash);
    }

    Scatter::new(series.x.clone(), series.y.clone())
        .name(&series.name)
        .mode(Mode::Lines)
        .opacity(style.opacity)
        .show_legend(style.show_legend)
        .line(line)
}

pub fn line_plot(
    title: &str,
    x_title: &str,
    y_title: &str,
    traces: Vec<Box<Scatter<f64, f64>>>,
) -> Plot {
    let mut plot = Plot::new();
    for trace in traces {
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title(x_title))
            .y_axis(Axis::new().title(y_title)),
    );

    plot
}
