//! Figure Registry
//!
//! Every reproduced figure is a `Figure` variant keyed by its textbook id.
//! A figure renders to a `plotly::Plot` together with the raw series behind
//! it, so the numbers can be checked without looking at the chart.

use plotly::Plot;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::FigureConfig;
use crate::error::{FigureError, Result};
use crate::{consumption_paths, participation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FigureId {
    pub chapter: u32,
    pub section: u32,
    pub number: u32,
    pub panel: Option<char>,
}

impl FigureId {
    pub const fn new(chapter: u32, section: u32, number: u32, panel: Option<char>) -> Self {
        Self {
            chapter,
            section,
            number,
            panel,
        }
    }

    pub fn chapter_dir(&self) -> String {
        format!("Chapter{}", self.chapter)
    }

    /// `Chapter<x>/Fig_<x>_<y>_<z>`, without extension.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.chapter_dir()).join(self.to_string())
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fig_{}_{}_{}", self.chapter, self.section, self.number)?;
        if let Some(panel) = self.panel {
            write!(f, "{panel}")?;
        }
        Ok(())
    }
}

impl FromStr for FigureId {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || FigureError::UnknownFigure(s.to_string());
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("Fig_")
            .or_else(|| trimmed.strip_prefix("fig_"))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = body.split(['_', '.']).collect();
        let &[chapter, section, last] = parts.as_slice() else {
            return Err(unknown());
        };

        let digits_end = last
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(last.len());
        let (number, panel) = last.split_at(digits_end);

        let mut panel_chars = panel.chars();
        let panel = match (panel_chars.next(), panel_chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_lowercase() => Some(c),
            _ => return Err(unknown()),
        };

        let parse = |v: &str| v.parse::<u32>().map_err(|_| unknown());
        Ok(Self::new(parse(chapter)?, parse(section)?, parse(number)?, panel))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FigureData {
    pub series: Vec<Series>,
}

impl FigureData {
    pub fn points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

pub struct RenderedFigure {
    pub id: FigureId,
    pub plot: Plot,
    pub data: FigureData,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Figure {
    ConsumptionPaths,      // 20.2.1a
    ParticipationFrontier, // 20.3.1
}

impl Figure {
    pub fn all() -> Vec<Self> {
        vec![Self::ConsumptionPaths, Self::ParticipationFrontier]
    }

    pub fn id(&self) -> FigureId {
        match self {
            Self::ConsumptionPaths => FigureId::new(20, 2, 1, Some('a')),
            Self::ParticipationFrontier => FigureId::new(20, 3, 1, None),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ConsumptionPaths => "Consumption for one-sided commitment",
            Self::ParticipationFrontier => "Participation constraints by income state",
        }
    }

    pub fn lookup(id: &FigureId) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|f| f.id() == *id)
            .ok_or_else(|| FigureError::UnknownFigure(id.to_string()))
    }

    pub fn render(&self, config: &FigureConfig) -> Result<RenderedFigure> {
        log::info!("rendering {} ({})", self.id(), self.name());
        let rendered = match self {
            Self::ConsumptionPaths => {
                consumption_paths::render(&consumption_paths::compute(config)?)
            }
            Self::ParticipationFrontier => {
                participation::render(&participation::compute(config)?)
            }
        };
        Ok(rendered)
    }
}

impl FromStr for Figure {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(&s.parse::<FigureId>()?)
    }
}
