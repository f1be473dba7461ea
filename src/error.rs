use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigureError {
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("No fixed point after {iterations} iterations (distance {distance:e})")]
    NoConvergence { iterations: usize, distance: f64 },

    #[error("Utility value {value} has no consumption counterpart")]
    OutOfDomain { value: f64 },

    #[error("Unknown figure: {0}")]
    UnknownFigure(String),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FigureError {
    pub fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FigureError>;
