use std::fmt::Display;

use fairway_solver::ConfigError;
use fairway_solver::ModelError;
use thiserror::Error;

pub(crate) type FairwayResult<T> = Result<T, FairwayError>;

#[derive(Error, Debug)]
pub(crate) enum FairwayError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The instance file could not be parsed, more details: {0}")]
    InvalidToml(#[from] toml::de::Error),
    #[error("The topology is invalid: {0}")]
    InvalidTopology(&'static str),
    #[error("The instance is inconsistent, more details: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ModelError),
    #[error("Failed to serialise the report, more details: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot derive an output format from {0}; use one of .txt, .json or .csv or pass --output-format.")]
    UnsupportedOutputFormat(String),
}

impl FairwayError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }

    pub(crate) fn unsupported_output_format(path: impl Display) -> Self {
        Self::UnsupportedOutputFormat(format!("{path}"))
    }
}
