use std::path::PathBuf;

use thiserror::Error;

pub type NarrativeResult<T> = Result<T, NarrativeError>;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("failed to load dataset from {path}")]
    DataLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv input")]
    Csv(#[from] csv::Error),

    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config from {path}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid json")]
    ConfigParse(#[from] serde_json::Error),

    #[error("scene index {index} is out of range for {count} scenes")]
    SceneOutOfRange { index: usize, count: usize },

    #[error("scene {scene} has no region selector")]
    RegionSelectorUnavailable { scene: usize },
}
