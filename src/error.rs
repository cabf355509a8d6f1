use thiserror::Error;

use crate::types::ViewKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{view} view incomplete: {placed} of {required} landmarks placed")]
    Annotation {
        view: ViewKind,
        placed: usize,
        required: usize,
    },

    #[error("all landmarks already placed for the {0} view")]
    AllPointsPlaced(ViewKind),

    #[error("{view} view expects \"{expected}\" next, got \"{got}\"")]
    UnexpectedLabel {
        view: ViewKind,
        expected: String,
        got: String,
    },

    #[error("no landmark at index {index} in the {view} view")]
    NoSuchPoint { view: ViewKind, index: usize },

    #[error("calibration failed: {0}")]
    Calibration(String),

    #[error("coefficient table defines no measurements for {0}")]
    EmptyCoefficientTable(crate::types::Gender),

    #[error("cannot compute {name}: {reason}")]
    Computation { name: String, reason: String },

    #[error("export to {path} failed: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed export: {0}")]
    MalformedExport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
