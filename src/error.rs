use thiserror::Error;

/// Failures outside the formula engines. A calculation that cannot be
/// evaluated is not an error; it yields no report.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("invalid field argument {0:?}, expected key=value")]
    InvalidField(String),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export error: {0}")]
    Export(String),
}
