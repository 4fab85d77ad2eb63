use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mutation report {path:?} is not valid JSON: {source}")]
    MalformedReport {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("mutation report {0:?} has no 'files' object")]
    InvalidReportShape(PathBuf),

    #[error(
        "test project {test_project:?} has {count} project references and none matches the '{suffix}' naming convention"
    )]
    AmbiguousReferences {
        test_project: PathBuf,
        count: usize,
        suffix: String,
    },
}

pub type AppResult<T> = Result<T, AppError>;
