use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors (file layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AppResult<T> = std::result::Result<T, AppError>;
