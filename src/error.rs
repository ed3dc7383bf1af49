use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("font error: {0}")]
    Font(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("surface of {width}x{height} pixels cannot be allocated")]
    Surface { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
