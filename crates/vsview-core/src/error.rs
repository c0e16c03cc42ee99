use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("No source image given")]
    Argument,

    #[error("{} doesn't exist", .0.display())]
    NotFound(PathBuf),

    #[error("Initialization failed: {0}")]
    Init(String),

    #[error("Couldn't read filter chain {}: {source}", path.display())]
    ScriptLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filter chain {} is empty", .0.display())]
    EmptyFilterChain(PathBuf),

    #[error("Path cannot be embedded in a script: {0}")]
    UnsupportedPath(String),

    #[error("Script evaluation failed:\n{0}")]
    Script(String),

    #[error("Failed to retrieve the output node. Make sure the chain calls set_output()")]
    NoOutput,

    #[error("The clip is of unknown length. Please check your chain for errors")]
    UnknownLength,

    #[error("Error getting frame from the decode engine:\n{0}")]
    FrameFetch(String),

    #[error("Couldn't allocate {bytes} bytes for the pixel buffer")]
    Allocation { bytes: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
