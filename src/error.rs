// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading captures and computing the vegetation index
#[derive(Error, Debug)]
pub enum Error {
    #[error("input rgb image {0} does not exist or is not readable by this user")]
    MissingRgbImage(PathBuf),

    #[error("input thermal image {0} does not exist or is not readable by this user")]
    MissingThermalImage(PathBuf),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("raster has {actual} channel(s), at least {expected} required")]
    TooFewChannels { expected: usize, actual: usize },

    #[error("index grid has {actual} cells, raster has {expected} pixels")]
    GridSize { expected: usize, actual: usize },

    #[error("cannot write a raster with {0} channels")]
    UnsupportedChannels(usize),

    #[error("cannot derive a capture name from directory {0}")]
    InvalidDirectory(PathBuf),

    #[error("images have not been loaded yet")]
    NotLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
