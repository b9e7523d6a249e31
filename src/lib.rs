// src/lib.rs
pub mod batch;
pub mod cli;
pub mod error;
pub mod io;
pub mod processing;
pub mod raster;

pub use error::{Error, Result};
pub use processing::{IndexResult, VegetationIndexExtractor};
pub use raster::{IndexGrid, RasterImage};

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
