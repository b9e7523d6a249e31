// src/processing/indices/mod.rs
pub mod leaf;

use crate::error::Result;
use crate::raster::{IndexGrid, RasterImage};

pub use leaf::LeafIndex;

/// A per-pixel index computed from the channels of one raster
pub trait IndexCalculator: Send + Sync {
    fn calculate(&self, input: &RasterImage) -> Result<IndexGrid>;

    fn required_channels(&self) -> usize;

    fn name(&self) -> &str;
}
