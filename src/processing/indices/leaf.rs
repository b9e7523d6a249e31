// src/processing/indices/leaf.rs
use crate::error::{Error, Result};
use crate::processing::indices::IndexCalculator;
use crate::raster::{IndexGrid, RasterImage};
use rayon::prelude::*;

/// Sentinel for pixels where green is below red
pub const BELOW_ZERO: u16 = 1;
/// Sentinel for pixels where green + blue is zero
pub const NO_SIGNAL: u16 = 0;

/// Green-red leaf index: (G - R) / (G + B), truncated to an integer
pub struct LeafIndex {
    name: String,
}

impl LeafIndex {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| "LEAF".to_string()),
        }
    }

    /// Index value for a single RGB triple
    pub fn pixel_value(r: u8, g: u8, b: u8) -> u16 {
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));

        if g + b == 0 {
            NO_SIGNAL
        } else if g - r < 0 {
            BELOW_ZERO
        } else {
            // Truncating division, G-R <= G+B so the value is 0 or 1
            ((g - r) / (g + b)) as u16
        }
    }
}

impl Default for LeafIndex {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexCalculator for LeafIndex {
    fn calculate(&self, input: &RasterImage) -> Result<IndexGrid> {
        if input.channels() < self.required_channels() {
            return Err(Error::TooFewChannels {
                expected: self.required_channels(),
                actual: input.channels(),
            });
        }

        let channels = input.channels();
        let mut values = vec![NO_SIGNAL; input.width() * input.height()];

        values
            .par_iter_mut()
            .zip(input.as_raw().par_chunks_exact(channels))
            .for_each(|(value, px)| {
                *value = Self::pixel_value(px[0], px[1], px[2]);
            });

        let len = values.len();
        IndexGrid::new(input.width(), input.height(), values).ok_or(Error::GridSize {
            expected: input.width() * input.height(),
            actual: len,
        })
    }

    fn required_channels(&self) -> usize {
        3 // R, G, B
    }

    fn name(&self) -> &str {
        &self.name
    }
}
