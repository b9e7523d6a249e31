// src/raster.rs
use image::DynamicImage;

use crate::error::{Error, Result};

/// Decoded 8-bit raster, row-major with interleaved channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wraps a raw buffer. Returns `None` when the buffer length does not
    /// match `width * height * channels`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        if channels == 0 || data.len() != width * height * channels {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Narrows any decoded image to 8 bits per channel, keeping its channel layout.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;

        let (channels, data) = match image.color().channel_count() {
            1 => (1, image.into_luma8().into_raw()),
            2 => (2, image.into_luma_alpha8().into_raw()),
            3 => (3, image.into_rgb8().into_raw()),
            _ => (4, image.into_rgba8().into_raw()),
        };

        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// (height, width), matching the row/column order used for indexing
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn same_shape(&self, other: &RasterImage) -> bool {
        self.shape() == other.shape()
    }

    pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
        let start = (row * self.width + col) * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels)
    }

    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.channels)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Removes the last channel of every pixel. Applied to thermal captures
    /// whether or not that channel is really alpha.
    pub fn drop_last_channel(&self) -> Result<RasterImage> {
        if self.channels < 2 {
            return Err(Error::TooFewChannels {
                expected: 2,
                actual: self.channels,
            });
        }

        let kept = self.channels - 1;
        let mut data = Vec::with_capacity(self.width * self.height * kept);
        for pixel in self.pixels() {
            data.extend_from_slice(&pixel[..kept]);
        }

        Ok(RasterImage {
            width: self.width,
            height: self.height,
            channels: kept,
            data,
        })
    }
}

/// Per-pixel vegetation index values, same height and width as the source raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexGrid {
    width: usize,
    height: usize,
    values: Vec<u16>,
}

impl IndexGrid {
    /// Returns `None` when `values` does not hold `width * height` cells.
    pub fn new(width: usize, height: usize, values: Vec<u16>) -> Option<Self> {
        if values.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.values[row * self.width + col]
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Number of cells holding exactly `value`
    pub fn count(&self, value: u16) -> usize {
        self.values.iter().filter(|&&v| v == value).count()
    }
}
