// src/processing/extractor.rs
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::reader::{self, ImagePair};
use crate::io::writer::MaskSink;
use crate::processing::indices::{leaf::BELOW_ZERO, IndexCalculator, LeafIndex};
use crate::raster::{IndexGrid, RasterImage};

/// Index grid plus the RGB copy with background pixels blacked out
#[derive(Clone, Debug)]
pub struct IndexResult {
    pub index: IndexGrid,
    pub masked: RasterImage,
    pub masked_pixels: usize,
}

/// Loads an RGB/thermal capture and separates leaf pixels from background.
pub struct VegetationIndexExtractor {
    is_debug: bool,
    calculator: Box<dyn IndexCalculator>,
    pair: Option<ImagePair>,
    rgb: Option<RasterImage>,
    thermal: Option<RasterImage>,
}

impl VegetationIndexExtractor {
    pub fn new(is_debug: bool) -> Self {
        Self::with_calculator(is_debug, Box::new(LeafIndex::default()))
    }

    pub fn with_calculator(is_debug: bool, calculator: Box<dyn IndexCalculator>) -> Self {
        Self {
            is_debug,
            calculator,
            pair: None,
            rgb: None,
            thermal: None,
        }
    }

    /// Resolves the capture files inside `directory` and loads them.
    pub fn process_images<P: AsRef<Path>>(&mut self, directory: P) -> Result<()> {
        let directory = directory.as_ref();
        if self.is_debug {
            debug!(directory = %directory.display(), "image directory");
        }

        let pair = ImagePair::from_directory(directory)?;
        self.load_pair(&pair)
    }

    pub fn load_pair(&mut self, pair: &ImagePair) -> Result<()> {
        let (rgb, thermal) = reader::load_pair(pair)?;

        if !rgb.same_shape(&thermal) {
            warn!(
                rgb = ?rgb.shape(),
                thermal = ?thermal.shape(),
                "rgb and thermal images differ in size, pixels will not line up"
            );
        }

        self.pair = Some(pair.clone());
        self.rgb = Some(rgb);
        self.thermal = Some(thermal);
        Ok(())
    }

    /// Computes the index over the loaded RGB raster and masks every pixel
    /// whose value is exactly the below-zero sentinel.
    pub fn calculate_vegetation_index(&self) -> Result<IndexResult> {
        let rgb = self.rgb.as_ref().ok_or(Error::NotLoaded)?;

        let index = self.calculator.calculate(rgb)?;
        let (masked, masked_pixels) = mask_pixels(rgb, &index, BELOW_ZERO);

        debug!(
            index = self.calculator.name(),
            masked_pixels,
            total_pixels = index.values().len(),
            "vegetation index computed"
        );

        Ok(IndexResult {
            index,
            masked,
            masked_pixels,
        })
    }

    /// Load, calculate, and hand the result to `sink`.
    pub fn run(&mut self, pair: &ImagePair, sink: &mut dyn MaskSink) -> Result<IndexResult> {
        self.load_pair(pair)?;
        let result = self.calculate_vegetation_index()?;
        sink.accept(&pair.name, &result)?;

        info!(
            capture = %pair.name,
            masked_pixels = result.masked_pixels,
            "capture processed"
        );
        Ok(result)
    }

    pub fn pair(&self) -> Option<&ImagePair> {
        self.pair.as_ref()
    }

    pub fn rgb(&self) -> Option<&RasterImage> {
        self.rgb.as_ref()
    }

    pub fn thermal(&self) -> Option<&RasterImage> {
        self.thermal.as_ref()
    }
}

/// Copies `image`, zeroing the colour channels of every pixel whose index
/// equals `target`. Channels past the third are left alone.
pub fn mask_pixels(image: &RasterImage, index: &IndexGrid, target: u16) -> (RasterImage, usize) {
    let mut masked = image.clone();

    for (pixel, &value) in masked.pixels_mut().zip(index.values()) {
        if value == target {
            let colour = pixel.len().min(3);
            pixel[..colour].fill(0);
        }
    }

    (masked, index.count(target))
}
