// src/io/writer.rs
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::processing::IndexResult;
use crate::raster::RasterImage;

/// Receives the outcome of a processed capture
pub trait MaskSink {
    fn accept(&mut self, name: &str, result: &IndexResult) -> Result<()>;
}

/// Drops every result
#[derive(Default)]
pub struct DiscardSink;

impl MaskSink for DiscardSink {
    fn accept(&mut self, _name: &str, _result: &IndexResult) -> Result<()> {
        Ok(())
    }
}

/// Writes `<name>_masked.png` and `<name>_index.png` into a directory
pub struct PngSink {
    dir: PathBuf,
}

impl PngSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn masked_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}_masked.png"))
    }

    pub fn index_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}_index.png"))
    }
}

impl MaskSink for PngSink {
    fn accept(&mut self, name: &str, result: &IndexResult) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let masked_path = self.masked_path(name);
        write_raster(&result.masked, &masked_path)?;

        // Index values are 0/1 almost everywhere, stretch them to full grey
        let index = &result.index;
        let grey: Vec<u8> = index
            .values()
            .iter()
            .map(|&v| (u32::from(v) * 255).min(255) as u8)
            .collect();
        let index_path = self.index_path(name);
        write_png(
            &index_path,
            &grey,
            index.width(),
            index.height(),
            ExtendedColorType::L8,
        )?;

        debug!(
            masked = %masked_path.display(),
            index = %index_path.display(),
            "wrote capture outputs"
        );
        Ok(())
    }
}

/// Encodes a raster as PNG, picking the colour type from its channel count
pub fn write_raster(raster: &RasterImage, path: &Path) -> Result<()> {
    let color = match raster.channels() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        other => return Err(Error::UnsupportedChannels(other)),
    };
    write_png(path, raster.as_raw(), raster.width(), raster.height(), color)
}

fn write_png(
    path: &Path,
    data: &[u8],
    width: usize,
    height: usize,
    color: ExtendedColorType,
) -> Result<()> {
    let output = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new(output);

    encoder
        .write_image(data, width as u32, height as u32, color)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })
}
