// src/io/reader.rs
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::RasterImage;

pub const RGB_SUFFIX: &str = "_rgb_image_cropped.jpg";
pub const THERMAL_SUFFIX: &str = "_thermal.png";

/// The two files making up one capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePair {
    pub name: String,
    pub rgb: PathBuf,
    pub thermal: PathBuf,
}

impl ImagePair {
    /// Explicit paths. The capture name is taken from the RGB file stem.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(rgb: P, thermal: Q) -> Self {
        let rgb = rgb.as_ref().to_path_buf();
        let rgb_tag = Path::new(RGB_SUFFIX)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = rgb
            .file_stem()
            .map(|stem| stem.to_string_lossy().trim_end_matches(rgb_tag.as_str()).to_string())
            .unwrap_or_else(|| "capture".to_string());

        Self {
            name,
            rgb,
            thermal: thermal.as_ref().to_path_buf(),
        }
    }

    /// Resolves `<dir>/<name>_rgb_image_cropped.jpg` and `<dir>/<name>_thermal.png`
    /// where `<name>` is the last component of `dir`. Paths ending in `.` or
    /// `..` are canonicalized to find the name; files stay joined onto `dir`.
    pub fn from_directory<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let invalid = || Error::InvalidDirectory(directory.to_path_buf());

        let last = match directory.file_name() {
            Some(name) => Some(name.to_os_string()),
            None => fs::canonicalize(directory)
                .map_err(|_| invalid())?
                .file_name()
                .map(|name| name.to_os_string()),
        };
        let name = last
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(invalid)?;

        Ok(Self {
            rgb: directory.join(format!("{name}{RGB_SUFFIX}")),
            thermal: directory.join(format!("{name}{THERMAL_SUFFIX}")),
            name,
        })
    }
}

/// Decodes an image file into an 8-bit raster with its native channel count.
/// The format is sniffed from the file contents, not the extension.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RasterImage> {
    let path = path.as_ref();
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(ImageError::IoError)
        .and_then(ImageReader::decode)
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let raster = RasterImage::from_dynamic(decoded);

    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        channels = raster.channels(),
        "decoded image"
    );
    Ok(raster)
}

/// Loads both rasters of a capture. Both paths are checked before anything
/// is decoded, RGB first. The thermal raster loses its last channel.
pub fn load_pair(pair: &ImagePair) -> Result<(RasterImage, RasterImage)> {
    if !pair.rgb.is_file() {
        return Err(Error::MissingRgbImage(pair.rgb.clone()));
    }
    if !pair.thermal.is_file() {
        return Err(Error::MissingThermalImage(pair.thermal.clone()));
    }

    let rgb = load_image(&pair.rgb)?;
    let thermal = load_image(&pair.thermal)?.drop_last_channel()?;

    Ok((rgb, thermal))
}
