// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{load_image, load_pair, ImagePair};
pub use writer::{write_raster, DiscardSink, MaskSink, PngSink};
