// src/batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::io::{DiscardSink, ImagePair, MaskSink, PngSink};
use crate::processing::VegetationIndexExtractor;

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    /// Glob matching capture directories, e.g. `images/*-*-*/Camera_*/*/`
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct GlobalParams {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub continue_on_error: bool,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    #[serde(flatten)]
    pub params: OperationParams,
    pub name: Option<String>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum OperationParams {
    Pair { rgb: PathBuf, thermal: PathBuf },
    Directory { directory: PathBuf },
}

impl Operation {
    pub fn directory<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            params: OperationParams::Directory {
                directory: directory.as_ref().to_path_buf(),
            },
            name: None,
            output_dir: None,
        }
    }

    fn image_pair(&self) -> crate::Result<ImagePair> {
        let mut pair = match &self.params {
            OperationParams::Pair { rgb, thermal } => ImagePair::new(rgb, thermal),
            OperationParams::Directory { directory } => ImagePair::from_directory(directory)?,
        };
        if let Some(name) = &self.name {
            pair.name = name.clone();
        }
        Ok(pair)
    }

    fn label(&self) -> String {
        match (&self.name, &self.params) {
            (Some(name), _) => name.clone(),
            (None, OperationParams::Pair { rgb, .. }) => rgb.display().to_string(),
            (None, OperationParams::Directory { directory }) => directory.display().to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: Vec<String>,
    pub masked_pixels: usize,
}

impl BatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading batch config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing batch config {}", path.display()))
    }

    /// One directory operation per directory matched by `pattern`
    pub fn pattern_operations(&self) -> Result<Vec<Operation>> {
        let Some(pattern) = &self.pattern else {
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for entry in glob::glob(pattern).with_context(|| format!("invalid glob {pattern}"))? {
            let path = entry?;
            if path.is_dir() {
                matched.push(Operation::directory(path));
            }
        }
        Ok(matched)
    }
}

pub fn process_batch(config_path: &Path, is_debug: bool) -> Result<BatchSummary> {
    let config = BatchConfig::from_file(config_path)?;
    run_batch(&config, is_debug)
}

pub fn run_batch(config: &BatchConfig, is_debug: bool) -> Result<BatchSummary> {
    let discovered = config.pattern_operations()?;
    let operations: Vec<&Operation> = config.operations.iter().chain(discovered.iter()).collect();

    info!("Starting batch processing with {} operations...", operations.len());

    let mut summary = BatchSummary::default();
    for (i, op) in operations.iter().enumerate() {
        let label = op.label();
        info!("[{}/{}] Processing {}", i + 1, operations.len(), label);

        match run_operation(op, config, is_debug) {
            Ok(masked) => {
                summary.processed += 1;
                summary.masked_pixels += masked;
            }
            Err(e) if config.global.continue_on_error => {
                error!("{label}: {e:#}");
                summary.failed.push(label);
            }
            Err(e) => return Err(e.context(format!("batch operation {label} failed"))),
        }
    }

    if summary.failed.is_empty() {
        info!("Batch processing complete!");
    } else {
        info!(
            "Batch processing complete with {} failure(s): {}",
            summary.failed.len(),
            summary.failed.iter().join(", ")
        );
    }
    Ok(summary)
}

fn run_operation(op: &Operation, config: &BatchConfig, is_debug: bool) -> Result<usize> {
    let pair = op.image_pair()?;
    let output_dir = op.output_dir.as_ref().or(config.global.output_dir.as_ref());

    let mut sink: Box<dyn MaskSink> = match output_dir {
        Some(dir) => Box::new(PngSink::new(dir)),
        None => Box::new(DiscardSink),
    };

    let mut extractor = VegetationIndexExtractor::new(is_debug);
    let result = extractor.run(&pair, sink.as_mut())?;
    Ok(result.masked_pixels)
}
