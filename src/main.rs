// src/main.rs
use anyhow::{bail, Context, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use leaf_index::batch::process_batch;
use leaf_index::cli::Cli;
use leaf_index::io::{DiscardSink, MaskSink, PngSink};
use leaf_index::{VegetationIndexExtractor, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse_args(std::env::args_os());
    init_logging(cli.debug);

    if cli.debug {
        debug!("leaf-index version: {VERSION}");
        debug!(
            "platform: {}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
    }

    if let Some(config) = &cli.batch {
        let summary = process_batch(config, cli.debug)?;
        if !summary.failed.is_empty() {
            bail!("{} batch operation(s) failed", summary.failed.len());
        }
        return Ok(());
    }

    let Some(pair) = cli.image_pair()? else {
        bail!("no input given: pass -dir/--directory or --rgb with --thermal");
    };

    let mut sink: Box<dyn MaskSink> = match &cli.output {
        Some(dir) => Box::new(PngSink::new(dir)),
        None => Box::new(DiscardSink),
    };

    let mut extractor = VegetationIndexExtractor::new(cli.debug);
    let result = extractor
        .run(&pair, sink.as_mut())
        .with_context(|| format!("processing capture {}", pair.name))?;

    if let Some(dir) = &cli.output {
        info!(
            "Processing complete: {} ({} background pixels masked)",
            dir.display(),
            result.masked_pixels
        );
    }
    Ok(())
}

fn init_logging(is_debug: bool) {
    let level = if is_debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}
