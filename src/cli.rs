use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::io::ImagePair;

#[derive(Parser, Debug)]
#[command(name = "leaf-index")]
#[command(about = "Separate leaf pixels from background in paired RGB/thermal captures")]
pub struct Cli {
    /// Capture directory holding <name>_rgb_image_cropped.jpg and <name>_thermal.png
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// RGB image path (overrides --directory together with --thermal)
    #[arg(long, requires = "thermal")]
    pub rgb: Option<PathBuf>,

    /// Thermal image path (overrides --directory together with --rgb)
    #[arg(long, requires = "rgb")]
    pub thermal: Option<PathBuf>,

    /// Write the masked image and index grid as PNG into this directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Batch configuration file (JSON)
    #[arg(long, conflicts_with_all = ["directory", "rgb", "thermal"])]
    pub batch: Option<PathBuf>,

    /// Set the debug flag
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Parses arguments, accepting the legacy single-dash `-dir` spelling.
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// The capture to process, explicit paths first
    pub fn image_pair(&self) -> crate::Result<Option<ImagePair>> {
        match (&self.rgb, &self.thermal, &self.directory) {
            (Some(rgb), Some(thermal), _) => Ok(Some(ImagePair::new(rgb, thermal))),
            (_, _, Some(directory)) => ImagePair::from_directory(directory).map(Some),
            _ => Ok(None),
        }
    }
}

/// Flags whose next argument is a value, not a flag
const VALUE_FLAGS: &[&str] = &[
    "--directory",
    "--rgb",
    "--thermal",
    "-o",
    "--output",
    "--batch",
];

/// Rewrites `-dir` and `-dir=<path>` to their `--directory` forms. Only
/// entries in flag position are touched; option values and anything after
/// `--` pass through unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut expects_value = false;
    let mut after_separator = false;

    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        // argv[0] is the program name
        if i == 0 || expects_value || after_separator {
            expects_value = false;
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                after_separator = true;
                arg
            }
            Some("-dir") => {
                expects_value = true;
                OsString::from("--directory")
            }
            Some(s) if s.starts_with("-dir=") => OsString::from(format!("--directory={}", &s[5..])),
            Some(s) => {
                expects_value = VALUE_FLAGS.contains(&s);
                arg
            }
            None => arg,
        };
        out.push(rewritten);
    }
    out
}
