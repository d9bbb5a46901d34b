use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use prismatic::scene::Selection;
use prismatic::spectrum::RAY_COUNT;
use prismatic::tracer::MAX_BOUNCES;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Object to highlight: `light`, `none`, or a prism index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectArg(pub Selection);

impl FromStr for SelectArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SelectArg(Selection::None)),
            "light" => Ok(SelectArg(Selection::Light)),
            _ => s
                .parse::<usize>()
                .map(|index| SelectArg(Selection::Prism(index)))
                .map_err(|_| format!("expected 'light', 'none' or a prism index, got '{s}'")),
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "prismatic")]
#[command(about = "Traces a spectrum of light rays through refractive prisms")]
pub struct Args {
    /// Scene file (TOML); the built-in two-prism bench is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "1000")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "700")]
    pub height: u32,

    /// Number of wavelengths sampled between 400 and 700 nm
    #[arg(long, short = 'n', default_value_t = RAY_COUNT)]
    pub rays: usize,

    /// Surface crossings followed per ray
    #[arg(long, default_value_t = MAX_BOUNCES)]
    pub max_bounces: usize,

    /// Highlight an object: 'light', 'none' or a prism index
    #[arg(long, default_value = "none")]
    pub select: SelectArg,

    /// Render this many frames, turning every prism through a full rotation
    #[arg(long)]
    pub sweep: Option<u32>,

    /// Output PNG path; sweep frames get a zero-padded frame number appended
    #[arg(short, long, default_value = "prismatic.png")]
    pub output: PathBuf,
}
