use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::text::Granularity;

#[derive(Parser)]
#[command(name = "textface")]
#[command(version)]
#[command(about = "Lay out mixed-script text over a chain of fallback faces", long_about = None)]
#[command(after_help = "\
CONFIG:
    Faces and cache granularity are read from
    $XDG_CONFIG_HOME/textface/config.toml (or ~/.config/textface/config.toml).
    Without a config file a Latin face (24px) backed by a CJK face (32px)
    is used.")]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the glyph cache sub-pixel granularity
    #[arg(long, global = true, value_enum)]
    pub granularity: Option<Granularity>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the face chunks of a line
    Split {
        text: String,
    },
    /// Print the glyph placements of a line
    Layout {
        text: String,
        /// Origin x in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        /// Origin y (baseline) in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the aggregated metrics of the face chain
    Metrics,
}
