use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extract, inspect, and manage color palettes from images.
#[derive(Parser, Debug)]
#[command(name = "gamut", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a palette of dominant colors from an image
    Extract {
        /// Path to the input image
        image: PathBuf,

        /// Number of colors to extract
        #[arg(short = 'k', long = "colors", default_value_t = 5)]
        colors: usize,

        /// Save the extracted palette to the library under this name
        #[arg(short, long)]
        save: Option<String>,

        /// Write the palette as hex lines to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Browse the palette in an interactive terminal UI
        #[arg(long, conflicts_with = "output")]
        tui: bool,
    },

    /// Show one color in every format, with contrast color and variations
    Inspect {
        /// Color to inspect, as 3- or 6-digit hex (leading `#` optional)
        color: String,

        /// Number of value variations to show
        #[arg(short = 'n', long, default_value_t = 5)]
        variations: usize,
    },

    /// List saved palettes
    List,

    /// Show a saved palette
    Show {
        /// Palette name
        name: String,
    },

    /// Export a saved palette as hex lines
    Export {
        /// Palette name
        name: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a saved palette
    Delete {
        /// Palette name
        name: String,
    },
}

/// Palette sizes the `extract` command accepts.
pub const MIN_COLORS: usize = 1;
pub const MAX_COLORS: usize = 8;
