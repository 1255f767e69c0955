use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::{Color as TermColor, Stylize};
use tracing_subscriber::EnvFilter;

use gamut::cli::{Args, Command, MAX_COLORS, MIN_COLORS};
use gamut::color::{Color, ColorInfo};
use gamut::extract::{extract_palette, load_pixels};
use gamut::library::Library;
use gamut::palette::Palette;
use gamut::tui::{self, TuiApp};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Extract {
            image,
            colors,
            save,
            output,
            tui,
        } => cmd_extract(&image, colors, save, output, tui),
        Command::Inspect { color, variations } => cmd_inspect(&color, variations),
        Command::List => cmd_list(),
        Command::Show { name } => cmd_show(&name),
        Command::Export { name, output } => cmd_export(&name, output),
        Command::Delete { name } => cmd_delete(&name),
    }
}

fn cmd_extract(
    image: &Path,
    colors: usize,
    save: Option<String>,
    output: Option<PathBuf>,
    tui: bool,
) -> Result<()> {
    if !(MIN_COLORS..=MAX_COLORS).contains(&colors) {
        bail!("color count must be between {MIN_COLORS} and {MAX_COLORS}, got {colors}");
    }

    let pixels = load_pixels(image)?;
    let swatches = extract_palette(&pixels, colors);
    if swatches.is_empty() {
        bail!("no colors could be extracted from {}", image.display());
    }

    if let Some(name) = save {
        let mut library = Library::open_default()?;
        let palette = Palette::new(name.as_str(), swatches.iter().map(|s| s.color).collect());
        library.add(palette)?;
        library.save()?;
        println!("Saved `{name}` to library");
    }

    if tui {
        let mut library = Library::open_default()?;
        return tui::run(TuiApp::new(swatches, image.to_path_buf()), &mut library);
    }

    if let Some(path) = output {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "palette".to_string());
        let palette = Palette::new(stem, swatches.iter().map(|s| s.color).collect());
        std::fs::write(&path, palette.export_hex())
            .with_context(|| format!("failed to write palette to {}", path.display()))?;
        return Ok(());
    }

    for swatch in &swatches {
        print_swatch(swatch.color, Some(swatch.weight));
    }
    Ok(())
}

fn cmd_inspect(color: &str, variations: usize) -> Result<()> {
    let info = ColorInfo::from_hex(color)?;

    let preview = "      ".on(term_color(info.rgb));
    println!("{preview}  {}", info.hex);
    println!("        {}", info.rgb.format_rgb());
    println!("        {}", info.hsl.format());
    println!(
        "        contrast text: {}",
        info.rgb.contrast_color().format_hex()
    );
    println!();
    println!("Value variations:");
    for variation in info.rgb.value_variations(variations)? {
        print_swatch(variation, None);
    }
    Ok(())
}

fn cmd_list() -> Result<()> {
    let library = Library::open_default()?;
    if library.list().is_empty() {
        println!("No saved palettes.");
        return Ok(());
    }
    for palette in library.list() {
        let strip: String = palette
            .colors
            .iter()
            .map(|c| "  ".on(term_color(*c)).to_string())
            .collect();
        println!(
            "{strip}  {}  ({} colors, {})",
            palette.name,
            palette.colors.len(),
            palette.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn cmd_show(name: &str) -> Result<()> {
    let library = Library::open_default()?;
    let palette = library
        .get(name)
        .with_context(|| format!("no palette named `{name}`"))?;
    for color in &palette.colors {
        print_swatch(*color, None);
    }
    Ok(())
}

fn cmd_export(name: &str, output: Option<PathBuf>) -> Result<()> {
    let library = Library::open_default()?;
    let palette = library
        .get(name)
        .with_context(|| format!("no palette named `{name}`"))?;
    match output {
        Some(path) => {
            std::fs::write(&path, palette.export_hex())
                .with_context(|| format!("failed to write palette to {}", path.display()))?;
        }
        None => print!("{}", palette.export_hex()),
    }
    Ok(())
}

fn cmd_delete(name: &str) -> Result<()> {
    let mut library = Library::open_default()?;
    library.remove(name)?;
    library.save()?;
    println!("Deleted `{name}`");
    Ok(())
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Print one color as a terminal swatch followed by its hex value and,
/// when known, its pixel share.
fn print_swatch(color: Color, weight: Option<f32>) {
    let block = "      ".on(term_color(color));
    match weight {
        Some(weight) => println!("{block}  {}  {:>5.1}%", color.format_hex(), weight * 100.0),
        None => println!("{block}  {}", color.format_hex()),
    }
}
