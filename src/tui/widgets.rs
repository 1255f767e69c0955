use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::extract::Swatch;

use super::ColorFormat;

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Readable label color for text drawn on a colored swatch.
fn contrast_fg(c: AppColor) -> Color {
    to_color(c.contrast_color())
}

/// A widget that renders the extracted palette as a row of colored swatches
/// labeled with hex values and pixel shares. Highlights the selected swatch.
pub struct PaletteStrip<'a> {
    swatches: &'a [Swatch],
    selected: usize,
}

impl<'a> PaletteStrip<'a> {
    pub fn new(swatches: &'a [Swatch], selected: usize) -> Self {
        Self { swatches, selected }
    }
}

/// Build the row of colored swatches. Each swatch shows its hex value on its
/// own background; the selected swatch gets bold + underline.
fn build_swatch_row(swatches: &[Swatch], selected: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, swatch) in swatches.iter().enumerate() {
        let label = format!("{:^9}", swatch.color.format_hex());
        let mut style = Style::default()
            .bg(to_color(swatch.color))
            .fg(contrast_fg(swatch.color));
        if i == selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Build the row of pixel-share labels below the swatches.
fn build_weight_row(swatches: &[Swatch], selected: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, swatch) in swatches.iter().enumerate() {
        let label = format!("{:^9}", format!("{:.0}%", swatch.weight * 100.0));
        let style = if i == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

impl Widget for PaletteStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Palette");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            build_swatch_row(self.swatches, self.selected),
            build_weight_row(self.swatches, self.selected),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// A widget that renders everything about one color: its value in the active
/// format on a colored preview band, the format selector, a strip of value
/// variations, and the hue/saturation/lightness readout.
pub struct ColorDetail<'a> {
    color: AppColor,
    format: ColorFormat,
    variations: &'a [AppColor],
}

impl<'a> ColorDetail<'a> {
    pub fn new(color: AppColor, format: ColorFormat, variations: &'a [AppColor]) -> Self {
        Self {
            color,
            format,
            variations,
        }
    }
}

fn build_format_selector(active: ColorFormat) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for format in [ColorFormat::Hex, ColorFormat::Rgb, ColorFormat::Hsl] {
        let style = if format == active {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", format.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "(f to switch)",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn build_variation_row(variations: &[AppColor]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for variation in variations {
        spans.push(Span::styled(
            " ".repeat(6),
            Style::default().bg(to_color(*variation)),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

impl Widget for ColorDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Color");
        let inner = block.inner(area);
        block.render(area, buf);

        let info = self.color.hsl();
        let value = self.format.render(self.color);

        let preview_style = Style::default()
            .bg(to_color(self.color))
            .fg(contrast_fg(self.color))
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("  {value:^24}  "), preview_style),
            ]),
            Line::from(""),
            build_format_selector(self.format),
            Line::from(""),
            Line::from(Span::styled(
                "  Value variations",
                Style::default().fg(Color::DarkGray),
            )),
            build_variation_row(self.variations),
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Hue ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}°", info.h)),
                Span::styled("   Saturation ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}%", info.s)),
                Span::styled("   Lightness ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}%", info.l)),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
