pub mod widgets;

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::DefaultTerminal;

use crate::color::Color as AppColor;
use crate::extract::Swatch;
use crate::library::Library;
use crate::palette::Palette;
use widgets::{ColorDetail, PaletteStrip};

/// How many variation swatches the detail panel shows.
const DETAIL_VARIATIONS: usize = 5;

/// The color representation the detail panel is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

impl ColorFormat {
    pub fn label(self) -> &'static str {
        match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ColorFormat::Hex => ColorFormat::Rgb,
            ColorFormat::Rgb => ColorFormat::Hsl,
            ColorFormat::Hsl => ColorFormat::Hex,
        }
    }

    /// Render a color in this format's display convention.
    pub fn render(self, color: AppColor) -> String {
        match self {
            ColorFormat::Hex => color.format_hex(),
            ColorFormat::Rgb => color.format_rgb(),
            ColorFormat::Hsl => color.hsl().format(),
        }
    }
}

/// State for the interactive palette browser.
pub struct TuiApp {
    pub swatches: Vec<Swatch>,
    pub image_path: PathBuf,
    pub selected: usize,
    pub format: ColorFormat,
    /// Save-dialog input buffer; `Some` while the dialog is open.
    name_input: Option<String>,
    status: Option<String>,
}

impl TuiApp {
    pub fn new(swatches: Vec<Swatch>, image_path: PathBuf) -> Self {
        Self {
            swatches,
            image_path,
            selected: 0,
            format: ColorFormat::Hex,
            name_input: None,
            status: None,
        }
    }

    fn selected_color(&self) -> AppColor {
        self.swatches[self.selected].color
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.swatches.len() {
            self.selected += 1;
        }
    }

    /// Default palette name offered by the save dialog: the image file stem.
    fn default_name(&self) -> String {
        self.image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "palette".to_string())
    }
}

/// Launch the interactive palette browser.
pub fn run(app: TuiApp, library: &mut Library) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app, library);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: TuiApp, library: &mut Library) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, &app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Save dialog captures all keys while open.
        if let Some(name) = &mut app.name_input {
            match key.code {
                KeyCode::Enter => {
                    let name = name.clone();
                    app.name_input = None;
                    app.status = Some(save_palette(&app, &name, library));
                }
                KeyCode::Esc => {
                    app.name_input = None;
                }
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) => {
                    name.push(c);
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Left | KeyCode::Char('h') => app.select_previous(),
            KeyCode::Right | KeyCode::Char('l') => app.select_next(),
            KeyCode::Char('f') | KeyCode::Tab => app.format = app.format.next(),
            KeyCode::Char('s') => {
                app.name_input = Some(app.default_name());
                app.status = None;
            }
            _ => {}
        }
    }
}

fn save_palette(app: &TuiApp, name: &str, library: &mut Library) -> String {
    let colors = app.swatches.iter().map(|s| s.color).collect();
    let result = library
        .add(Palette::new(name, colors))
        .and_then(|_| library.save());
    match result {
        Ok(()) => format!("Saved `{name}` to library"),
        Err(err) => format!("Save failed: {err}"),
    }
}

fn draw(frame: &mut Frame, app: &TuiApp) {
    let [title_area, strip_area, detail_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Line::from(vec![
        Span::styled("gamut", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            app.image_path.display().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    frame.render_widget(PaletteStrip::new(&app.swatches, app.selected), strip_area);

    let selected = app.selected_color();
    // DETAIL_VARIATIONS is nonzero, so this cannot fail
    let variations = selected.value_variations(DETAIL_VARIATIONS).unwrap();
    frame.render_widget(
        ColorDetail::new(selected, app.format, &variations),
        detail_area,
    );

    let footer = if let Some(name) = &app.name_input {
        Line::from(vec![
            Span::styled("Save as: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(name.clone()),
            Span::styled("▏", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "  Enter to save, Esc to cancel",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            "←/→ select   f format   s save   q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatches() -> Vec<Swatch> {
        ["#3366cc", "#ff8800", "#1a1a2e"]
            .iter()
            .map(|hex| Swatch {
                color: AppColor::from_hex(hex).unwrap(),
                weight: 1.0 / 3.0,
            })
            .collect()
    }

    #[test]
    fn format_cycle_wraps() {
        assert_eq!(ColorFormat::Hex.next(), ColorFormat::Rgb);
        assert_eq!(ColorFormat::Rgb.next(), ColorFormat::Hsl);
        assert_eq!(ColorFormat::Hsl.next(), ColorFormat::Hex);
    }

    #[test]
    fn format_render_conventions() {
        let color = AppColor::from_hex("#3366cc").unwrap();
        assert_eq!(ColorFormat::Hex.render(color), "#3366CC");
        assert_eq!(ColorFormat::Rgb.render(color), "rgb(51, 102, 204)");
        assert_eq!(ColorFormat::Hsl.render(color), "hsl(220, 60%, 50%)");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = TuiApp::new(swatches(), PathBuf::from("photo.png"));
        app.select_previous();
        assert_eq!(app.selected, 0);

        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn default_name_is_image_stem() {
        let app = TuiApp::new(swatches(), PathBuf::from("/tmp/beach-sunset.png"));
        assert_eq!(app.default_name(), "beach-sunset");
    }

    #[test]
    fn save_reports_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::open(dir.path().join("palettes.json")).unwrap();
        let app = TuiApp::new(swatches(), PathBuf::from("photo.png"));

        let first = save_palette(&app, "photo", &mut library);
        assert!(first.starts_with("Saved"), "unexpected status: {first}");

        let second = save_palette(&app, "photo", &mut library);
        assert!(
            second.contains("already exists"),
            "unexpected status: {second}"
        );
    }
}
