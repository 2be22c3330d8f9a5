//! Legend and mode panel drawn over the map.
//!
//! Rectangles are in character cells relative to the map's inner area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::interaction::Mode;
use crate::markers::{DepthBand, Paint};
use crate::nearest::NearestReport;

pub const LEGEND: Rect = Rect { x: 1, y: 1, width: 25, height: 12 };
pub const MENU: Rect = Rect { x: 1, y: 14, width: 25, height: 8 };
/// Custom location button, inside the menu panel
pub const MENU_BUTTON: Rect = Rect { x: 9, y: 19, width: 6, height: 2 };
/// Nearest-quake report, below the menu
pub const REPORT: Rect = Rect { x: 1, y: 23, width: 40, height: 8 };

pub const PANEL: Color = Color::Rgb(255, 250, 240);
pub const ORANGE: Color = Color::Rgb(255, 153, 0);
const INK: Color = Color::Rgb(40, 40, 40);

/// Terminal color for each marker paint
pub fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Basemap => Color::Rgb(90, 110, 90),
        Paint::ThreatLine => Color::Rgb(200, 200, 200),
        Paint::Shallow => Color::Yellow,
        Paint::Intermediate => Color::Blue,
        Paint::Deep => Color::Red,
        Paint::Glyph => Color::White,
        Paint::City => Color::Rgb(255, 80, 80),
        Paint::Custom => ORANGE,
        Paint::Title => Color::White,
    }
}

/// Offset a map-relative rectangle into `area`
pub fn place(rect: Rect, area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(rect.x),
        y: area.y.saturating_add(rect.y),
        ..rect
    }
}

/// Panels shown over a map of a given size, in map-relative cells.
///
/// A panel is `None` when it is switched off or does not fit. The button is
/// only live while its menu is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayLayout {
    pub legend: Option<Rect>,
    pub menu: Option<Rect>,
    pub button: Option<Rect>,
    pub report: Option<Rect>,
}

impl OverlayLayout {
    pub fn new(width: u16, height: u16, show_legend: bool, show_report: bool) -> Self {
        let shown = |rect: Rect, on: bool| {
            (on && rect.right() <= width && rect.bottom() <= height).then_some(rect)
        };
        let menu = shown(MENU, true);
        Self {
            legend: shown(LEGEND, show_legend),
            menu,
            button: menu.and(shown(MENU_BUTTON, true)),
            report: shown(REPORT, show_report),
        }
    }

    /// Every visible panel, the button's menu included
    pub fn panels(&self) -> impl Iterator<Item = Rect> {
        [self.legend, self.menu, self.report].into_iter().flatten()
    }
}

/// Marker key: shapes, depth colors and the past-hour glyph
pub struct Legend;

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Style::default().fg(INK);
        let swatch = |band: DepthBand, label: &'static str| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(paint_color(band.paint()))),
                Span::styled(label, text),
            ])
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("▲ ", Style::default().fg(paint_color(Paint::City))),
                Span::styled("City Marker", text),
            ]),
            Line::from(Span::styled("● Land Quake", text)),
            Line::from(Span::styled("■ Ocean Quake", text)),
            Line::from(Span::styled("Size ~ Magnitude", text)),
            swatch(DepthBand::Shallow, "Shallow"),
            swatch(DepthBand::Intermediate, "Intermediate"),
            swatch(DepthBand::Deep, "Deep"),
            Line::from(Span::styled("✕ Past hour", text)),
        ];

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Legend ")
                    .style(Style::default().bg(PANEL).fg(INK)),
            )
            .render(area, buf);
    }
}

/// Mode-dependent instructions plus the custom location button
pub struct NearestQuakeMenu {
    pub mode: Mode,
}

impl NearestQuakeMenu {
    /// Render the panel into `area` and the button into `button`
    pub fn render(self, area: Rect, button: Option<Rect>, buf: &mut Buffer) {
        let (bg, lines) = match self.mode {
            Mode::CustomLocation => (
                ORANGE,
                ["Now click on the map.", "Then click again to", "return to the default"],
            ),
            Mode::Default | Mode::Historical => (
                PANEL,
                ["Click this button to", "set your location and", "see the nearest quake"],
            ),
        };

        Clear.render(area, buf);
        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).style(Style::default().bg(bg).fg(INK)))
            .render(area, buf);

        if self.mode == Mode::Default {
            if let Some(button) = button {
                Paragraph::new(Line::from(Span::styled(
                    " GO ",
                    Style::default().add_modifier(Modifier::BOLD),
                )))
                .style(Style::default().bg(ORANGE).fg(INK))
                .render(button, buf);
            }
        }
    }
}

/// Distance ranking from the custom location, nearest first
pub struct ReportPanel<'a> {
    pub report: &'a NearestReport,
}

impl Widget for ReportPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = if self.report.is_empty() {
            vec![Line::from("No earthquakes loaded")]
        } else {
            self.report.lines().take(rows).map(Line::from).collect()
        };

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.report.heading()))
                    .style(Style::default().bg(PANEL).fg(INK)),
            )
            .render(area, buf);
    }
}
