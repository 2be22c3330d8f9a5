use crate::app::App;
use crate::interaction::Mode;
use crate::map::{Label, MarkerLayers};
use crate::markers::Paint;
use crate::overlay::{self, Legend, NearestQuakeMenu, ReportPanel};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Earthquake Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .basemap
        .render(&app.markers, inner.width as usize, inner.height as usize, &viewport);

    let cursor_pos = app.mouse_pixel_pos().and_then(|(px, py)| {
        let cx = u16::try_from(px / 2).ok()?;
        let cy = u16::try_from(py / 4).ok()?;
        (cx < inner.width && cy < inner.height).then_some((cx, cy))
    });

    frame.render_widget(MapWidget { layers, cursor_pos }, inner);
    render_overlays(frame, app, inner);
}

fn render_overlays(frame: &mut Frame, app: &App, inner: Rect) {
    // Same layout the pointer handlers hit-test against
    let layout = app.overlay_layout();

    if let Some(legend) = layout.legend {
        frame.render_widget(Legend, overlay::place(legend, inner));
    }

    if let Some(menu) = layout.menu {
        let button = layout.button.map(|b| overlay::place(b, inner));
        let mode = app.interaction.mode();
        NearestQuakeMenu { mode }.render(overlay::place(menu, inner), button, frame.buffer_mut());
    }

    if let (Some(report), Some(area)) = (&app.nearest, layout.report) {
        frame.render_widget(ReportPanel { report }, overlay::place(area, inner));
    }
}

/// Braille marker layers with hover titles and the cursor on top
struct MapWidget {
    layers: MarkerLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    fn render_layer(&self, paint: Paint, area: Rect, buf: &mut Buffer) {
        let canvas = self.layers.layer(paint);
        let color = overlay::paint_color(paint);
        let rows = canvas.height().min(area.height as usize);
        let cols = canvas.width().min(area.width as usize);

        for row in 0..rows {
            for col in 0..cols {
                if let Some(ch) = canvas.cell(col, row) {
                    buf[(area.x + col as u16, area.y + row as u16)]
                        .set_char(ch)
                        .set_fg(color);
                }
            }
        }
    }

    fn render_label(label: &Label, area: Rect, buf: &mut Buffer) {
        if label.row >= area.height || label.col >= area.width {
            return;
        }
        let style = Style::default()
            .fg(overlay::paint_color(label.paint))
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD);

        // Centered under the marker, clipped to the map
        let len = label.text.chars().count() as u16;
        let start = label.col.saturating_sub(len / 2);
        let y = area.y + label.row;
        for (i, ch) in label.text.chars().enumerate() {
            let col = start + i as u16;
            if col >= area.width {
                break;
            }
            buf[(area.x + col, y)].set_char(ch).set_style(style);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for paint in Paint::ALL {
            self.render_layer(paint, area, buf);
        }

        for label in self.layers.labels() {
            Self::render_label(label, area, buf);
        }

        if let Some((cx, cy)) = self.cursor_pos {
            buf[(area.x + cx, area.y + cy)].set_char('╋').set_fg(Color::Red);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.basemap.settings;
    let mode = app.interaction.mode();
    let toggle = |on: bool, on_text: &'static str, off_text: &'static str| {
        Span::styled(
            if on { on_text } else { off_text },
            Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
        )
    };

    let status = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            mode.label(),
            Style::default()
                .fg(if mode == Mode::CustomLocation { overlay::ORANGE } else { Color::Cyan })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | Quakes: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} land, {} ocean ", app.markers.land_count(), app.markers.ocean_count()),
            Style::default().fg(Color::Magenta),
        ),
        toggle(settings.show_outlines, "[B]order ", "[b]order "),
        toggle(settings.show_legend, "[G]uide ", "[g]uide "),
        Span::styled(
            "| hjkl:pan +/-:zoom r:reset q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
