use tracing::warn;

use crate::interaction::{ClickOutcome, InteractionState, Mode};
use crate::map::{Basemap, Viewport};
use crate::markers::MarkerSet;
use crate::nearest::NearestReport;
use crate::overlay::OverlayLayout;

pub struct App {
    pub viewport: Viewport,
    pub basemap: Basemap,
    pub markers: MarkerSet,
    pub interaction: InteractionState,
    /// Ranking from the last custom location placement
    pub nearest: Option<NearestReport>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
    /// Set once the pressed button moves; a release then ends a drag, not a click
    dragged: bool,
}

impl App {
    pub fn new(width: usize, height: usize, markers: MarkerSet) -> Self {
        // Account for border (2 chars horizontal, 2 chars vertical including status bar)
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);

        let basemap = Basemap::from_countries(&markers.countries);
        if !basemap.has_data() {
            warn!("no country outlines loaded, the basemap will be blank");
        }

        Self {
            viewport: Viewport::world(inner_width * 2, inner_height * 4),
            basemap,
            markers,
            interaction: InteractionState::default(),
            nearest: None,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            dragged: false,
        }
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        self.viewport.width = inner_width * 2;
        self.viewport.height = inner_height * 4;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    /// Back to the whole-world view
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Panels as `ui::render` lays them out for the current map size
    pub fn overlay_layout(&self) -> OverlayLayout {
        let cells = |pixels: usize, per_cell: usize| {
            u16::try_from(pixels / per_cell).unwrap_or(u16::MAX)
        };
        OverlayLayout::new(
            cells(self.viewport.width, 2),
            cells(self.viewport.height, 4),
            self.basemap.settings.show_legend,
            self.interaction.mode() == Mode::CustomLocation && self.nearest.is_some(),
        )
    }

    fn sync_overlays(&mut self) {
        let layout = self.overlay_layout();
        self.interaction.set_overlays(&layout);
    }

    /// Hover at a terminal cell
    pub fn pointer_moved(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
        self.sync_overlays();
        self.interaction
            .pointer_moved(&mut self.markers, &self.viewport, cell_to_pixel(col, row));
    }

    /// Click at a terminal cell
    pub fn pointer_clicked(&mut self, col: u16, row: u16) -> ClickOutcome {
        self.sync_overlays();
        let outcome = self
            .interaction
            .pointer_clicked(&mut self.markers, &self.viewport, cell_to_pixel(col, row));

        match &outcome {
            ClickOutcome::PlacedCustom(report) => self.nearest = Some(report.clone()),
            ClickOutcome::ExitedCustomMode => self.nearest = None,
            _ => {}
        }
        outcome
    }

    /// Left button pressed: may become a click or a drag
    pub fn mouse_down(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Handle mouse drag by panning
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            if dx == 0 && dy == 0 {
                return;
            }
            // Scale based on zoom: less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
            self.dragged = true;
        }
        self.last_mouse = Some((x, y));
    }

    /// Left button released. Returns the click outcome unless the press was a drag.
    pub fn mouse_up(&mut self, col: u16, row: u16) -> Option<ClickOutcome> {
        let was_press = self.last_mouse.take().is_some();
        let dragged = std::mem::take(&mut self.dragged);
        (was_press && !dragged).then(|| self.pointer_clicked(col, row))
    }

    /// Get mouse position in braille pixel coordinates (for rendering the cursor)
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos.map(|(col, row)| cell_to_pixel(col, row))
    }
}

/// Terminal cell to the braille pixel at its center, inside the map border
fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    let px = (col.saturating_sub(1)) as i32 * 2 + 1;
    let py = (row.saturating_sub(1)) as i32 * 4 + 2;
    (px, py)
}
