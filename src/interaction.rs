//! Pointer-driven state machine: hover selection, click filtering and the
//! custom location cycle.

use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::map::ScreenProjection;
use crate::markers::{CustomLocationMarker, Marker, MarkerId, MarkerSet};
use crate::nearest::{self, NearestReport};
use crate::overlay::OverlayLayout;
use crate::visibility;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Default,
    CustomLocation,
    /// Reserved, never entered
    Historical,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Default => "DEFAULT",
            Mode::CustomLocation => "CUSTOM LOCATION",
            Mode::Historical => "HISTORICAL",
        }
    }
}

/// Overlay rectangle in map pixels, half-open on the right and bottom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Pixel bounds covering a rectangle of character cells
    pub fn from_cells(cells: Rect) -> Self {
        Self {
            left: i32::from(cells.x) * 2,
            top: i32::from(cells.y) * 4,
            right: (i32::from(cells.x) + i32::from(cells.width)) * 2,
            bottom: (i32::from(cells.y) + i32::from(cells.height)) * 4,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// What a click did, for logging and the UI
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Clicked(MarkerId),
    Deselected,
    EnteredCustomMode,
    PlacedCustom(NearestReport),
    ExitedCustomMode,
    /// Button pressed while already waiting for a placement click
    Rejected,
    Nothing,
}

/// Hover and click bookkeeping owned by the application
#[derive(Clone, Debug)]
pub struct InteractionState {
    mode: Mode,
    last_selected: Option<MarkerId>,
    last_clicked: Option<MarkerId>,
    /// None while the menu is off screen
    button: Option<PixelRect>,
    /// Panels drawn over the map; they shadow the markers beneath them
    panels: Vec<PixelRect>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(&OverlayLayout::new(u16::MAX, u16::MAX, true, false))
    }
}

impl InteractionState {
    pub fn new(layout: &OverlayLayout) -> Self {
        let mut state = Self {
            mode: Mode::Default,
            last_selected: None,
            last_clicked: None,
            button: None,
            panels: Vec::new(),
        };
        state.set_overlays(layout);
        state
    }

    /// Track the overlay panels as currently laid out
    pub fn set_overlays(&mut self, layout: &OverlayLayout) {
        self.button = layout.button.map(PixelRect::from_cells);
        self.panels.clear();
        self.panels.extend(layout.panels().map(PixelRect::from_cells));
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_selected(&self) -> Option<MarkerId> {
        self.last_selected
    }

    pub fn last_clicked(&self) -> Option<MarkerId> {
        self.last_clicked
    }

    pub fn button(&self) -> Option<PixelRect> {
        self.button
    }

    fn over_panel(&self, (x, y): (i32, i32)) -> bool {
        self.panels.iter().any(|panel| panel.contains(x, y))
    }

    /// Move the hover selection to the first visible quake, city or pin under
    /// `cursor`. The previous selection is cleared first. Panels hide what is
    /// beneath them.
    pub fn pointer_moved<P: ScreenProjection>(
        &mut self,
        markers: &mut MarkerSet,
        proj: &P,
        cursor: (i32, i32),
    ) {
        if let Some(prev) = self.last_selected.take() {
            if let Some(marker) = markers.get_mut(prev) {
                marker.base_mut().selected = false;
            }
        }
        if self.over_panel(cursor) {
            return;
        }

        let hit = find_hit(markers, proj, cursor, &HOVER_ORDER);
        if let Some(id) = hit {
            if let Some(marker) = markers.get_mut(id) {
                marker.base_mut().selected = true;
            }
            self.last_selected = Some(id);
        }
    }

    /// Handle a click at `cursor` (map pixels).
    ///
    /// A click on a panel, off the button, is a click on empty map: it never
    /// reaches the markers beneath and never places the pin.
    pub fn pointer_clicked<P: ScreenProjection>(
        &mut self,
        markers: &mut MarkerSet,
        proj: &P,
        cursor: (i32, i32),
    ) -> ClickOutcome {
        let on_button = self.button.is_some_and(|b| b.contains(cursor.0, cursor.1));
        let on_panel = !on_button && self.over_panel(cursor);

        let outcome = if on_button {
            self.press_button(markers)
        } else if self.mode == Mode::CustomLocation {
            if !awaiting_placement(markers) {
                self.exit_custom_mode(markers)
            } else if on_panel {
                ClickOutcome::Nothing
            } else {
                self.place_custom(markers, proj, cursor)
            }
        } else if self.last_clicked.is_some() {
            self.deselect(markers);
            ClickOutcome::Deselected
        } else if on_panel {
            ClickOutcome::Nothing
        } else {
            match find_hit(markers, proj, cursor, &CLICK_ORDER) {
                Some(id) => {
                    if let Some(marker) = markers.get_mut(id) {
                        marker.base_mut().clicked = true;
                    }
                    self.last_clicked = Some(id);
                    visibility::resolve(markers, id);
                    ClickOutcome::Clicked(id)
                }
                None => ClickOutcome::Nothing,
            }
        };

        debug!(x = cursor.0, y = cursor.1, mode = self.mode.label(), ?outcome, "click");
        outcome
    }

    fn press_button(&mut self, markers: &mut MarkerSet) -> ClickOutcome {
        if self.mode == Mode::CustomLocation {
            return ClickOutcome::Rejected;
        }

        self.deselect(markers);
        self.mode = Mode::CustomLocation;

        let mut pin = CustomLocationMarker::new(Default::default());
        pin.base_mut().clicked = true;
        markers.custom = Some(pin);
        self.last_clicked = Some(MarkerId::Custom);

        info!("custom location mode: waiting for a map click");
        ClickOutcome::EnteredCustomMode
    }

    fn place_custom<P: ScreenProjection>(
        &mut self,
        markers: &mut MarkerSet,
        proj: &P,
        cursor: (i32, i32),
    ) -> ClickOutcome {
        let location = proj.location_from_screen(cursor.0, cursor.1);
        let pin = markers
            .custom
            .get_or_insert_with(|| CustomLocationMarker::new(location));
        pin.place(location);
        pin.base_mut().clicked = true;
        self.last_clicked = Some(MarkerId::Custom);

        visibility::hide_all_but_custom(markers);
        let report = nearest::locate_nearest(markers, location);
        ClickOutcome::PlacedCustom(report)
    }

    fn exit_custom_mode(&mut self, markers: &mut MarkerSet) -> ClickOutcome {
        visibility::unhide_all(markers);
        markers.custom = None;
        self.clear_selection_of(MarkerId::Custom);
        self.last_clicked = None;
        self.mode = Mode::Default;
        info!("back to default mode");
        ClickOutcome::ExitedCustomMode
    }

    /// Undo the current click filter, if any
    fn deselect(&mut self, markers: &mut MarkerSet) {
        let Some(id) = self.last_clicked.take() else {
            return;
        };
        visibility::unhide_all(markers);
        if let MarkerId::Quake(i) = id {
            if let Some(quake) = markers.quakes.get_mut(i) {
                quake.clear_threatened_cities();
            }
        }
        if let Some(marker) = markers.get_mut(id) {
            marker.base_mut().clicked = false;
        }
    }

    fn clear_selection_of(&mut self, id: MarkerId) {
        if self.last_selected == Some(id) {
            self.last_selected = None;
        }
    }
}

/// The pin is absent or still hidden
fn awaiting_placement(markers: &MarkerSet) -> bool {
    markers.custom.as_ref().map_or(true, |pin| pin.is_hidden())
}

#[derive(Clone, Copy)]
enum Group {
    Cities,
    Quakes,
    Custom,
}

const HOVER_ORDER: [Group; 3] = [Group::Quakes, Group::Cities, Group::Custom];
const CLICK_ORDER: [Group; 2] = [Group::Cities, Group::Quakes];

/// First visible marker under `cursor`, scanning groups in `order`
fn find_hit<P: ScreenProjection>(
    markers: &MarkerSet,
    proj: &P,
    cursor: (i32, i32),
    order: &[Group],
) -> Option<MarkerId> {
    order.iter().find_map(|group| match group {
        Group::Quakes => markers
            .quakes
            .iter()
            .position(|q| under_cursor(q, proj, cursor))
            .map(MarkerId::Quake),
        Group::Cities => markers
            .cities
            .iter()
            .position(|c| under_cursor(c, proj, cursor))
            .map(MarkerId::City),
        Group::Custom => markers
            .custom
            .as_ref()
            .filter(|pin| under_cursor(*pin, proj, cursor))
            .map(|_| MarkerId::Custom),
    })
}

fn under_cursor<P: ScreenProjection>(marker: &dyn Marker, proj: &P, cursor: (i32, i32)) -> bool {
    !marker.is_hidden()
        && marker.contains_screen_point(proj.screen_from_location(marker.location()), cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::Location;
    use crate::markers::test_support::{city, quake, square_country};
    use crate::overlay;

    /// Four pixels per degree, north up, (-180, 90) at the origin
    struct FlatProjection;

    impl ScreenProjection for FlatProjection {
        fn screen_from_location(&self, loc: Location) -> (i32, i32) {
            let x = ((loc.lon + 180.0) * 4.0).round() as i32;
            let y = ((90.0 - loc.lat) * 4.0).round() as i32;
            (x, y)
        }

        fn location_from_screen(&self, px: i32, py: i32) -> Location {
            Location::new(90.0 - py as f64 / 4.0, px as f64 / 4.0 - 180.0)
        }
    }

    fn at(lat: f64, lon: f64) -> (i32, i32) {
        FlatProjection.screen_from_location(Location::new(lat, lon))
    }

    const BUTTON: (i32, i32) = (20, 80);
    const EMPTY_SEA: (i32, i32) = (4, 700);
    /// Inside the legend panel, at 85°N 175°W
    const UNDER_LEGEND: (i32, i32) = (20, 20);
    /// Menu text above the button
    const MENU_TEXT: (i32, i32) = (20, 64);

    fn scenario_world() -> MarkerSet {
        MarkerSet::build(
            vec![
                city("Los Angeles", 34.05, -118.25),
                city("Tokyo", 35.68, 139.69),
                city("Lima", -12.05, -77.04),
            ],
            vec![
                square_country("West", 20.0, -125.0, 50.0, -100.0),
                square_country("East", 20.0, 125.0, 50.0, 150.0),
            ],
            vec![
                quake("near LA", 35.0, -118.0, 5.0),
                quake("near Tokyo", 36.0, 140.5, 4.0),
                quake("south sea", -40.0, 60.0, 2.5),
            ],
        )
    }

    fn all_unhidden(m: &MarkerSet) -> bool {
        m.cities.iter().all(|c| !c.is_hidden()) && m.quakes.iter().all(|q| !q.is_hidden())
    }

    fn assert_invariants(state: &InteractionState, m: &MarkerSet) {
        let selected = m.cities.iter().filter(|c| c.base().selected).count()
            + m.quakes.iter().filter(|q| q.base().selected).count()
            + m.custom.iter().filter(|c| c.base().selected).count();
        let clicked = m.cities.iter().filter(|c| c.base().clicked).count()
            + m.quakes.iter().filter(|q| q.base().clicked).count()
            + m.custom.iter().filter(|c| c.base().clicked).count();
        assert!(selected <= 1);
        assert!(clicked <= 1);
        if state.last_clicked().is_none() {
            assert!(all_unhidden(m));
        }
        if state.mode() == Mode::Default {
            assert!(m.custom.as_ref().map_or(true, |c| c.is_hidden()));
        }
    }

    #[test]
    fn test_button_pixels_from_cells() {
        let area = PixelRect::from_cells(overlay::MENU_BUTTON);
        assert_eq!(area, PixelRect { left: 18, top: 76, right: 30, bottom: 84 });
        assert!(area.contains(BUTTON.0, BUTTON.1));
        assert!(!area.contains(30, 80));
        assert!(!area.contains(20, 84));
        assert_eq!(InteractionState::default().button(), Some(area));
    }

    #[test]
    fn test_cold_start() {
        let m = scenario_world();
        let state = InteractionState::default();
        assert_eq!(m.land_count(), 2);
        assert_eq!(m.ocean_count(), 1);
        assert!(all_unhidden(&m));
        assert_eq!(state.last_clicked(), None);
        assert_eq!(state.mode(), Mode::Default);
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_click_city_filters_quakes() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(34.05, -118.25));
        assert_eq!(outcome, ClickOutcome::Clicked(MarkerId::City(0)));
        assert!(!m.cities[0].is_hidden());
        assert!(m.cities[1].is_hidden() && m.cities[2].is_hidden());
        assert!(!m.quakes[0].is_hidden());
        assert!(m.quakes[1].is_hidden() && m.quakes[2].is_hidden());
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_click_same_marker_twice_restores_everything() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        let tokyo = at(35.68, 139.69);

        state.pointer_clicked(&mut m, &FlatProjection, tokyo);
        assert!(m.cities[1].base().clicked);
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, tokyo);
        assert_eq!(outcome, ClickOutcome::Deselected);

        assert!(all_unhidden(&m));
        assert_eq!(state.last_clicked(), None);
        assert!(!m.cities[1].base().clicked);
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_ocean_quake_threat_set_cleared_on_deselect() {
        let mut m = MarkerSet::build(
            vec![city("Coast", 2.0, 2.0), city("Far", 50.0, 50.0)],
            vec![],
            vec![quake("offshore", 0.0, 0.0, 6.0)],
        );
        let mut state = InteractionState::default();

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(0.0, 0.0));
        assert_eq!(outcome, ClickOutcome::Clicked(MarkerId::Quake(0)));
        assert_eq!(m.quakes[0].threatened_cities().collect::<Vec<_>>(), vec![0]);
        assert!(m.cities[1].is_hidden());

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, EMPTY_SEA);
        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(m.quakes[0].threatened_cities().count(), 0);
        assert!(all_unhidden(&m));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_click_prefers_city_over_quake() {
        let mut m = MarkerSet::build(
            vec![city("Epicenter", 10.0, 10.0)],
            vec![],
            vec![quake("q", 10.0, 10.0, 5.0)],
        );
        let mut state = InteractionState::default();
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(10.0, 10.0));
        assert_eq!(outcome, ClickOutcome::Clicked(MarkerId::City(0)));
    }

    #[test]
    fn test_click_empty_area_does_nothing() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, EMPTY_SEA);
        assert_eq!(outcome, ClickOutcome::Nothing);
        assert!(all_unhidden(&m));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_hover_moves_selection_between_quakes() {
        let mut m = MarkerSet::build(
            vec![],
            vec![],
            vec![quake("A", 0.0, 0.0, 3.0), quake("B", 0.0, 20.0, 3.0)],
        );
        let mut state = InteractionState::default();

        state.pointer_moved(&mut m, &FlatProjection, at(0.0, 0.0));
        assert_eq!(state.last_selected(), Some(MarkerId::Quake(0)));
        assert!(m.quakes[0].base().selected);

        state.pointer_moved(&mut m, &FlatProjection, at(0.0, 20.0));
        assert_eq!(state.last_selected(), Some(MarkerId::Quake(1)));
        assert!(!m.quakes[0].base().selected);
        assert!(m.quakes[1].base().selected);

        state.pointer_moved(&mut m, &FlatProjection, EMPTY_SEA);
        assert_eq!(state.last_selected(), None);
        assert!(!m.quakes[1].base().selected);
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_hover_prefers_quake_and_skips_hidden() {
        let mut m = MarkerSet::build(
            vec![city("C", 10.0, 10.0)],
            vec![],
            vec![quake("q", 10.0, 10.0, 5.0)],
        );
        let mut state = InteractionState::default();

        state.pointer_moved(&mut m, &FlatProjection, at(10.0, 10.0));
        assert_eq!(state.last_selected(), Some(MarkerId::Quake(0)));

        m.quakes[0].base_mut().hidden = true;
        state.pointer_moved(&mut m, &FlatProjection, at(10.0, 10.0));
        assert_eq!(state.last_selected(), Some(MarkerId::City(0)));
        assert_eq!(state.mode(), Mode::Default);
    }

    #[test]
    fn test_custom_location_cycle() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        assert_eq!(outcome, ClickOutcome::EnteredCustomMode);
        assert_eq!(state.mode(), Mode::CustomLocation);
        assert_eq!(state.last_clicked(), Some(MarkerId::Custom));
        assert!(m.custom.as_ref().is_some_and(|pin| pin.is_hidden()));
        assert_invariants(&state, &m);

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(40.0, -74.0));
        let ClickOutcome::PlacedCustom(report) = outcome else {
            panic!("expected placement, got {outcome:?}");
        };
        let pin = m.custom.as_ref().map(|p| (p.is_hidden(), p.location()));
        assert_eq!(pin, Some((false, Location::new(40.0, -74.0))));
        assert!(m.cities.iter().all(|c| c.is_hidden()));
        // Only the nearest quake is shown again
        assert_eq!(report.nearest().map(|n| n.title.as_str()), Some("near LA"));
        let shown: Vec<bool> = m.quakes.iter().map(|q| !q.is_hidden()).collect();
        assert_eq!(shown, vec![true, false, false]);
        assert_eq!(report.entries.len(), 3);
        assert_invariants(&state, &m);

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, EMPTY_SEA);
        assert_eq!(outcome, ClickOutcome::ExitedCustomMode);
        assert_eq!(state.mode(), Mode::Default);
        assert!(m.custom.is_none());
        assert_eq!(state.last_clicked(), None);
        assert!(all_unhidden(&m));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_button_again_before_placement_is_rejected() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        assert_eq!(outcome, ClickOutcome::Rejected);
        assert_eq!(state.mode(), Mode::CustomLocation);
        assert!(m.custom.as_ref().is_some_and(|pin| pin.is_hidden()));
    }

    #[test]
    fn test_button_while_marker_clicked_deselects_first() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        state.pointer_clicked(&mut m, &FlatProjection, at(34.05, -118.25));
        assert!(!all_unhidden(&m));

        state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        assert!(all_unhidden(&m));
        assert!(!m.cities[0].base().clicked);
        assert_eq!(state.last_clicked(), Some(MarkerId::Custom));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_placement_with_no_quakes() {
        let mut m = MarkerSet::build(vec![city("Lonely", 0.0, 0.0)], vec![], vec![]);
        let mut state = InteractionState::default();
        state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(10.0, 10.0));
        assert!(matches!(outcome, ClickOutcome::PlacedCustom(ref r) if r.is_empty()));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_legend_shadows_city_beneath_it() {
        let mut m = MarkerSet::build(vec![city("Alert", 85.0, -175.0)], vec![], vec![]);
        assert_eq!(at(85.0, -175.0), UNDER_LEGEND);
        let mut state = InteractionState::default();

        state.pointer_moved(&mut m, &FlatProjection, UNDER_LEGEND);
        assert_eq!(state.last_selected(), None);
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, UNDER_LEGEND);
        assert_eq!(outcome, ClickOutcome::Nothing);
        assert!(!m.cities[0].base().clicked);
        assert_eq!(state.last_clicked(), None);

        // With the legend hidden the city is reachable again
        state.set_overlays(&OverlayLayout::new(u16::MAX, u16::MAX, false, false));
        state.pointer_moved(&mut m, &FlatProjection, UNDER_LEGEND);
        assert_eq!(state.last_selected(), Some(MarkerId::City(0)));
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, UNDER_LEGEND);
        assert_eq!(outcome, ClickOutcome::Clicked(MarkerId::City(0)));
    }

    #[test]
    fn test_panel_click_undoes_filter() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        state.pointer_clicked(&mut m, &FlatProjection, at(34.05, -118.25));
        assert!(!all_unhidden(&m));

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, UNDER_LEGEND);
        assert_eq!(outcome, ClickOutcome::Deselected);
        assert!(all_unhidden(&m));
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_menu_click_does_not_place_pin() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        state.pointer_clicked(&mut m, &FlatProjection, BUTTON);

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, MENU_TEXT);
        assert_eq!(outcome, ClickOutcome::Nothing);
        assert_eq!(state.mode(), Mode::CustomLocation);
        assert!(m.custom.as_ref().is_some_and(|pin| pin.is_hidden()));
        assert_invariants(&state, &m);

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, at(40.0, -74.0));
        assert!(matches!(outcome, ClickOutcome::PlacedCustom(_)));
        // Once placed, a panel click exits like any other click
        let outcome = state.pointer_clicked(&mut m, &FlatProjection, MENU_TEXT);
        assert_eq!(outcome, ClickOutcome::ExitedCustomMode);
        assert_invariants(&state, &m);
    }

    #[test]
    fn test_button_inactive_when_menu_does_not_fit() {
        let mut m = scenario_world();
        let mut state = InteractionState::new(&OverlayLayout::new(40, 16, true, false));
        assert_eq!(state.button(), None);

        let outcome = state.pointer_clicked(&mut m, &FlatProjection, BUTTON);
        assert_eq!(outcome, ClickOutcome::Nothing);
        assert_eq!(state.mode(), Mode::Default);
        assert!(m.custom.is_none());
    }

    #[test]
    fn test_invariants_hold_over_event_sequence() {
        let mut m = scenario_world();
        let mut state = InteractionState::default();
        let clicks = [
            at(34.05, -118.25),
            at(36.0, 140.5),
            at(36.0, 140.5),
            BUTTON,
            at(-12.05, -77.04),
            at(35.0, -118.0),
            EMPTY_SEA,
            at(-40.0, 60.0),
            BUTTON,
            EMPTY_SEA,
        ];
        for click in clicks {
            state.pointer_moved(&mut m, &FlatProjection, click);
            state.pointer_clicked(&mut m, &FlatProjection, click);
            assert_invariants(&state, &m);
        }
    }
}
