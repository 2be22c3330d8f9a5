//! Hidden-flag computation for the clicked marker's neighborhood.

use crate::markers::{Marker, MarkerId, MarkerSet};

/// Show every city and quake; the custom pin, if any, goes hidden
pub fn unhide_all(markers: &mut MarkerSet) {
    for city in &mut markers.cities {
        city.base_mut().hidden = false;
    }
    for quake in &mut markers.quakes {
        quake.base_mut().hidden = false;
    }
    if let Some(custom) = &mut markers.custom {
        custom.base_mut().hidden = true;
    }
}

/// Hide every city and quake, leaving the custom pin alone
pub fn hide_all_but_custom(markers: &mut MarkerSet) {
    for city in &mut markers.cities {
        city.base_mut().hidden = true;
    }
    for quake in &mut markers.quakes {
        quake.base_mut().hidden = true;
    }
}

/// Filter the display down to the clicked marker's neighborhood.
///
/// A clicked city keeps every quake whose own threat circle reaches it.
/// A clicked quake keeps every city inside its threat circle; an ocean quake
/// also records those cities as threatened. Distances equal to the radius count
/// as inside. The custom pin is placed elsewhere and is ignored here.
pub fn resolve(markers: &mut MarkerSet, clicked: MarkerId) {
    match clicked {
        MarkerId::City(idx) => {
            let Some(anchor) = markers.cities.get(idx).map(|c| c.location()) else {
                return;
            };
            for (i, city) in markers.cities.iter_mut().enumerate() {
                city.base_mut().hidden = i != idx;
            }
            for quake in &mut markers.quakes {
                let threatening = quake.threatens(anchor);
                quake.base_mut().hidden = !threatening;
            }
        }
        MarkerId::Quake(idx) => {
            if idx >= markers.quakes.len() {
                return;
            }
            for (i, quake) in markers.quakes.iter_mut().enumerate() {
                quake.base_mut().hidden = i != idx;
            }

            let quake = &mut markers.quakes[idx];
            quake.clear_threatened_cities();
            for (i, city) in markers.cities.iter_mut().enumerate() {
                let threatened = quake.threatens(city.location());
                city.base_mut().hidden = !threatened;
                if threatened {
                    quake.add_threatened_city(i);
                }
            }
        }
        MarkerId::Custom => {}
    }
}
