//! Terminal world map of recent earthquakes and the cities inside their
//! threat circles, drawn with Braille characters.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod geodesy;
pub mod interaction;
pub mod logging;
pub mod map;
pub mod markers;
pub mod nearest;
pub mod overlay;
pub mod report;
pub mod ui;
pub mod visibility;
