mod geometry;
mod projection;
mod renderer;
pub mod spatial;

pub use projection::{ScreenProjection, Viewport};
pub use renderer::{draw_markers, Basemap, DisplaySettings, Label, MarkerLayers};
