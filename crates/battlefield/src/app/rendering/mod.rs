mod batch;
pub(crate) mod renderer;
mod surface;
mod transform;

pub use batch::{DrawOrderKey, RenderBatch, RenderEntry};
pub use renderer::{FOCUS_BORDER_COLOR, SELECTED_HIGHLIGHT_COLOR, SHROUD_COLOR};
pub use surface::{DrawSurface, Rgba, SurfaceError};
pub use transform::{CoordinateTranslator, Viewport};

#[cfg(test)]
pub(crate) use surface::testing;
