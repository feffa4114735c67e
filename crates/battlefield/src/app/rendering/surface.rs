use thiserror::Error;

use crate::geometry::{Rect, ScreenPoint};

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("drawing surface was lost")]
    Lost,
    #[error("drawing backend failed: {0}")]
    Backend(String),
}

/// Off-screen drawing target for one battlefield frame.
///
/// Rectangles are in viewport space; `present` blits the finished frame onto the
/// window with its top-left at the given screen point. Pixels written here are
/// not interpreted further by the battlefield.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), SurfaceError>;
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: f32)
        -> Result<(), SurfaceError>;
    fn present(&mut self, top_left: ScreenPoint) -> Result<(), SurfaceError>;
}
