use crate::geometry::{CellCoord, MapPoint, Rect, ScreenPoint, ViewportPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn width_px(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    pub fn height_px(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

/// Screen, viewport, map and cell conversions for one camera offset and widget placement.
///
/// Built fresh from battlefield state whenever coordinates need translating, so it
/// never lags behind camera motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateTranslator {
    widget: Rect,
    camera: MapPoint,
}

impl CoordinateTranslator {
    pub fn new(widget: Rect, camera: MapPoint) -> Self {
        Self { widget, camera }
    }

    pub fn widget(&self) -> Rect {
        self.widget
    }

    pub fn camera(&self) -> MapPoint {
        self.camera
    }

    /// `None` when the point lies outside the widget.
    pub fn screen_to_viewport(&self, screen: ScreenPoint) -> Option<ViewportPoint> {
        if !self.widget.contains(screen.x, screen.y) {
            return None;
        }
        Some(ViewportPoint {
            x: screen.x - self.widget.x,
            y: screen.y - self.widget.y,
        })
    }

    pub fn viewport_to_map(&self, viewport: ViewportPoint) -> MapPoint {
        MapPoint {
            x: viewport.x + self.camera.x,
            y: viewport.y + self.camera.y,
        }
    }

    /// No bounds check: the result may fall outside the widget and callers cull.
    pub fn map_to_viewport(&self, map: MapPoint) -> ViewportPoint {
        ViewportPoint {
            x: map.x - self.camera.x,
            y: map.y - self.camera.y,
        }
    }

    pub fn map_to_cell(&self, map: MapPoint) -> CellCoord {
        map.to_cell()
    }

    pub fn cell_to_viewport(&self, cell: CellCoord) -> ViewportPoint {
        self.map_to_viewport(cell.top_left())
    }

    pub fn viewport_to_cell(&self, viewport: ViewportPoint) -> CellCoord {
        self.map_to_cell(self.viewport_to_map(viewport))
    }

    pub fn screen_to_cell(&self, screen: ScreenPoint) -> Option<CellCoord> {
        self.screen_to_viewport(screen)
            .map(|viewport| self.viewport_to_cell(viewport))
    }

    /// Snaps a screen point onto the widget rectangle. The far edges clamp to the
    /// last pixel inside the widget so the result always translates.
    pub fn clamp_screen_to_widget(&self, screen: ScreenPoint) -> ScreenPoint {
        let max_x = self.widget.right() - 1;
        let max_y = self.widget.bottom() - 1;
        ScreenPoint {
            x: screen.x.max(self.widget.x).min(max_x.max(self.widget.x)),
            y: screen.y.max(self.widget.y).min(max_y.max(self.widget.y)),
        }
    }

    /// Viewport point for any screen point, snapping outside points onto the widget first.
    pub fn screen_to_viewport_clamped(&self, screen: ScreenPoint) -> ViewportPoint {
        let snapped = self.clamp_screen_to_widget(screen);
        ViewportPoint {
            x: snapped.x - self.widget.x,
            y: snapped.y - self.widget.y,
        }
    }

    /// Map-space rectangle covered by the widget at the current camera offset.
    pub fn visible_map_rect(&self) -> Rect {
        Rect::new(
            self.camera.x,
            self.camera.y,
            self.widget.width,
            self.widget.height,
        )
    }
}
