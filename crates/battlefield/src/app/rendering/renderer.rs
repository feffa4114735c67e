use super::batch::RenderBatch;
use super::surface::{DrawSurface, Rgba, SurfaceError};
use super::transform::{CoordinateTranslator, Viewport};
use crate::geometry::{CellCoord, MapPoint, Rect, CELL_SIZE_PX};
use crate::world::Player;

pub const SHROUD_COLOR: Rgba = [0, 0, 0, 255];
pub const SELECTED_HIGHLIGHT_COLOR: Rgba = [255, 255, 255, 255];
pub const FOCUS_BORDER_COLOR: Rgba = [255, 0, 0, 255];
const FOCUS_BORDER_WIDTH_PX: f32 = 2.0;
const SELECTED_HIGHLIGHT_WIDTH_PX: f32 = 1.0;

pub(crate) fn draw_entities(
    surface: &mut dyn DrawSurface,
    batch: &RenderBatch,
    translator: &CoordinateTranslator,
) -> Result<(), SurfaceError> {
    for entry in batch.entries() {
        let top_left = translator.map_to_viewport(MapPoint::new(entry.bounds.x, entry.bounds.y));
        let rect = Rect::new(
            top_left.x,
            top_left.y,
            entry.bounds.width,
            entry.bounds.height,
        );
        surface.fill_rect(rect, entry.faction.rgba())?;
        if entry.selected {
            surface.stroke_rect(rect, SELECTED_HIGHLIGHT_COLOR, SELECTED_HIGHLIGHT_WIDTH_PX)?;
        }
    }
    Ok(())
}

/// Covers every cell in `cells` the viewer has not revealed.
pub(crate) fn draw_shroud(
    surface: &mut dyn DrawSurface,
    viewer: &Player,
    cells: Rect,
    translator: &CoordinateTranslator,
) -> Result<(), SurfaceError> {
    for y in cells.y..cells.bottom() {
        for x in cells.x..cells.right() {
            let cell = CellCoord::new(x, y);
            if viewer.is_visible(cell) {
                continue;
            }
            let origin = translator.cell_to_viewport(cell);
            surface.fill_rect(
                Rect::new(origin.x, origin.y, CELL_SIZE_PX, CELL_SIZE_PX),
                SHROUD_COLOR,
            )?;
        }
    }
    Ok(())
}

/// Drawn at 1,1 because the buffer itself is already placed at the widget's top-left.
pub(crate) fn draw_focus_border(
    surface: &mut dyn DrawSurface,
    viewport: Viewport,
) -> Result<(), SurfaceError> {
    let rect = Rect::new(1, 1, viewport.width_px() - 2, viewport.height_px() - 2);
    surface.stroke_rect(rect, FOCUS_BORDER_COLOR, FOCUS_BORDER_WIDTH_PX)
}
