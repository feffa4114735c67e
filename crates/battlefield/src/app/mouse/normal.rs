use super::{BattlefieldEvent, MouseBehavior, MouseBehaviorKind, MouseContext};
use crate::app::rendering::{CoordinateTranslator, DrawSurface, Rgba, SurfaceError};
use crate::geometry::{CellCoord, Rect, CELL_SIZE_PX};

const HOVER_OUTLINE_COLOR: Rgba = [255, 255, 255, 255];

/// Idle mouse: tracks the hovered cell and turns clicks into selection changes.
#[derive(Debug, Clone, Default)]
pub struct NormalMouse {
    hover_cell: Option<CellCoord>,
}

impl NormalMouse {
    pub fn new(hover_cell: Option<CellCoord>) -> Self {
        Self { hover_cell }
    }
}

impl MouseBehavior for NormalMouse {
    fn kind(&self) -> MouseBehaviorKind {
        MouseBehaviorKind::Normal
    }

    fn hover_cell(&self) -> Option<CellCoord> {
        self.hover_cell
    }

    fn left_clicked(&mut self, ctx: &mut MouseContext<'_>) {
        let Some(cell) = self.hover_cell else {
            return;
        };
        ctx.emit(BattlefieldEvent::DeselectAll);
        ctx.emit(BattlefieldEvent::SelectAt(cell));
    }

    fn right_clicked(&mut self, ctx: &mut MouseContext<'_>) {
        ctx.emit(BattlefieldEvent::DeselectAll);
    }

    fn mouse_moved_to_cell(&mut self, cell: Option<CellCoord>, _ctx: &mut MouseContext<'_>) {
        self.hover_cell = cell;
    }

    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        translator: &CoordinateTranslator,
    ) -> Result<(), SurfaceError> {
        let Some(cell) = self.hover_cell else {
            return Ok(());
        };
        let origin = translator.cell_to_viewport(cell);
        surface.stroke_rect(
            Rect::new(origin.x, origin.y, CELL_SIZE_PX, CELL_SIZE_PX),
            HOVER_OUTLINE_COLOR,
            1.0,
        )
    }
}
