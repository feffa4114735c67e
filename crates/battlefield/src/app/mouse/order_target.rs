use super::{BattlefieldEvent, MouseBehavior, MouseBehaviorKind, MouseContext, NormalMouse};
use crate::app::rendering::{CoordinateTranslator, DrawSurface, Rgba, SurfaceError};
use crate::geometry::{CellCoord, Rect, CELL_SIZE_PX};

const TARGET_MARKER_COLOR: Rgba = [255, 120, 120, 255];
const TARGET_MARKER_HALF_SIZE_PX: i32 = 4;

/// Command targeting: left clicks order the current selection to the hovered cell.
#[derive(Debug, Clone, Default)]
pub struct OrderTargetMouse {
    hover_cell: Option<CellCoord>,
}

impl OrderTargetMouse {
    pub fn new(hover_cell: Option<CellCoord>) -> Self {
        Self { hover_cell }
    }
}

impl MouseBehavior for OrderTargetMouse {
    fn kind(&self) -> MouseBehaviorKind {
        MouseBehaviorKind::OrderTarget
    }

    fn hover_cell(&self) -> Option<CellCoord> {
        self.hover_cell
    }

    fn left_clicked(&mut self, ctx: &mut MouseContext<'_>) {
        if let Some(cell) = self.hover_cell {
            ctx.emit(BattlefieldEvent::OrderIssued(cell));
        }
    }

    fn right_clicked(&mut self, ctx: &mut MouseContext<'_>) {
        ctx.emit(BattlefieldEvent::DeselectAll);
        ctx.request_transition(NormalMouse::new(self.hover_cell));
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
        let cell_rect = Rect::new(origin.x, origin.y, CELL_SIZE_PX, CELL_SIZE_PX);
        surface.stroke_rect(cell_rect, TARGET_MARKER_COLOR, 1.0)?;
        let center_x = origin.x + CELL_SIZE_PX / 2;
        let center_y = origin.y + CELL_SIZE_PX / 2;
        surface.fill_rect(
            Rect::new(
                center_x - TARGET_MARKER_HALF_SIZE_PX,
                center_y - TARGET_MARKER_HALF_SIZE_PX,
                TARGET_MARKER_HALF_SIZE_PX * 2,
                TARGET_MARKER_HALF_SIZE_PX * 2,
            ),
            TARGET_MARKER_COLOR,
        )
    }
}
