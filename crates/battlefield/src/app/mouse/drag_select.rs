use super::{BattlefieldEvent, MouseBehavior, MouseBehaviorKind, MouseContext, NormalMouse};
use crate::app::rendering::{CoordinateTranslator, DrawSurface, Rgba, SurfaceError};
use crate::geometry::{CellCoord, MapPoint, Rect, ViewportPoint};

const SELECTION_BOX_COLOR: Rgba = [255, 255, 255, 255];

/// Rubber-band selection between the drag start and the latest drag point.
///
/// Both corners are anchored in map space, so scrolling mid-drag keeps the
/// start on the map pixel where the gesture began.
#[derive(Debug, Clone)]
pub struct DraggingSelectionBoxMouse {
    start: MapPoint,
    end: MapPoint,
    hover_cell: Option<CellCoord>,
}

impl DraggingSelectionBoxMouse {
    pub fn new(start: MapPoint, hover_cell: Option<CellCoord>) -> Self {
        Self {
            start,
            end: start,
            hover_cell,
        }
    }

    pub fn start(&self) -> MapPoint {
        self.start
    }

    pub fn end(&self) -> MapPoint {
        self.end
    }
}

impl MouseBehavior for DraggingSelectionBoxMouse {
    fn kind(&self) -> MouseBehaviorKind {
        MouseBehaviorKind::DraggingSelectionBox
    }

    fn hover_cell(&self) -> Option<CellCoord> {
        self.hover_cell
    }

    fn left_button_released(&mut self, ctx: &mut MouseContext<'_>) {
        // inclusive of the release pixel, so a zero-length drag still hits something
        let mut selection =
            Rect::from_corners((self.start.x, self.start.y), (self.end.x, self.end.y));
        selection.width += 1;
        selection.height += 1;

        ctx.emit(BattlefieldEvent::DeselectAll);
        ctx.emit(BattlefieldEvent::SelectWithin(selection));
        ctx.request_transition(NormalMouse::new(self.hover_cell));
    }

    fn right_clicked(&mut self, ctx: &mut MouseContext<'_>) {
        ctx.request_transition(NormalMouse::new(self.hover_cell));
    }

    fn dragged_to(&mut self, point: ViewportPoint, ctx: &mut MouseContext<'_>) {
        self.end = ctx.translator().viewport_to_map(point);
    }

    fn mouse_moved_to_cell(&mut self, cell: Option<CellCoord>, _ctx: &mut MouseContext<'_>) {
        self.hover_cell = cell;
    }

    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        translator: &CoordinateTranslator,
    ) -> Result<(), SurfaceError> {
        let start = translator.map_to_viewport(self.start);
        let end = translator.map_to_viewport(self.end);
        let viewport_box = Rect::from_corners((start.x, start.y), (end.x, end.y));
        surface.stroke_rect(viewport_box, SELECTION_BOX_COLOR, 1.0)
    }
}
