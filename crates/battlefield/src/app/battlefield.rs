use tracing::{debug, warn};

use super::camera::{Axis, AxisMotion, Camera2D};
use super::input::ActionStates;
use super::mouse::{BattlefieldEvent, MouseBehavior, MouseBehaviorKind, MouseEvent, MouseMachine};
use super::rendering::{renderer, CoordinateTranslator, DrawSurface, RenderBatch, SurfaceError, Viewport};
use crate::config::{BattlefieldConfig, ConfigError};
use crate::geometry::{CellCoord, MapPoint, Rect, ScreenPoint, Vec2, ViewportPoint, CELL_SIZE_PX};
use crate::world::{Entity, EntityId, EntityProvider, Footprint, MapDimensions, Player, PlayerId};

/// Sidebar-side collaborator told about selection and placement changes.
pub trait GuiComposite {
    fn entity_selected(&mut self, entity: &Entity);
    fn all_entity_builders_deselected(&mut self);
    fn entity_placed_on_map(&mut self, entity: &Entity);
}

/// The scrolling battlefield widget: camera, mouse modes and the per-frame
/// render batch for one controlling player.
#[derive(Debug)]
pub struct BattleField {
    widget: Rect,
    viewport: Viewport,
    map: MapDimensions,
    camera: Camera2D,
    mouse: MouseMachine,
    batch: RenderBatch,
    has_focus: bool,
    controlling_player: PlayerId,
    pending_events: Vec<BattlefieldEvent>,
}

impl BattleField {
    pub fn new(
        config: &BattlefieldConfig,
        map: MapDimensions,
        controlling_player: PlayerId,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = config.viewport();
        let mut camera = Camera2D::new(config.move_speed_px_per_second, map.size_px(), viewport);
        camera.set_position(config.initial_camera);
        Ok(Self {
            widget: config.widget_rect(),
            viewport,
            map,
            camera,
            mouse: MouseMachine::default(),
            batch: RenderBatch::default(),
            has_focus: false,
            controlling_player,
            pending_events: Vec::new(),
        })
    }

    pub fn widget(&self) -> Rect {
        self.widget
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn map(&self) -> MapDimensions {
        self.map
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn batch(&self) -> &RenderBatch {
        &self.batch
    }

    pub fn controlling_player(&self) -> PlayerId {
        self.controlling_player
    }

    pub fn mouse_behavior_kind(&self) -> MouseBehaviorKind {
        self.mouse.active_kind()
    }

    pub fn hover_cell(&self) -> Option<CellCoord> {
        self.mouse.hover_cell()
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// Translator for the current camera offset.
    pub fn translator(&self) -> CoordinateTranslator {
        CoordinateTranslator::new(self.widget, self.camera.position_px())
    }

    pub fn update<P: EntityProvider + ?Sized>(&mut self, delta_seconds: f32, provider: &P) {
        self.camera.tick(delta_seconds);
        let view = self.translator().visible_map_rect();
        self.batch = RenderBatch::rebuild(view, provider);
    }

    /// Draws one frame. Surface faults are logged and the frame is dropped.
    pub fn render(&self, surface: &mut dyn DrawSurface, viewer: &Player) {
        if let Err(error) = self.try_render(surface, viewer) {
            warn!(error = %error, player = viewer.name(), "battlefield_render_failed");
        }
    }

    fn try_render(&self, surface: &mut dyn DrawSurface, viewer: &Player) -> Result<(), SurfaceError> {
        let translator = self.translator();
        renderer::draw_entities(surface, &self.batch, &translator)?;
        let cells = self.map.clip(self.viewport_cell_boundaries());
        renderer::draw_shroud(surface, viewer, cells, &translator)?;
        self.mouse.render(surface, &translator)?;
        if self.has_focus {
            renderer::draw_focus_border(surface, self.viewport)?;
        }
        surface.present(ScreenPoint::new(self.widget.x, self.widget.y))
    }

    /// Cells touched by the viewport, including partially visible ones, as a
    /// rectangle in cell units.
    pub fn viewport_cell_boundaries(&self) -> Rect {
        let camera = self.camera.position_px();
        let start_x = camera.x.div_euclid(CELL_SIZE_PX);
        let start_y = camera.y.div_euclid(CELL_SIZE_PX);
        let end_x = (camera.x + self.viewport.width_px() + CELL_SIZE_PX - 1).div_euclid(CELL_SIZE_PX);
        let end_y = (camera.y + self.viewport.height_px() + CELL_SIZE_PX - 1).div_euclid(CELL_SIZE_PX);
        Rect::new(start_x, start_y, end_x - start_x, end_y - start_y)
    }

    pub fn move_left(&mut self) {
        self.camera.set_directional(Axis::Horizontal, AxisMotion::Negative);
    }

    pub fn move_right(&mut self) {
        self.camera.set_directional(Axis::Horizontal, AxisMotion::Positive);
    }

    pub fn move_up(&mut self) {
        self.camera.set_directional(Axis::Vertical, AxisMotion::Negative);
    }

    pub fn move_down(&mut self) {
        self.camera.set_directional(Axis::Vertical, AxisMotion::Positive);
    }

    pub fn stop_moving_horizontally(&mut self) {
        self.camera.set_directional(Axis::Horizontal, AxisMotion::Stopped);
    }

    pub fn stop_moving_vertically(&mut self) {
        self.camera.set_directional(Axis::Vertical, AxisMotion::Stopped);
    }

    pub fn apply_actions(&mut self, actions: &ActionStates) {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            self.camera.set_directional(axis, actions.motion(axis));
        }
    }

    pub fn left_clicked(&mut self, screen: ScreenPoint) {
        if self.translator().screen_to_viewport(screen).is_some() {
            self.dispatch(MouseEvent::LeftClicked);
        }
    }

    pub fn right_clicked(&mut self, screen: ScreenPoint) {
        if self.translator().screen_to_viewport(screen).is_some() {
            self.dispatch(MouseEvent::RightClicked);
        }
    }

    /// Delivered even outside the widget so a drag released off-screen still completes.
    pub fn left_button_released(&mut self, _screen: ScreenPoint) {
        self.dispatch(MouseEvent::LeftButtonReleased);
    }

    /// Drag points outside the widget are snapped onto its edge.
    pub fn dragged_to_coordinates(&mut self, screen: ScreenPoint) {
        let point = self.translator().screen_to_viewport_clamped(screen);
        self.dispatch(MouseEvent::DraggedTo(point));
    }

    pub fn moved_to(&mut self, screen: ScreenPoint) {
        let translator = self.translator();
        if let Some(point) = translator.screen_to_viewport(screen) {
            self.dispatch(MouseEvent::MovedTo(point));
        }
        let cell = translator
            .screen_to_cell(screen)
            .filter(|cell| self.map.contains(*cell));
        self.mouse_moved_to_cell(cell);
    }

    pub fn mouse_moved_to_cell(&mut self, cell: Option<CellCoord>) {
        self.dispatch(MouseEvent::MovedToCell(cell));
    }

    fn dispatch(&mut self, event: MouseEvent) {
        let translator = self.translator();
        let emitted = self.mouse.dispatch(event, &translator);
        self.pending_events.extend(emitted);
    }

    /// Events emitted by mouse behaviors since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<BattlefieldEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn request_mouse_behavior(&mut self, behavior: Box<dyn MouseBehavior>) -> bool {
        self.mouse.request_transition(behavior)
    }

    /// Cell under the top-left corner of a `footprint` centred on the cursor.
    pub fn top_left_cell_for_placement(
        &self,
        footprint: Footprint,
        screen: ScreenPoint,
    ) -> Option<CellCoord> {
        let translator = self.translator();
        let point = translator.screen_to_viewport(screen)?;
        let half = footprint.half_dimensions_px();
        let top_left = ViewportPoint::new(point.x - half.x as i32, point.y - half.y as i32);
        Some(translator.viewport_to_cell(top_left))
    }

    pub fn center_viewport_on(&mut self, map_point: MapPoint) {
        self.camera.center_on(map_point, self.viewport);
    }

    pub fn center_viewport_on_cell(&mut self, cell: CellCoord) {
        self.center_viewport_on(cell.center());
    }

    pub fn set_viewing_vector(&mut self, position: Vec2) {
        self.camera.set_position(position);
    }

    pub fn viewing_vector(&self) -> Vec2 {
        self.camera.position()
    }

    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.widget.width = viewport.width_px();
        self.widget.height = viewport.height_px();
        self.camera.recompute_perimeter(self.map.size_px(), viewport);
    }

    pub fn set_map_dimensions(&mut self, map: MapDimensions) {
        self.map = map;
        self.camera.recompute_perimeter(map.size_px(), self.viewport);
    }

    /// Forwards a fresh selection to the GUI. Only the controlling player's
    /// entities count; a single one opens its builder, anything else closes them all.
    pub fn entities_selected(&self, entities: &[&Entity], gui: &mut dyn GuiComposite) {
        let mut owned = entities
            .iter()
            .copied()
            .filter(|entity| entity.belongs_to(self.controlling_player));
        let first = owned.next();
        let more = owned.next().is_some();
        debug!(
            offered = entities.len(),
            single = first.is_some() && !more,
            "battlefield_entities_selected"
        );
        match (first, more) {
            (Some(entity), false) => gui.entity_selected(entity),
            _ => gui.all_entity_builders_deselected(),
        }
    }

    pub fn entities_deselected(&self, entities: &[EntityId]) {
        debug!(count = entities.len(), "battlefield_entities_deselected");
    }

    pub fn entity_placed_on_map(&self, entity: &Entity, gui: &mut dyn GuiComposite) {
        debug!(entity = entity.id.0, name = %entity.data.name, "battlefield_entity_placed");
        gui.entity_placed_on_map(entity);
    }
}
