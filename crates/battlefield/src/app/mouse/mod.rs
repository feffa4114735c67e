//! Pluggable mouse interaction modes for the battlefield.
//!
//! Exactly one [`MouseBehavior`] is active at a time. The [`MouseMachine`] routes
//! every event to it untouched and applies the transitions behaviors ask for,
//! subject to [`transition_allowed`].

mod drag_select;
mod normal;
mod order_target;

use std::fmt;

use tracing::debug;

use super::rendering::{CoordinateTranslator, DrawSurface, SurfaceError};
use crate::geometry::{CellCoord, Rect, ViewportPoint};

pub use drag_select::DraggingSelectionBoxMouse;
pub use normal::NormalMouse;
pub use order_target::OrderTargetMouse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBehaviorKind {
    Normal,
    DraggingSelectionBox,
    OrderTarget,
}

/// Drag-select may only start from the normal mouse; everything else is allowed.
pub fn transition_allowed(current: MouseBehaviorKind, requested: MouseBehaviorKind) -> bool {
    requested != MouseBehaviorKind::DraggingSelectionBox || current == MouseBehaviorKind::Normal
}

/// Outcomes of mouse interaction that the owner of the entity collection acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlefieldEvent {
    SelectAt(CellCoord),
    /// Map-space rectangle.
    SelectWithin(Rect),
    DeselectAll,
    OrderIssued(CellCoord),
}

#[derive(Debug)]
pub enum MouseIntent {
    Transition(Box<dyn MouseBehavior>),
    Emit(BattlefieldEvent),
}

pub struct MouseContext<'a> {
    translator: &'a CoordinateTranslator,
    intents: Vec<MouseIntent>,
}

impl<'a> MouseContext<'a> {
    pub fn new(translator: &'a CoordinateTranslator) -> Self {
        Self {
            translator,
            intents: Vec::new(),
        }
    }

    pub fn translator(&self) -> &CoordinateTranslator {
        self.translator
    }

    pub fn request_transition(&mut self, behavior: impl MouseBehavior + 'static) {
        self.intents.push(MouseIntent::Transition(Box::new(behavior)));
    }

    pub fn emit(&mut self, event: BattlefieldEvent) {
        self.intents.push(MouseIntent::Emit(event));
    }

    pub fn into_intents(self) -> Vec<MouseIntent> {
        self.intents
    }
}

pub trait MouseBehavior: fmt::Debug {
    fn kind(&self) -> MouseBehaviorKind;

    fn hover_cell(&self) -> Option<CellCoord>;

    fn left_clicked(&mut self, _ctx: &mut MouseContext<'_>) {}

    fn right_clicked(&mut self, _ctx: &mut MouseContext<'_>) {}

    fn left_button_released(&mut self, _ctx: &mut MouseContext<'_>) {}

    /// Dragging starts a selection box anchored at the map pixel under `point`;
    /// the transition guard decides whether the current mode may be interrupted.
    fn dragged_to(&mut self, point: ViewportPoint, ctx: &mut MouseContext<'_>) {
        let anchor = ctx.translator().viewport_to_map(point);
        ctx.request_transition(DraggingSelectionBoxMouse::new(anchor, self.hover_cell()));
    }

    fn moved_to(&mut self, _point: ViewportPoint, _ctx: &mut MouseContext<'_>) {}

    fn mouse_moved_to_cell(&mut self, cell: Option<CellCoord>, ctx: &mut MouseContext<'_>);

    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        translator: &CoordinateTranslator,
    ) -> Result<(), SurfaceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    LeftClicked,
    RightClicked,
    LeftButtonReleased,
    DraggedTo(ViewportPoint),
    MovedTo(ViewportPoint),
    MovedToCell(Option<CellCoord>),
}

#[derive(Debug)]
pub struct MouseMachine {
    active: Box<dyn MouseBehavior>,
}

impl Default for MouseMachine {
    fn default() -> Self {
        Self {
            active: Box::new(NormalMouse::new(None)),
        }
    }
}

impl MouseMachine {
    pub fn active(&self) -> &dyn MouseBehavior {
        self.active.as_ref()
    }

    pub fn active_kind(&self) -> MouseBehaviorKind {
        self.active.kind()
    }

    pub fn hover_cell(&self) -> Option<CellCoord> {
        self.active.hover_cell()
    }

    /// Installs `next` unless the guard rejects it; a rejection leaves the active
    /// behavior untouched.
    pub fn request_transition(&mut self, next: Box<dyn MouseBehavior>) -> bool {
        let current = self.active.kind();
        let requested = next.kind();
        if !transition_allowed(current, requested) {
            debug!(?current, ?requested, "mouse_transition_rejected");
            return false;
        }
        debug!(?current, ?requested, "mouse_transition");
        self.active = next;
        true
    }

    pub fn dispatch(
        &mut self,
        event: MouseEvent,
        translator: &CoordinateTranslator,
    ) -> Vec<BattlefieldEvent> {
        let mut ctx = MouseContext::new(translator);
        match event {
            MouseEvent::LeftClicked => self.active.left_clicked(&mut ctx),
            MouseEvent::RightClicked => self.active.right_clicked(&mut ctx),
            MouseEvent::LeftButtonReleased => self.active.left_button_released(&mut ctx),
            MouseEvent::DraggedTo(point) => self.active.dragged_to(point, &mut ctx),
            MouseEvent::MovedTo(point) => self.active.moved_to(point, &mut ctx),
            MouseEvent::MovedToCell(cell) => self.active.mouse_moved_to_cell(cell, &mut ctx),
        }

        let mut events = Vec::new();
        for intent in ctx.into_intents() {
            match intent {
                MouseIntent::Transition(next) => {
                    self.request_transition(next);
                }
                MouseIntent::Emit(event) => events.push(event),
            }
        }
        events
    }

    pub fn render(
        &self,
        surface: &mut dyn DrawSurface,
        translator: &CoordinateTranslator,
    ) -> Result<(), SurfaceError> {
        self.active.render(surface, translator)
    }
}
