mod battlefield;
mod camera;
mod input;
pub mod mouse;
pub(crate) mod rendering;

pub use battlefield::{BattleField, GuiComposite};
pub use camera::{Axis, AxisMotion, Camera2D, Perimeter};
pub use input::{ActionStates, InputAction};
pub use mouse::{
    transition_allowed, BattlefieldEvent, DraggingSelectionBoxMouse, MouseBehavior,
    MouseBehaviorKind, MouseContext, MouseEvent, MouseMachine, NormalMouse, OrderTargetMouse,
};
pub use rendering::{
    CoordinateTranslator, DrawOrderKey, DrawSurface, RenderBatch, RenderEntry, Rgba,
    SurfaceError, Viewport, FOCUS_BORDER_COLOR, SELECTED_HIGHLIGHT_COLOR, SHROUD_COLOR,
};
