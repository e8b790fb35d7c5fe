//! Application-Layer: Zeichenfläche, Gesten, Controller und Events.

pub mod canvas;
pub mod controller;
pub mod delegate;
pub mod events;
pub mod gestures;
pub mod highlight;
pub mod render_scene;

pub use canvas::Canvas;
pub use controller::CanvasController;
pub use delegate::{CanvasDelegate, CanvasHooks, NoHooks};
pub use events::{
    CanvasTask, InputEvent, Key, KeyEvent, Modifiers, MouseButtons, PointerEvent, TimerKind,
};
pub use gestures::{ExclusiveLock, ExclusiveLocks, Gesture, GestureContext, GestureManager};
pub use highlight::{AlphaVariator, HighlightTimer};
pub use render_scene::build as build_render_scene;
