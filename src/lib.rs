//! Diagram Canvas Library.
//! Interaktionskern eines 2D-Diagramm-Editors: Shape-Baum, Anker,
//! Bogen-Links und Gesten-Dispatch, als Library für Hosts und Tests.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    Canvas, CanvasController, CanvasDelegate, CanvasHooks, ExclusiveLock, GestureManager,
    InputEvent, KeyEvent, PointerEvent,
};
pub use core::{
    Anchor, AnchorKey, AnchorRegistry, ArcCurve, LinkKind, LinkShape, Rect, Shape, ShapeId,
    ShapeKind, ShapeTree,
};
pub use shared::{CanvasOptions, DrawCommand, RenderScene};
