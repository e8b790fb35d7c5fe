//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und dem Host geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;

pub use options::CanvasOptions;
pub use options::DEFAULT_LINK_FLATNESS;
pub use render_scene::{DrawCommand, RenderScene, Stroke};
