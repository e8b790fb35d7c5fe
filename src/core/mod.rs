//! Core-Domänentypen: Geometrie, Anker, Shapes, Shape-Baum und Links.

pub mod anchor;
pub mod geometry;
pub mod link;
pub mod shape;
pub mod shape_tree;

pub use anchor::{Anchor, AnchorKey, AnchorRegistry};
pub use geometry::Rect;
pub use link::{ArcCurve, Arrow, CurveGeometry, LinkKind, LinkLabel, LinkShape};
pub use shape::{Color, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use shape_tree::ShapeTree;
