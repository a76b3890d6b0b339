//! Window objects: the scene graph, layout, hit-testing and widgets.
//!
//! # Key Types
//!
//! - [`WindowObject`] / [`WindowObjectBase`] - Scene graph nodes
//! - [`Anchor`] / [`Margin`] - Anchor layout
//! - [`BoundingBox`] / [`BoundingRadius`] - Pointer hit areas raising [`MouseEvents`]
//! - [`PaintContext`] - Renderer access during drawing
//! - [`SceneTreeDebug`] - Indented tree listing for logs

mod bounds;
mod debug;
mod layout;
mod object;
mod paint;
mod widgets;

pub use bounds::{
    BoundingBox, BoundingObject, BoundingObjectBase, BoundingRadius, MouseEventArgs,
    MouseEventKind, MouseEvents, PointerSample,
};
pub use debug::SceneTreeDebug;
pub use layout::{Anchor, LayoutContainer, Margin};
pub use object::{WindowObject, WindowObjectBase};
pub use paint::PaintContext;
pub use widgets::{
    Button, ButtonColors, CheckButton, Label, Shape, ShapeKind, SignalGroup, SignalLine, Slider,
    TabGroup, View,
};
