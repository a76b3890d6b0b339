//! Built-in widgets.
//!
//! Composite widgets are ordinary window objects that own child objects: a
//! [`Button`] is a background quad with a [`Label`] and a
//! [`BoundingBox`](super::BoundingBox) as children.

mod button;
mod check_button;
mod label;
mod shape;
mod signal_group;
mod signal_line;
mod slider;
mod tab_group;
mod view;

pub use button::{Button, ButtonColors};
pub use check_button::CheckButton;
pub use label::Label;
pub use shape::{Shape, ShapeKind};
pub use signal_group::SignalGroup;
pub use signal_line::SignalLine;
pub use slider::Slider;
pub use tab_group::TabGroup;
pub use view::View;
