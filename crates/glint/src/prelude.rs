//! Commonly used types, for glob importing:
//!
//! ```ignore
//! use glint::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::Context;
pub use glint_core::{CancellationToken, ConnectionId, Object, Signal};

// ============================================================================
// Windows
// ============================================================================

pub use crate::window::{KeyEvent, MouseState, ResizeEvent, Window, WindowConfig};

// ============================================================================
// Scene Graph
// ============================================================================

pub use crate::widget::{
    Anchor, BoundingBox, BoundingObject, BoundingRadius, Margin, MouseEventArgs, PaintContext,
    WindowObject, WindowObjectBase,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{
    Button, CheckButton, Label, Shape, ShapeKind, SignalGroup, SignalLine, Slider, TabGroup, View,
};

// ============================================================================
// Assets and Services
// ============================================================================

pub use crate::asset::{Asset, AssetLibrary};
pub use crate::service::Service;

// ============================================================================
// Rendering
// ============================================================================

pub use glint_render::{Color, Renderer, Vec2, Vec3};
