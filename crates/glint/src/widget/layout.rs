//! Anchor and margin layout.
//!
//! A window object with an [`Anchor`] other than [`Anchor::NoAnchor`] has its
//! position recomputed by [`WindowObjectBase::refresh_layout`] whenever the
//! anchor or margin changes, the object is initialized, or the window is
//! resized.
//!
//! # Coordinates
//!
//! Layout works in normalized window space: `[-1, 1]` on both axes with +y
//! up. An object's extent is its world scale, so a scale of `0.25` covers a
//! quarter of the window's half-width on each side of its position.
//!
//! The box an object is anchored in is the whole window, unless its parent is
//! a [`LayoutContainer`]. Only [`View`](super::widgets::View),
//! [`Button`](super::widgets::Button), [`Label`](super::widgets::Label),
//! [`SignalLine`](super::widgets::SignalLine) and
//! [`SignalGroup`](super::widgets::SignalGroup) are containers; children of
//! any other parent still anchor against the full window.
//!
//! Margins are aspect-corrected against the window like widths are, so a
//! margin of `0.1` is the same number of pixels on every side.

use glint_core::logging::targets;
use glint_render::{Vec2, Vec3};

use super::object::WindowObjectBase;
use crate::window::Window;

/// Where an object sits in its layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Layout leaves the position alone.
    #[default]
    NoAnchor,
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Space between an object and the edges of its layout box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// A window object whose children are laid out inside its own box.
pub trait LayoutContainer {
    fn container_base(&self) -> &WindowObjectBase;

    /// Half extent of the box children are anchored in.
    fn container_half_size(&self, window: &Window) -> Vec2 {
        self.container_base().half_size_in(window)
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Bounds {
    const WINDOW: Self = Self {
        left: -1.0,
        right: 1.0,
        top: 1.0,
        bottom: -1.0,
    };

    fn centered(half: Vec2) -> Self {
        Self {
            left: -half.x,
            right: half.x,
            top: half.y,
            bottom: -half.y,
        }
    }
}

impl WindowObjectBase {
    /// Recompute the position from anchor, margin and the layout box.
    ///
    /// Does nothing without a window or with [`Anchor::NoAnchor`]. Only x
    /// and y are written; z is kept.
    pub fn refresh_layout(&self) {
        let anchor = self.anchor();
        if anchor == Anchor::NoAnchor {
            return;
        }
        let Some(window) = self.window() else {
            return;
        };

        let bounds = self
            .parent()
            .and_then(|parent| {
                parent
                    .as_layout_container()
                    .map(|container| Bounds::centered(container.container_half_size(&window)))
            })
            .unwrap_or(Bounds::WINDOW);

        let margin = self.margin();
        let (m_left, m_right) = (window.scale_x(margin.left), window.scale_x(margin.right));
        let (m_top, m_bottom) = (window.scale_y(margin.top), window.scale_y(margin.bottom));

        let half = self.half_size_in(&window);
        let (hw, hh) = (half.x, half.y);

        let left = bounds.left + hw + m_left;
        let right = bounds.right - hw - m_right;
        let top = bounds.top - hh - m_top;
        let bottom = bounds.bottom + hh + m_bottom;
        let center_x = m_left - m_right;
        let center_y = m_bottom - m_top;

        let (x, y) = match anchor {
            Anchor::TopLeft => (left, top),
            Anchor::Top => (center_x, top),
            Anchor::TopRight => (right, top),
            Anchor::Left => (left, center_y),
            Anchor::Center => (center_x, center_y),
            Anchor::Right => (right, center_y),
            Anchor::BottomLeft => (left, bottom),
            Anchor::Bottom => (center_x, bottom),
            Anchor::BottomRight => (right, bottom),
            Anchor::NoAnchor => return,
        };

        let z = self.position().z;
        self.set_position(Vec3::new(x, y, z));
        tracing::trace!(target: targets::LAYOUT, object = %self.name(), ?anchor, x, y, "layout refreshed");
    }
}
