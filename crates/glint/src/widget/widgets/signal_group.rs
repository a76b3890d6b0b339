//! Overlaid signal lines.

use std::sync::{Arc, Weak};

use glint_render::Color;
use parking_lot::RwLock;

use super::SignalLine;
use crate::widget::{LayoutContainer, PaintContext, WindowObject, WindowObjectBase};

/// A panel of [`SignalLine`]s drawn over each other with a shared range.
#[derive(Debug)]
pub struct SignalGroup {
    base: WindowObjectBase,
    lines: RwLock<Vec<Arc<SignalLine>>>,
    capacity: usize,
    range: RwLock<(f32, f32)>,
}

impl SignalGroup {
    /// Create a group whose lines each hold up to `capacity` samples.
    pub fn new(name: impl Into<Arc<str>>, capacity: usize) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            base.set_color(Color::TRANSPARENT);
            Self {
                base,
                lines: RwLock::new(Vec::new()),
                capacity,
                range: RwLock::new((-1.0, 1.0)),
            }
        })
    }

    /// Add a line in `color` covering the whole group.
    pub fn add_line(&self, name: impl Into<Arc<str>>, color: Color) -> Arc<SignalLine> {
        let line = SignalLine::new(name, self.capacity);
        line.window_base().set_color(color);
        let (min, max) = self.range();
        line.set_range(min, max);

        self.base.add_child(line.clone());
        self.lines.write().push(Arc::clone(&line));
        line
    }

    pub fn lines(&self) -> Vec<Arc<SignalLine>> {
        self.lines.read().clone()
    }

    pub fn line(&self, name: &str) -> Option<Arc<SignalLine>> {
        self.lines
            .read()
            .iter()
            .find(|line| &*line.window_base().name() == name)
            .cloned()
    }

    pub fn range(&self) -> (f32, f32) {
        *self.range.read()
    }

    /// Change the range of the group and every line in it.
    pub fn set_range(&self, min: f32, max: f32) {
        *self.range.write() = (min, max);
        for line in self.lines() {
            line.set_range(min, max);
        }
    }
}

crate::impl_window_object_lifecycle!(SignalGroup, base);

impl WindowObject for SignalGroup {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        if self.base.opacity() > 0.0 {
            ctx.renderer().draw_quad(&self.base.quad());
        }
        self.base.draw_children(ctx);
    }

    fn as_layout_container(&self) -> Option<&dyn LayoutContainer> {
        Some(self)
    }
}

impl LayoutContainer for SignalGroup {
    fn container_base(&self) -> &WindowObjectBase {
        &self.base
    }
}
