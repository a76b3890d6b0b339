//! Plain container with a background.

use std::sync::{Arc, Weak};

use glint_render::Color;

use crate::widget::{LayoutContainer, PaintContext, WindowObject, WindowObjectBase};

/// A rectangle that lays its children out inside itself.
///
/// The background is skipped when its color is fully transparent.
#[derive(Debug)]
pub struct View {
    base: WindowObjectBase,
}

impl View {
    pub fn new(name: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            Self { base }
        })
    }

    pub fn with_color(name: impl Into<Arc<str>>, color: Color) -> Arc<Self> {
        let view = Self::new(name);
        view.base.set_color(color);
        view
    }

    pub fn add_child(&self, child: Arc<dyn WindowObject>) {
        self.base.add_child(child);
    }

    pub fn remove_child(&self, child: &Arc<dyn WindowObject>) -> bool {
        self.base.remove_child(child)
    }
}

crate::impl_window_object_lifecycle!(View, base);

impl WindowObject for View {
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

impl LayoutContainer for View {
    fn container_base(&self) -> &WindowObjectBase {
        &self.base
    }
}
