//! Push buttons.

use std::sync::{Arc, Weak};

use glint_core::ConnectionId;
use glint_render::Color;
use parking_lot::RwLock;

use super::Label;
use crate::widget::{
    BoundingBox, BoundingObject, LayoutContainer, MouseEventArgs, MouseEvents, PaintContext,
    WindowObject, WindowObjectBase,
};

/// Background colors for each interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    pub normal: Color,
    pub hover: Color,
    pub pressed: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: Color::LIGHT_GRAY,
            hover: Color::from_rgb(0.85, 0.85, 0.85),
            pressed: Color::GRAY,
        }
    }
}

/// A labelled rectangle that reports clicks.
///
/// Mouse events come from an internal [`BoundingBox`] covering the button
/// and name the button as their sender.
#[derive(Debug)]
pub struct Button {
    base: WindowObjectBase,
    label: Arc<Label>,
    hitbox: Arc<BoundingBox>,
    colors: RwLock<ButtonColors>,
}

impl Button {
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<String>) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(Arc::clone(&name));
            base.bind(this.clone());
            base.set_color(ButtonColors::default().normal);

            let label = Label::new(format!("{name}.label"), text);
            let hitbox = BoundingBox::new(format!("{name}.hitbox"));
            base.add_child(label.clone());
            base.add_child(hitbox.clone());

            Self {
                base,
                label,
                hitbox,
                colors: RwLock::new(ButtonColors::default()),
            }
        })
    }

    pub fn label(&self) -> &Arc<Label> {
        &self.label
    }

    pub fn text(&self) -> String {
        self.label.text()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn hitbox(&self) -> &Arc<BoundingBox> {
        &self.hitbox
    }

    pub fn events(&self) -> &MouseEvents {
        self.hitbox.events()
    }

    /// Connect a handler to primary clicks.
    pub fn on_click<F>(&self, handler: F) -> ConnectionId
    where
        F: Fn(&MouseEventArgs) + Send + Sync + 'static,
    {
        self.events().primary_click.connect(handler)
    }

    pub fn colors(&self) -> ButtonColors {
        *self.colors.read()
    }

    pub fn set_colors(&self, colors: ButtonColors) {
        *self.colors.write() = colors;
        self.base.set_color(colors.normal);
    }

    pub fn is_hovered(&self) -> bool {
        self.hitbox.is_mouse_over()
    }

    pub fn is_pressed(&self) -> bool {
        self.hitbox.bounds().local_mouse().primary_down
    }

    /// The background color for the current interaction state.
    pub fn current_color(&self) -> Color {
        let colors = self.colors();
        if self.is_pressed() {
            colors.pressed
        } else if self.is_hovered() {
            colors.hover
        } else {
            colors.normal
        }
    }
}

crate::impl_window_object_lifecycle!(Button, base);

impl WindowObject for Button {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let mut quad = self.base.quad();
        quad.color = self.current_color().with_alpha(self.base.opacity());
        ctx.renderer().draw_quad(&quad);
        self.base.draw_children(ctx);
    }

    fn as_layout_container(&self) -> Option<&dyn LayoutContainer> {
        Some(self)
    }
}

impl LayoutContainer for Button {
    fn container_base(&self) -> &WindowObjectBase {
        &self.base
    }
}
