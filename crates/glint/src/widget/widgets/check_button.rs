//! Toggle boxes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use glint_core::Signal;
use glint_render::{Color, Mat4, Quad, Vec3};
use parking_lot::RwLock;

use crate::widget::{
    BoundingBox, BoundingObject, MouseEvents, PaintContext, WindowObject, WindowObjectBase,
};

/// Fraction of the box covered by the check mark.
const MARK_SCALE: f32 = 0.6;

/// A box that flips between checked and unchecked on each primary click.
#[derive(Debug)]
pub struct CheckButton {
    base: WindowObjectBase,
    hitbox: Arc<BoundingBox>,
    checked: AtomicBool,
    mark_color: RwLock<Color>,

    /// Emitted with the new state whenever it changes.
    pub checked_changed: Signal<bool>,
}

impl CheckButton {
    pub fn new(name: impl Into<Arc<str>>) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(Arc::clone(&name));
            base.bind(this.clone());
            base.set_color(Color::LIGHT_GRAY);

            let hitbox = BoundingBox::new(format!("{name}.hitbox"));
            let weak = this.clone();
            hitbox.events().primary_click.connect(move |_| {
                if let Some(check) = weak.upgrade() {
                    check.toggle();
                }
            });
            base.add_child(hitbox.clone());

            Self {
                base,
                hitbox,
                checked: AtomicBool::new(false),
                mark_color: RwLock::new(Color::DARK_GRAY),
                checked_changed: Signal::new(),
            }
        })
    }

    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::Acquire)
    }

    /// Set the state, emitting `checked_changed` if it differs.
    pub fn set_checked(&self, checked: bool) {
        if self.checked.swap(checked, Ordering::AcqRel) != checked {
            self.checked_changed.emit(checked);
        }
    }

    pub fn toggle(&self) {
        self.set_checked(!self.is_checked());
    }

    pub fn mark_color(&self) -> Color {
        *self.mark_color.read()
    }

    pub fn set_mark_color(&self, color: Color) {
        *self.mark_color.write() = color;
    }

    pub fn events(&self) -> &MouseEvents {
        self.hitbox.events()
    }
}

crate::impl_window_object_lifecycle!(CheckButton, base);

impl WindowObject for CheckButton {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let frame = self.base.quad();
        ctx.renderer().draw_quad(&frame);
        if self.is_checked() {
            let mark = Quad {
                transform: frame.transform * Mat4::from_scale(Vec3::new(MARK_SCALE, MARK_SCALE, 1.0)),
                color: self.mark_color(),
                blur: None,
            };
            ctx.renderer().draw_quad(&mark);
        }
        self.base.draw_children(ctx);
    }
}
