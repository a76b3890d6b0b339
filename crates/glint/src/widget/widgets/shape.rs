//! Flat colored primitives.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::widget::{PaintContext, WindowObject, WindowObjectBase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    /// Ellipse inscribed in the object's extent.
    Ellipse,
}

/// A rectangle or ellipse filled with the object's color.
///
/// Enable blur on the base to soften whatever is drawn behind it.
#[derive(Debug)]
pub struct Shape {
    base: WindowObjectBase,
    kind: RwLock<ShapeKind>,
}

impl Shape {
    pub fn new(name: impl Into<Arc<str>>, kind: ShapeKind) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            Self {
                base,
                kind: RwLock::new(kind),
            }
        })
    }

    pub fn rectangle(name: impl Into<Arc<str>>) -> Arc<Self> {
        Self::new(name, ShapeKind::Rectangle)
    }

    pub fn ellipse(name: impl Into<Arc<str>>) -> Arc<Self> {
        Self::new(name, ShapeKind::Ellipse)
    }

    pub fn kind(&self) -> ShapeKind {
        *self.kind.read()
    }

    pub fn set_kind(&self, kind: ShapeKind) {
        *self.kind.write() = kind;
    }
}

crate::impl_window_object_lifecycle!(Shape, base);

impl WindowObject for Shape {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let quad = self.base.quad();
        match self.kind() {
            ShapeKind::Rectangle => ctx.renderer().draw_quad(&quad),
            ShapeKind::Ellipse => ctx.renderer().draw_ellipse(&quad),
        }
        self.base.draw_children(ctx);
    }
}
