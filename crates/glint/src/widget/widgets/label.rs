//! Single-line text.

use std::sync::{Arc, Weak};

use glint_render::{Color, TextRun};
use parking_lot::RwLock;

use crate::asset::DEFAULT_FONT;
use crate::widget::{LayoutContainer, PaintContext, WindowObject, WindowObjectBase};

const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone)]
struct LabelText {
    text: String,
    font: String,
    size: f32,
}

/// A text run drawn in the object's color.
///
/// The font is looked up by name in the context's asset library when drawn;
/// unknown names fall back to the library's default font.
#[derive(Debug)]
pub struct Label {
    base: WindowObjectBase,
    text: RwLock<LabelText>,
}

impl Label {
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<String>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            base.set_color(Color::BLACK);
            Self {
                base,
                text: RwLock::new(LabelText {
                    text: text.into(),
                    font: DEFAULT_FONT.to_string(),
                    size: DEFAULT_FONT_SIZE,
                }),
            }
        })
    }

    pub fn text(&self) -> String {
        self.text.read().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.text.write().text = text.into();
    }

    pub fn font(&self) -> String {
        self.text.read().font.clone()
    }

    pub fn set_font(&self, font: impl Into<String>) {
        self.text.write().font = font.into();
    }

    pub fn font_size(&self) -> f32 {
        self.text.read().size
    }

    pub fn set_font_size(&self, size: f32) {
        self.text.write().size = size;
    }

    fn resolve_font(&self, requested: &str) -> String {
        self.base
            .window()
            .and_then(|window| window.context().assets().font_or_default(requested))
            .map(|asset| asset.name().to_string())
            .unwrap_or_else(|| requested.to_string())
    }
}

crate::impl_window_object_lifecycle!(Label, base);

impl WindowObject for Label {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let LabelText { text, font, size } = self.text.read().clone();
        if !text.is_empty() {
            let run = TextRun {
                transform: self.base.draw_matrix(),
                color: self.base.color(),
                text,
                font: self.resolve_font(&font),
                size,
            };
            ctx.renderer().draw_text(&run);
        }
        self.base.draw_children(ctx);
    }

    fn as_layout_container(&self) -> Option<&dyn LayoutContainer> {
        Some(self)
    }
}

impl LayoutContainer for Label {
    fn container_base(&self) -> &WindowObjectBase {
        &self.base
    }
}
