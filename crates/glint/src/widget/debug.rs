//! Scene tree debugging output.

use std::fmt;
use std::sync::Arc;

use super::layout::Anchor;
use super::object::WindowObject;
use crate::window::Window;

/// Formats an object tree as an indented listing, one object per line.
///
/// ```text
/// root (View) anchor=Center
///   root.ok (Button)
///     root.ok.label (Label)
///     root.ok.hitbox (BoundingBox)
///   status (Label) [hidden]
/// ```
pub struct SceneTreeDebug {
    roots: Vec<Arc<dyn WindowObject>>,
}

impl SceneTreeDebug {
    /// Every top-level object of `window`.
    pub fn window(window: &Window) -> Self {
        Self {
            roots: window.objects(),
        }
    }

    /// A single subtree.
    pub fn object(object: Arc<dyn WindowObject>) -> Self {
        Self {
            roots: vec![object],
        }
    }

    /// Log the tree at debug level.
    pub fn log(&self) {
        tracing::debug!(target: glint_core::logging::targets::WINDOW, "scene tree:\n{self}");
    }

    fn write_node(f: &mut fmt::Formatter<'_>, object: &dyn WindowObject, depth: usize) -> fmt::Result {
        let base = object.window_base();
        write!(f, "{:indent$}{} ({})", "", base.name(), short_type_name(object.type_name()), indent = depth * 2)?;
        if base.anchor() != Anchor::NoAnchor {
            write!(f, " anchor={:?}", base.anchor())?;
        }
        if !base.is_visible() {
            f.write_str(" [hidden]")?;
        }
        if !base.is_enabled() {
            f.write_str(" [disabled]")?;
        }
        writeln!(f)?;
        for child in base.children() {
            Self::write_node(f, child.as_ref(), depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            Self::write_node(f, root.as_ref(), 0)?;
        }
        Ok(())
    }
}

fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Button, Label, View};

    #[test]
    fn test_tree_listing() {
        let root = View::new("root");
        let ok = Button::new("ok", "OK");
        let status = Label::new("status", "ready");
        status.window_base().set_visible(false);
        root.add_child(ok);
        root.add_child(status);

        let listing = SceneTreeDebug::object(root).to_string();
        assert_eq!(
            listing,
            "root (View)\n  ok (Button)\n    ok.label (Label)\n    ok.hitbox (BoundingBox)\n  status (Label) [hidden]\n"
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("glint::widget::widgets::view::View"), "View");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
