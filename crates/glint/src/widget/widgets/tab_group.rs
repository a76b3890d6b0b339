//! Tabbed pages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use glint_core::{Object, ObjectBase, Signal};
use glint_render::{Color, Vec3};
use parking_lot::RwLock;

use super::{Button, ButtonColors, View};
use crate::widget::{PaintContext, WindowObject, WindowObjectBase};

/// Height of the tab bar as a fraction of the group.
const TAB_BAR_HEIGHT: f32 = 0.15;

const ACTIVE_TAB: ButtonColors = ButtonColors {
    normal: Color::WHITE,
    hover: Color::WHITE,
    pressed: Color::LIGHT_GRAY,
};

#[derive(Debug)]
struct Tab {
    button: Arc<Button>,
    page: Arc<View>,
}

/// A row of tab buttons above a stack of pages, one visible at a time.
///
/// Inactive pages are hidden and disabled, so their subtrees neither draw
/// nor update.
#[derive(Debug)]
pub struct TabGroup {
    base: WindowObjectBase,
    tabs: RwLock<Vec<Tab>>,
    active: AtomicUsize,
    this: Weak<TabGroup>,

    /// Emitted with the new index when the active tab changes.
    pub active_changed: Signal<usize>,
}

impl TabGroup {
    pub fn new(name: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            base.set_color(Color::TRANSPARENT);
            Self {
                base,
                tabs: RwLock::new(Vec::new()),
                active: AtomicUsize::new(0),
                this: this.clone(),
                active_changed: Signal::new(),
            }
        })
    }

    /// Append a tab and return its page. The first tab starts active.
    pub fn add_tab(&self, title: impl Into<String>) -> Arc<View> {
        let index = self.tab_count();
        let name = self.base.name();
        let button = Button::new(format!("{name}.tab{index}"), title);
        let page = View::new(format!("{name}.page{index}"));
        page.window_base().set_color(Color::TRANSPARENT);

        let weak = self.this.clone();
        button.on_click(move |_| {
            if let Some(group) = weak.upgrade() {
                group.set_active(index);
            }
        });

        self.base.add_child(button.clone());
        self.base.add_child(page.clone());
        self.tabs.write().push(Tab {
            button,
            page: Arc::clone(&page),
        });

        self.arrange();
        self.apply_active(self.active());
        page
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.read().len()
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn page(&self, index: usize) -> Option<Arc<View>> {
        self.tabs.read().get(index).map(|tab| Arc::clone(&tab.page))
    }

    pub fn tab_button(&self, index: usize) -> Option<Arc<Button>> {
        self.tabs.read().get(index).map(|tab| Arc::clone(&tab.button))
    }

    /// Show the page at `index`. Out-of-range indices are ignored.
    pub fn set_active(&self, index: usize) {
        if index >= self.tab_count() {
            return;
        }
        let previous = self.active.swap(index, Ordering::AcqRel);
        self.apply_active(index);
        if previous != index {
            self.active_changed.emit(index);
        }
    }

    fn apply_active(&self, active: usize) {
        for (index, tab) in self.tabs.read().iter().enumerate() {
            let is_active = index == active;
            let page = tab.page.window_base();
            page.set_visible(is_active);
            page.set_enabled(is_active);
            tab.button.set_colors(if is_active {
                ACTIVE_TAB
            } else {
                ButtonColors::default()
            });
        }
    }

    /// Place tab buttons across the top and pages below them. Child
    /// positions are offsets in window space, so they follow this object's
    /// current scale.
    fn arrange(&self) {
        let tabs = self.tabs.read();
        if tabs.is_empty() {
            return;
        }
        let count = tabs.len() as f32;
        let scale = self.base.scale();
        let bar_center = scale.y * (1.0 - TAB_BAR_HEIGHT);
        let page_center = -scale.y * TAB_BAR_HEIGHT;

        for (index, tab) in tabs.iter().enumerate() {
            let x = scale.x * (-1.0 + (2.0 * index as f32 + 1.0) / count);
            let button = tab.button.window_base();
            button.set_position(Vec3::new(x, bar_center, 0.0));
            button.set_scale(Vec3::new(1.0 / count, TAB_BAR_HEIGHT, 1.0));

            let page = tab.page.window_base();
            page.set_position(Vec3::new(0.0, page_center, 0.0));
            page.set_scale(Vec3::new(1.0, 1.0 - TAB_BAR_HEIGHT, 1.0));
        }
    }
}

impl Object for TabGroup {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }

    fn init(&self) -> bool {
        self.arrange();
        self.base.init_tree()
    }

    fn update(&self, delta_time: f32) -> bool {
        if !self.base.object().update() {
            return false;
        }
        self.arrange();
        self.base.update_tree(delta_time)
    }

    fn close(&self) {
        self.base.close_tree()
    }
}

impl WindowObject for TabGroup {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tab_is_active() {
        let group = TabGroup::new("tabs");
        let first = group.add_tab("One");
        let second = group.add_tab("Two");

        assert_eq!(group.active(), 0);
        assert!(first.window_base().is_visible());
        assert!(!second.window_base().is_visible());
        assert!(!second.window_base().is_enabled());
    }

    #[test]
    fn test_set_active_switches_pages() {
        let group = TabGroup::new("tabs");
        let first = group.add_tab("One");
        let second = group.add_tab("Two");

        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = Arc::clone(&changes);
        group.active_changed.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        group.set_active(1);
        group.set_active(1);
        group.set_active(7);
        assert_eq!(group.active(), 1);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert!(!first.window_base().is_visible());
        assert!(second.window_base().is_visible());
        assert!(second.window_base().is_enabled());
    }

    #[test]
    fn test_tab_buttons_split_the_bar() {
        let group = TabGroup::new("tabs");
        group.add_tab("One");
        group.add_tab("Two");

        let left = group.tab_button(0).map(|b| b.window_base().position());
        let right = group.tab_button(1).map(|b| b.window_base().position());
        assert_eq!(left.map(|p| p.x), Some(-0.5));
        assert_eq!(right.map(|p| p.x), Some(0.5));
    }
}
