//! Window object base implementation.
//!
//! This module provides [`WindowObject`], the trait every scene node
//! implements, and [`WindowObjectBase`], the state each node embeds:
//! transform, color, blur, layout settings, children, and the weak links to
//! its parent and window.
//!
//! # Ownership
//!
//! A node owns its children exclusively. Children hold weak references back
//! to their parent and window, so dropping a subtree never leaks through a
//! cycle. Every lifecycle call recurses: initializing, updating, drawing,
//! resizing or closing a node does the same to its whole subtree, one sibling
//! subtree at a time in list order.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::{Arc, Weak};
//! use glint::widget::{WindowObject, WindowObjectBase, PaintContext};
//!
//! struct Marker {
//!     base: WindowObjectBase,
//! }
//!
//! impl Marker {
//!     fn new(name: &str) -> Arc<Self> {
//!         Arc::new_cyclic(|this: &Weak<Marker>| {
//!             let base = WindowObjectBase::new(name);
//!             base.bind(this.clone());
//!             Self { base }
//!         })
//!     }
//! }
//!
//! glint::impl_window_object_lifecycle!(Marker, base);
//!
//! impl WindowObject for Marker {
//!     fn window_base(&self) -> &WindowObjectBase { &self.base }
//!
//!     fn draw(&self, ctx: &mut PaintContext<'_>) {
//!         if self.base.can_draw() {
//!             ctx.renderer().draw_quad(&self.base.quad());
//!             self.base.draw_children(ctx);
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use glint_core::logging::targets;
use glint_core::{DrawableObjectBase, Object, ObjectBase, Signal};
use glint_render::{Color, Mat4, Quad, Transform, Vec2, Vec3};
use parking_lot::{Mutex, RwLock};

use super::layout::{Anchor, LayoutContainer, Margin};
use super::paint::PaintContext;
use crate::window::{ResizeEvent, Window};

/// A node of a window's scene graph.
pub trait WindowObject: Object {
    fn window_base(&self) -> &WindowObjectBase;

    /// Draw this object and its subtree.
    ///
    /// The default draws nothing of its own and recurses into the children.
    fn draw(&self, ctx: &mut PaintContext<'_>) {
        let base = self.window_base();
        if base.can_draw() {
            base.draw_children(ctx);
        }
    }

    /// React to the window changing size.
    fn resize(&self, old_width: u32, old_height: u32, width: u32, height: u32) {
        self.window_base().resize(old_width, old_height, width, height);
    }

    /// Attach this object and its subtree to a window.
    fn set_window(&self, window: Weak<Window>) {
        self.window_base().set_window(window);
    }

    /// Containers lay their children out inside their own box instead of the
    /// whole window.
    fn as_layout_container(&self) -> Option<&dyn LayoutContainer> {
        None
    }
}

/// Implement [`Object`](glint_core::Object) for a window object by routing
/// the lifecycle through its [`WindowObjectBase`] field, so that init, update
/// and close recurse into children.
#[macro_export]
macro_rules! impl_window_object_lifecycle {
    ($ty:ty, $base:ident) => {
        impl $crate::Object for $ty {
            fn object_base(&self) -> &$crate::ObjectBase {
                self.$base.object()
            }

            fn init(&self) -> bool {
                self.$base.init_tree()
            }

            fn update(&self, delta_time: f32) -> bool {
                self.$base.update_tree(delta_time)
            }

            fn close(&self) {
                self.$base.close_tree()
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Default)]
struct Blur {
    enabled: bool,
    intensity: f32,
}

/// State shared by every window object.
pub struct WindowObjectBase {
    drawable: DrawableObjectBase,
    transform: Arc<Transform>,
    /// RGBA color; alpha doubles as opacity.
    color: RwLock<Color>,
    blur: Mutex<Blur>,
    maintain_aspect_ratio: AtomicBool,
    anchor: RwLock<Anchor>,
    margin: RwLock<Margin>,
    children: RwLock<Vec<Arc<dyn WindowObject>>>,
    parent: RwLock<Option<Weak<dyn WindowObject>>>,
    window: RwLock<Weak<Window>>,
    this: RwLock<Option<Weak<dyn WindowObject>>>,

    /// Emitted after a resize has been applied to this object's subtree.
    pub resized: Signal<ResizeEvent>,
}

impl WindowObjectBase {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            drawable: DrawableObjectBase::with_name(name),
            transform: Arc::new(Transform::new()),
            color: RwLock::new(Color::WHITE),
            blur: Mutex::new(Blur::default()),
            maintain_aspect_ratio: AtomicBool::new(false),
            anchor: RwLock::new(Anchor::NoAnchor),
            margin: RwLock::new(Margin::ZERO),
            children: RwLock::new(Vec::new()),
            parent: RwLock::new(None),
            window: RwLock::new(Weak::new()),
            this: RwLock::new(None),
            resized: Signal::new(),
        }
    }

    /// Record the object that embeds this base.
    ///
    /// Call from the owner's `Arc::new_cyclic` constructor. Children added
    /// later point back at this reference, and bounding objects use it as the
    /// event sender when they have no parent.
    pub fn bind(&self, this: Weak<dyn WindowObject>) {
        *self.this.write() = Some(this);
    }

    /// The object that embeds this base, if bound and alive.
    pub fn this(&self) -> Option<Arc<dyn WindowObject>> {
        self.this.read().as_ref().and_then(Weak::upgrade)
    }

    // =========================================================================
    // Lifecycle state
    // =========================================================================

    #[inline]
    pub fn object(&self) -> &ObjectBase {
        self.drawable.object()
    }

    #[inline]
    pub fn drawable(&self) -> &DrawableObjectBase {
        &self.drawable
    }

    pub fn name(&self) -> Arc<str> {
        self.object().name()
    }

    pub fn is_initialized(&self) -> bool {
        self.object().is_initialized()
    }

    pub fn is_visible(&self) -> bool {
        self.drawable.is_visible()
    }

    pub fn set_visible(&self, visible: bool) {
        self.drawable.set_visible(visible);
    }

    pub fn is_enabled(&self) -> bool {
        self.object().is_enabled()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.object().set_enabled(enabled);
    }

    pub fn can_draw(&self) -> bool {
        self.drawable.can_draw()
    }

    /// Lay out, initialize this object, then initialize every child.
    pub fn init_tree(&self) -> bool {
        self.refresh_layout();
        let initialized = self.object().init();
        for child in self.children() {
            if !child.init() {
                tracing::warn!(target: targets::OBJECT, parent = %self.name(), child = %child.name(), "child failed to initialize");
            }
        }
        initialized
    }

    /// Update every child. Returns `false` without touching them when this
    /// object is not initialized or not enabled.
    pub fn update_tree(&self, delta_time: f32) -> bool {
        if !self.object().update() {
            return false;
        }
        for child in self.children() {
            child.update(delta_time);
        }
        true
    }

    /// Draw every child, in list order.
    pub fn draw_children(&self, ctx: &mut PaintContext<'_>) {
        for child in self.children() {
            child.draw(ctx);
        }
    }

    /// Close every child, then this object.
    pub fn close_tree(&self) {
        for child in self.children() {
            child.close();
        }
        self.object().close();
    }

    /// Re-run layout, resize the subtree, then notify `resized` handlers.
    ///
    /// Does nothing on an object that is not initialized.
    pub fn resize(&self, old_width: u32, old_height: u32, width: u32, height: u32) {
        if !self.is_initialized() {
            return;
        }
        self.refresh_layout();
        for child in self.children() {
            child.resize(old_width, old_height, width, height);
        }
        self.resized.emit(ResizeEvent {
            old_width,
            old_height,
            width,
            height,
        });
    }

    // =========================================================================
    // Transform
    // =========================================================================

    pub fn transform(&self) -> &Arc<Transform> {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn set_position(&self, position: Vec3) {
        self.transform.set_position(position);
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale()
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.transform.set_scale(scale);
    }

    pub fn world_position(&self) -> Vec3 {
        self.transform.world_position()
    }

    pub fn world_scale(&self) -> Vec3 {
        self.transform.world_scale()
    }

    /// Half width and height in normalized window space.
    ///
    /// # Panics
    ///
    /// Panics if the object maintains its aspect ratio and has no window,
    /// since the correction depends on the window's dimensions.
    pub fn half_size(&self) -> Vec2 {
        if !self.maintains_aspect_ratio() {
            let scale = self.world_scale();
            return Vec2::new(scale.x, scale.y);
        }
        match self.window() {
            Some(window) => self.half_size_in(&window),
            None => panic!(
                "window object '{}' maintains its aspect ratio but is not attached to a window",
                self.name()
            ),
        }
    }

    /// Half width and height, aspect-corrected against `window` if this
    /// object maintains its aspect ratio.
    pub fn half_size_in(&self, window: &Window) -> Vec2 {
        let scale = self.world_scale();
        if self.maintains_aspect_ratio() {
            Vec2::new(window.scale_x(scale.x), window.scale_y(scale.y))
        } else {
            Vec2::new(scale.x, scale.y)
        }
    }

    /// World matrix with aspect-ratio correction applied.
    pub fn draw_matrix(&self) -> Mat4 {
        let world = self.transform.world_matrix();
        if !self.maintains_aspect_ratio() {
            return world;
        }
        match self.window() {
            Some(window) => {
                world * Mat4::from_scale(Vec3::new(window.scale_x(1.0), window.scale_y(1.0), 1.0))
            }
            None => world,
        }
    }

    /// A quad covering this object in its color.
    pub fn quad(&self) -> Quad {
        Quad {
            transform: self.draw_matrix(),
            color: self.color(),
            blur: self.blur(),
        }
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    pub fn color(&self) -> Color {
        *self.color.read()
    }

    pub fn set_color(&self, color: Color) {
        *self.color.write() = color;
    }

    pub fn opacity(&self) -> f32 {
        self.color.read().a
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.color.write().a = opacity;
    }

    /// Blur intensity if blur is enabled.
    pub fn blur(&self) -> Option<f32> {
        let blur = *self.blur.lock();
        blur.enabled.then_some(blur.intensity)
    }

    pub fn set_blur_enabled(&self, enabled: bool) {
        self.blur.lock().enabled = enabled;
    }

    pub fn set_blur_intensity(&self, intensity: f32) {
        self.blur.lock().intensity = intensity;
    }

    pub fn maintains_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio.load(Ordering::Acquire)
    }

    pub fn set_maintain_aspect_ratio(&self, maintain: bool) {
        self.maintain_aspect_ratio.store(maintain, Ordering::Release);
    }

    // =========================================================================
    // Layout settings
    // =========================================================================

    pub fn anchor(&self) -> Anchor {
        *self.anchor.read()
    }

    /// Change the anchor and re-run layout.
    pub fn set_anchor(&self, anchor: Anchor) {
        *self.anchor.write() = anchor;
        self.refresh_layout();
    }

    pub fn margin(&self) -> Margin {
        *self.margin.read()
    }

    /// Change the margin and re-run layout.
    pub fn set_margin(&self, margin: Margin) {
        *self.margin.write() = margin;
        self.refresh_layout();
    }

    // =========================================================================
    // Tree
    // =========================================================================

    pub fn window(&self) -> Option<Arc<Window>> {
        self.window.read().upgrade()
    }

    /// Attach this object and every descendant to `window`.
    pub fn set_window(&self, window: Weak<Window>) {
        *self.window.write() = window.clone();
        for child in self.children() {
            child.set_window(window.clone());
        }
    }

    pub fn parent(&self) -> Option<Arc<dyn WindowObject>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    fn set_parent(&self, parent: Option<Weak<dyn WindowObject>>, transform: Option<&Arc<Transform>>) {
        *self.parent.write() = parent;
        self.transform.set_parent(transform);
    }

    /// Snapshot of the children, in draw order.
    pub fn children(&self) -> Vec<Arc<dyn WindowObject>> {
        self.children.read().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Append a child.
    ///
    /// The child is parented to this object, composes its transform with
    /// this object's, and joins this object's window. If this object is
    /// already initialized the child is initialized too: inline on the window
    /// thread or when the window is not running, otherwise at the top of the
    /// window's next tick.
    pub fn add_child(&self, child: Arc<dyn WindowObject>) {
        let child_base = child.window_base();
        child_base.set_parent(self.this.read().clone(), Some(&self.transform));
        child.set_window(self.window.read().clone());
        self.children.write().push(Arc::clone(&child));
        if self.is_initialized() {
            let deferred = self
                .window()
                .is_some_and(|window| window.defer_child_init(&child));
            if !deferred {
                child.init();
            }
        }
    }

    /// Detach and close a child. Returns `false` if it is not a child of
    /// this object.
    pub fn remove_child(&self, child: &Arc<dyn WindowObject>) -> bool {
        let removed = {
            let mut children = self.children.write();
            match children.iter().position(|existing| Arc::ptr_eq(existing, child)) {
                Some(index) => Some(children.remove(index)),
                None => None,
            }
        };
        match removed {
            Some(child) => {
                child.close();
                child.window_base().set_parent(None, None);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for WindowObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowObjectBase")
            .field("name", &self.name())
            .field("initialized", &self.is_initialized())
            .field("visible", &self.is_visible())
            .field("anchor", &self.anchor())
            .field("children", &self.child_count())
            .finish()
    }
}
