//! Object lifecycle model for Glint.
//!
//! Every long-lived thing in a Glint scene (window objects, assets, services)
//! is an [`Object`]: it has a name, an optional tag, an enabled flag, and an
//! initialized flag. The lifecycle is a two-state machine:
//!
//! ```text
//! Uninitialized --init()--> Initialized --close()--> Uninitialized
//! ```
//!
//! `update` is a guarded no-op outside the initialized state, and calling
//! `init` or `close` when already in the target state is safe. Teardown code
//! can therefore close every object it owns unconditionally.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait all scene objects implement
//! - [`ObjectBase`] - State holder implementing the lifecycle flags
//! - [`DrawableObjectBase`] - Adds the `visible` flag that gates drawing

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::targets;

/// An arbitrary value attached to an object by application code.
pub type Tag = Arc<dyn Any + Send + Sync>;

/// The base trait for all Glint objects.
///
/// Implementors hold an [`ObjectBase`] (directly or through a richer base
/// such as a window object base) and expose it through
/// [`object_base`](Object::object_base). The provided methods implement the
/// guarded lifecycle; types override them to add behavior and call back into
/// the base.
///
/// # Related
///
/// - [`object_cast`] - Downcast a `&dyn Object` to its concrete type
pub trait Object: Any + Send + Sync {
    /// The lifecycle state of this object.
    fn object_base(&self) -> &ObjectBase;

    /// Transition to the initialized state. Returns `true` on success.
    fn init(&self) -> bool {
        self.object_base().init()
    }

    /// Advance one tick. Returns `false` without doing anything when the
    /// object is not initialized or not enabled.
    fn update(&self, delta_time: f32) -> bool {
        let _ = delta_time;
        self.object_base().update()
    }

    /// Transition to the uninitialized state.
    fn close(&self) {
        self.object_base().close();
    }

    /// The object's current name.
    fn name(&self) -> Arc<str> {
        self.object_base().name()
    }

    /// The concrete type name, for debugging output.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Lifecycle state shared by every object.
///
/// The name is stored behind a pointer swap: readers clone an `Arc<str>` and
/// never observe a partially written name. Flags are atomics so they can be
/// read from any thread without locking.
pub struct ObjectBase {
    name: RwLock<Arc<str>>,
    tag: RwLock<Option<Tag>>,
    enabled: AtomicBool,
    initialized: AtomicBool,
}

impl ObjectBase {
    /// Create an unnamed, enabled, uninitialized object base.
    pub fn new() -> Self {
        Self::with_name("")
    }

    /// Create an object base with the given name.
    pub fn with_name(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: RwLock::new(name.into()),
            tag: RwLock::new(None),
            enabled: AtomicBool::new(true),
            initialized: AtomicBool::new(false),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Get the object's name.
    pub fn name(&self) -> Arc<str> {
        self.name.read().clone()
    }

    /// Set the object's name. Last write wins; no validation is applied.
    pub fn set_name(&self, name: impl Into<Arc<str>>) {
        *self.name.write() = name.into();
    }

    /// Get the attached tag, if any.
    pub fn tag(&self) -> Option<Tag> {
        self.tag.read().clone()
    }

    /// Get the attached tag downcast to a concrete type.
    pub fn tag_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.tag().and_then(|tag| tag.downcast::<T>().ok())
    }

    /// Attach an arbitrary value to this object.
    pub fn set_tag<T: Any + Send + Sync>(&self, tag: T) {
        *self.tag.write() = Some(Arc::new(tag));
    }

    /// Remove the attached tag.
    pub fn clear_tag(&self) {
        *self.tag.write() = None;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Whether `update` is allowed to run.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Enable or disable updates. Does not affect `init`/`close`.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Whether the object is in the initialized state.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Enter the initialized state.
    pub fn init(&self) -> bool {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            tracing::trace!(target: targets::OBJECT, name = %self.name(), "initialized");
        }
        true
    }

    /// Returns `true` when the object is initialized and enabled.
    pub fn update(&self) -> bool {
        self.is_initialized() && self.is_enabled()
    }

    /// Leave the initialized state.
    pub fn close(&self) {
        if self.initialized.swap(false, Ordering::AcqRel) {
            tracing::trace!(target: targets::OBJECT, name = %self.name(), "closed");
        }
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("name", &self.name())
            .field("enabled", &self.is_enabled())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Lifecycle state for objects that draw: an [`ObjectBase`] plus a
/// `visible` flag.
///
/// Drawing is a no-op unless the object is both initialized and visible.
#[derive(Debug)]
pub struct DrawableObjectBase {
    object: ObjectBase,
    visible: AtomicBool,
}

impl DrawableObjectBase {
    /// Create a visible drawable base with the given name.
    pub fn with_name(name: impl Into<Arc<str>>) -> Self {
        Self {
            object: ObjectBase::with_name(name),
            visible: AtomicBool::new(true),
        }
    }

    /// The underlying object state.
    #[inline]
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    /// Whether the object is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    /// Show or hide the object. Does not affect `init`/`close`.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
    }

    /// Returns `true` when drawing should proceed.
    pub fn can_draw(&self) -> bool {
        self.object.is_initialized() && self.is_visible()
    }
}

impl Default for DrawableObjectBase {
    fn default() -> Self {
        Self::with_name("")
    }
}

/// Safe downcast function for [`Object`] trait objects.
///
/// Returns `Some(&T)` if the object is of type `T`, otherwise `None`.
pub fn object_cast<T: Object>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}
