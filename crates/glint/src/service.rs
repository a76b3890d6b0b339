//! Services: window-scoped objects that run before window objects.
//!
//! A service is registered on a [`Window`] with
//! [`Window::add_service`]. It is initialized before the window's objects,
//! updated before them every tick, and closed after them during teardown.
//! The [`AssetLibrary`](crate::asset::AssetLibrary) is the built-in service.

use std::sync::{Arc, Weak};

use glint_core::{Object, ObjectBase};
use parking_lot::RwLock;

use crate::window::Window;

/// An object driven by a window's tick loop ahead of its scene.
pub trait Service: Object {
    fn service_base(&self) -> &ServiceBase;

    /// The window this service is registered on.
    fn window(&self) -> Option<Arc<Window>> {
        self.service_base().window()
    }

    fn set_window(&self, window: Weak<Window>) {
        self.service_base().set_window(window);
    }
}

/// Lifecycle state plus the window back-reference.
#[derive(Debug)]
pub struct ServiceBase {
    object: ObjectBase,
    window: RwLock<Weak<Window>>,
}

impl ServiceBase {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            object: ObjectBase::with_name(name),
            window: RwLock::new(Weak::new()),
        }
    }

    #[inline]
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    pub fn window(&self) -> Option<Arc<Window>> {
        self.window.read().upgrade()
    }

    pub fn set_window(&self, window: Weak<Window>) {
        *self.window.write() = window;
    }
}
