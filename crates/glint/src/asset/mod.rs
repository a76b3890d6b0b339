//! Assets: named, protectable resources.
//!
//! An [`Asset`] is an [`Object`] with an optional in-memory source and a
//! `protected` flag. Assets are registered in an [`AssetLibrary`], which
//! initializes and closes them on the window thread in coalesced batches.
//!
//! # Protection
//!
//! A protected asset survives every bulk or replacing operation of the
//! library: `add` with the same name, `remove`, `dispose`, `remove_all` and
//! `dispose_all` all skip it. Clear the flag first to get rid of it.
//!
//! # Capabilities
//!
//! Consumers that need a specific kind of resource ask the asset for it
//! instead of downcasting: [`Asset::as_texture`], [`Asset::as_font`],
//! [`Asset::as_shader`]. Concrete types can still be recovered with
//! [`asset_cast`].

mod embedded;
mod kinds;
mod library;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glint_core::{Object, ObjectBase};
use glint_render::{FontFace, ShaderProgram, Texture};
use parking_lot::RwLock;

pub use embedded::{EmbeddedDir, builtin_shader};
pub use kinds::{BinaryAsset, FontAsset, ModelAsset, ShaderAsset, TextureAsset};
pub use library::{AssetLibrary, Closer, DEFAULT_FONT};

/// A named resource managed by an [`AssetLibrary`].
pub trait Asset: Object {
    fn asset_base(&self) -> &AssetBase;

    /// Whether bulk and replacing operations must leave this asset alone.
    fn is_protected(&self) -> bool {
        self.asset_base().is_protected()
    }

    fn set_protected(&self, protected: bool) {
        self.asset_base().set_protected(protected);
    }

    /// The asset's in-memory bytes, if it has any.
    fn source(&self) -> Option<Arc<[u8]>> {
        self.asset_base().source()
    }

    fn as_texture(&self) -> Option<&dyn Texture> {
        None
    }

    fn as_font(&self) -> Option<&dyn FontFace> {
        None
    }

    fn as_shader(&self) -> Option<&dyn ShaderProgram> {
        None
    }
}

/// State shared by every asset: lifecycle, source bytes, protection.
pub struct AssetBase {
    object: ObjectBase,
    source: RwLock<Option<Arc<[u8]>>>,
    protected: AtomicBool,
}

impl AssetBase {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            object: ObjectBase::with_name(name),
            source: RwLock::new(None),
            protected: AtomicBool::new(false),
        }
    }

    pub fn with_source(name: impl Into<Arc<str>>, source: impl Into<Arc<[u8]>>) -> Self {
        let base = Self::new(name);
        base.set_source(source);
        base
    }

    #[inline]
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    pub fn source(&self) -> Option<Arc<[u8]>> {
        self.source.read().clone()
    }

    pub fn set_source(&self, source: impl Into<Arc<[u8]>>) {
        *self.source.write() = Some(source.into());
    }

    pub fn clear_source(&self) {
        *self.source.write() = None;
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.protected.load(Ordering::Acquire)
    }

    pub fn set_protected(&self, protected: bool) {
        self.protected.store(protected, Ordering::Release);
    }
}

impl fmt::Debug for AssetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetBase")
            .field("object", &self.object)
            .field("source_len", &self.source.read().as_ref().map(|s| s.len()))
            .field("protected", &self.is_protected())
            .finish()
    }
}

/// Downcast a `&dyn Asset` to its concrete type.
pub fn asset_cast<T: Asset>(asset: &dyn Asset) -> Option<&T> {
    (asset as &dyn Any).downcast_ref::<T>()
}
