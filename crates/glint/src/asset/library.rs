//! The asset library service.
//!
//! An [`AssetLibrary`] maps names to assets and defers their initialization
//! and teardown to the window thread. Mutations only touch the map and two
//! pending stacks and raise a `state_changed` flag; the next
//! [`update`](Object::update) drains both stacks at once, so any number of
//! mutations between two ticks cost a single flush.
//!
//! Both stacks are drained last-in first-out. Register dependencies after
//! their dependents (a shader after the material that uses it) and the
//! dependency is initialized first.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use glint_core::logging::{PerfSpan, span_names, targets};
use glint_core::{Object, ObjectBase};
use parking_lot::{Mutex, RwLock};

use super::Asset;
use crate::service::{Service, ServiceBase};

/// Name the library falls back to when a requested font is missing.
pub const DEFAULT_FONT: &str = "default";

#[derive(Default)]
struct LibraryState {
    assets: HashMap<String, Arc<dyn Asset>>,
    init_queue: Vec<Arc<dyn Asset>>,
    close_queue: Vec<Arc<dyn Asset>>,
}

/// A named collection of assets with deferred init/close.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use glint::asset::{AssetLibrary, BinaryAsset};
/// use glint::Object;
///
/// let library = AssetLibrary::new("assets");
/// library.add(Arc::new(BinaryAsset::new("greeting", b"hello".to_vec())));
///
/// // Nothing is initialized until the library is updated.
/// assert!(!library.get("greeting").unwrap().object_base().is_initialized());
///
/// library.init();
/// assert!(library.get("greeting").unwrap().object_base().is_initialized());
/// ```
pub struct AssetLibrary {
    service: ServiceBase,
    state: Mutex<LibraryState>,
    state_changed: AtomicBool,
    protected: AtomicBool,
    local_root: RwLock<PathBuf>,
    default_font: RwLock<String>,
    flushes: AtomicU64,
}

impl AssetLibrary {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            service: ServiceBase::new(name),
            state: Mutex::new(LibraryState::default()),
            state_changed: AtomicBool::new(false),
            protected: AtomicBool::new(false),
            local_root: RwLock::new(PathBuf::from(".")),
            default_font: RwLock::new(DEFAULT_FONT.to_string()),
            flushes: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// A protected library refuses to close.
    pub fn is_protected(&self) -> bool {
        self.protected.load(Ordering::Acquire)
    }

    pub fn set_protected(&self, protected: bool) {
        self.protected.store(protected, Ordering::Release);
    }

    /// Directory searched by [`get_reader`](Self::get_reader) for assets
    /// that are not in memory.
    pub fn local_root(&self) -> PathBuf {
        self.local_root.read().clone()
    }

    pub fn set_local_root(&self, root: impl Into<PathBuf>) {
        *self.local_root.write() = root.into();
    }

    pub fn with_local_root(self, root: impl Into<PathBuf>) -> Self {
        self.set_local_root(root);
        self
    }

    pub fn default_font(&self) -> String {
        self.default_font.read().clone()
    }

    pub fn set_default_font(&self, name: impl Into<String>) {
        *self.default_font.write() = name.into();
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Register an asset under its name.
    ///
    /// A protected asset already registered under the same name wins and the
    /// call does nothing. Otherwise any previous asset is queued for close and
    /// the new one for init.
    pub fn add(&self, asset: Arc<dyn Asset>) {
        let name = asset.name().to_string();
        let mut state = self.state.lock();
        if let Some(existing) = state.assets.get(&name) {
            if existing.is_protected() {
                tracing::debug!(target: targets::ASSET, asset = %name, "add refused, existing asset is protected");
                return;
            }
            if !Arc::ptr_eq(existing, &asset) {
                let old = Arc::clone(existing);
                state.close_queue.push(old);
            }
        }
        state.init_queue.push(Arc::clone(&asset));
        state.assets.insert(name, asset);
        drop(state);
        self.mark_changed();
    }

    /// Drop an asset from the map without closing it.
    pub fn remove(&self, name: &str) {
        self.take(name, false);
    }

    /// Drop an asset from the map and queue it for close.
    pub fn dispose(&self, name: &str) {
        self.take(name, true);
    }

    /// Remove every unprotected asset without closing them.
    pub fn remove_all(&self) {
        self.take_all(false);
    }

    /// Remove every unprotected asset and queue them for close.
    pub fn dispose_all(&self) {
        self.take_all(true);
    }

    fn take(&self, name: &str, close: bool) {
        let mut state = self.state.lock();
        match state.assets.get(name) {
            Some(asset) if asset.is_protected() => {
                tracing::debug!(target: targets::ASSET, asset = name, "refusing to remove protected asset");
                return;
            }
            Some(_) => {}
            None => return,
        }
        if let Some(asset) = state.assets.remove(name) {
            if close {
                state.close_queue.push(asset);
            }
        }
        drop(state);
        if close {
            self.mark_changed();
        }
    }

    fn take_all(&self, close: bool) {
        let mut state = self.state.lock();
        let names: Vec<String> = state
            .assets
            .iter()
            .filter(|(_, asset)| !asset.is_protected())
            .map(|(name, _)| name.clone())
            .collect();
        for name in names {
            if let Some(asset) = state.assets.remove(&name) {
                if close {
                    state.close_queue.push(asset);
                }
            }
        }
        drop(state);
        if close {
            self.mark_changed();
        }
    }

    fn mark_changed(&self) {
        self.state_changed.store(true, Ordering::Release);
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, name: &str) -> Option<Arc<dyn Asset>> {
        self.state.lock().assets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.state.lock().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().assets.keys().cloned().collect();
        names.sort();
        names
    }

    /// The named font, or the library's default font if the name is not
    /// registered as a font.
    pub fn font_or_default(&self, name: &str) -> Option<Arc<dyn Asset>> {
        self.get(name)
            .filter(|asset| asset.as_font().is_some())
            .or_else(|| self.get(&self.default_font()))
    }

    /// Whether mutations are waiting for the next update.
    pub fn has_pending_changes(&self) -> bool {
        self.state_changed.load(Ordering::Acquire)
    }

    /// Number of queue flushes performed by `update`.
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Open an asset's bytes for reading.
    ///
    /// In-memory sources are read directly. Otherwise a file with the asset's
    /// name under the [local root](Self::local_root) is opened if it exists.
    /// The returned [`Closer`] is always valid, even when there is nothing to
    /// read, so callers can close unconditionally.
    pub fn get_reader(&self, name: &str) -> (Option<Box<dyn Read + Send>>, Closer) {
        if let Some(source) = self.get(name).and_then(|asset| asset.source()) {
            return (Some(Box::new(Cursor::new(source))), Closer::noop());
        }

        let path = self.local_root().join(name);
        match open_local(&path) {
            Some(file) => {
                let shared = Arc::new(Mutex::new(Some(file)));
                let reader = SharedFileReader(Arc::clone(&shared));
                let closer = Closer::new(move || {
                    shared.lock().take();
                });
                (Some(Box::new(reader)), closer)
            }
            None => (None, Closer::noop()),
        }
    }

    // =========================================================================
    // Queue processing
    // =========================================================================

    fn drain(queue: Vec<Arc<dyn Asset>>, init: bool) {
        for asset in queue.into_iter().rev() {
            if init {
                if !asset.init() {
                    tracing::warn!(target: targets::ASSET, asset = %asset.name(), "queued asset failed to initialize");
                }
            } else {
                asset.close();
            }
        }
    }

    fn flush(&self) {
        let _span = PerfSpan::new(span_names::ASSET_FLUSH);
        // Take the work under the lock, run it outside so assets may call
        // back into the library.
        let (init_queue, close_queue) = {
            let mut state = self.state.lock();
            (
                std::mem::take(&mut state.init_queue),
                std::mem::take(&mut state.close_queue),
            )
        };
        tracing::debug!(
            target: targets::ASSET,
            library = %self.name(),
            init = init_queue.len(),
            close = close_queue.len(),
            "flushing asset queues"
        );
        Self::drain(init_queue, true);
        Self::drain(close_queue, false);
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }
}

impl Object for AssetLibrary {
    fn object_base(&self) -> &ObjectBase {
        self.service.object()
    }

    /// Initialize everything queued so far, then the library itself.
    fn init(&self) -> bool {
        let init_queue = std::mem::take(&mut self.state.lock().init_queue);
        Self::drain(init_queue, true);
        self.service.object().init()
    }

    fn update(&self, _delta_time: f32) -> bool {
        if !self.service.object().update() {
            return false;
        }
        if self.state_changed.swap(false, Ordering::AcqRel) {
            self.flush();
        }
        true
    }

    /// Close queued assets and the library. A protected library stays open.
    fn close(&self) {
        if self.is_protected() {
            tracing::debug!(target: targets::ASSET, library = %self.name(), "protected library not closed");
            return;
        }
        let close_queue = std::mem::take(&mut self.state.lock().close_queue);
        Self::drain(close_queue, false);
        self.service.object().close();
    }
}

impl Service for AssetLibrary {
    fn service_base(&self) -> &ServiceBase {
        &self.service
    }
}

impl fmt::Debug for AssetLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetLibrary")
            .field("name", &self.name())
            .field("assets", &self.names())
            .field("protected", &self.is_protected())
            .field("pending", &self.has_pending_changes())
            .finish()
    }
}

fn open_local(path: &Path) -> Option<File> {
    // A missing optional file is not an error.
    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    match File::open(path) {
        Ok(file) => Some(file),
        Err(err) => {
            tracing::warn!(target: targets::ASSET, path = %path.display(), error = %err, "failed to open local asset");
            None
        }
    }
}

struct SharedFileReader(Arc<Mutex<Option<File>>>);

impl Read for SharedFileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.lock().as_mut() {
            Some(file) => file.read(buf),
            None => Err(io::Error::other("reader has been closed")),
        }
    }
}

/// Releases whatever [`AssetLibrary::get_reader`] opened.
///
/// Closing is idempotent and a closer for a missed lookup does nothing.
pub struct Closer(Option<Box<dyn FnOnce() + Send>>);

impl Closer {
    fn new(close: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(close)))
    }

    fn noop() -> Self {
        Self(None)
    }

    pub fn close(mut self) {
        if let Some(close) = self.0.take() {
            close();
        }
    }
}

impl fmt::Debug for Closer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Closer").field(&self.0.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::BinaryAsset;

    fn binary(name: &str) -> Arc<dyn Asset> {
        Arc::new(BinaryAsset::new(name, name.as_bytes().to_vec()))
    }

    #[test]
    fn test_update_requires_init() {
        let library = AssetLibrary::new("lib");
        library.add(binary("a"));
        assert!(!library.update(0.016));
        assert!(library.has_pending_changes());
    }

    #[test]
    fn test_replacement_closes_previous() {
        let library = AssetLibrary::new("lib");
        library.init();

        let first = binary("a");
        library.add(Arc::clone(&first));
        library.update(0.016);
        assert!(first.object_base().is_initialized());

        let second = binary("a");
        library.add(Arc::clone(&second));
        library.update(0.016);

        assert!(!first.object_base().is_initialized());
        assert!(second.object_base().is_initialized());
        assert!(Arc::ptr_eq(&library.get("a").unwrap(), &second));
    }

    #[test]
    fn test_queues_drain_last_in_first_out() {
        let library = AssetLibrary::new("lib");
        let order = Arc::new(Mutex::new(Vec::new()));

        struct Recorder {
            base: crate::asset::AssetBase,
            order: Arc<Mutex<Vec<String>>>,
        }
        impl Object for Recorder {
            fn object_base(&self) -> &ObjectBase {
                self.base.object()
            }
            fn init(&self) -> bool {
                self.order.lock().push(self.name().to_string());
                self.base.object().init()
            }
        }
        impl Asset for Recorder {
            fn asset_base(&self) -> &crate::asset::AssetBase {
                &self.base
            }
        }

        for name in ["material", "texture", "shader"] {
            library.add(Arc::new(Recorder {
                base: crate::asset::AssetBase::new(name),
                order: Arc::clone(&order),
            }));
        }
        library.init();
        assert_eq!(*order.lock(), vec!["shader", "texture", "material"]);
    }

    #[test]
    fn test_protected_library_refuses_close() {
        let library = AssetLibrary::new("lib");
        library.set_protected(true);
        library.init();
        library.close();
        assert!(library.object_base().is_initialized());

        library.set_protected(false);
        library.close();
        assert!(!library.object_base().is_initialized());
    }

    #[test]
    fn test_font_fallback() {
        let library = AssetLibrary::new("lib");
        assert!(library.font_or_default("missing").is_none());

        let fallback = Arc::new(crate::asset::FontAsset::new(DEFAULT_FONT, Vec::new()));
        library.add(fallback);
        library.add(binary("not-a-font"));

        let font = library.font_or_default("missing").unwrap();
        assert_eq!(&*font.name(), DEFAULT_FONT);
        let font = library.font_or_default("not-a-font").unwrap();
        assert_eq!(&*font.name(), DEFAULT_FONT);
    }
}
