//! The process-wide registry shared by windows.
//!
//! A [`Context`] owns what would otherwise be global state: the windowing
//! platform, the default asset library, and the count of open windows. The
//! platform is terminated when the last open window closes.

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use glint_core::logging::targets;
use glint_render::Platform;
use parking_lot::Mutex;

use crate::asset::AssetLibrary;

/// Shared state for every window of an application.
///
/// # Example
///
/// ```
/// use glint::Context;
/// use glint::render::VirtualPlatform;
///
/// let ctx = Context::new(VirtualPlatform::new());
/// assert!(!ctx.has_assets());
///
/// let assets = ctx.assets();
/// assert!(assets.is_protected());
/// assert!(ctx.has_assets());
/// ```
pub struct Context {
    platform: Arc<dyn Platform>,
    assets: OnceLock<Arc<AssetLibrary>>,
    open_windows: Mutex<usize>,
}

impl Context {
    pub fn new(platform: Arc<dyn Platform>) -> Arc<Self> {
        Arc::new(Self {
            platform,
            assets: OnceLock::new(),
            open_windows: Mutex::new(0),
        })
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    /// The default asset library, created on first use.
    ///
    /// The library is protected: windows sharing it never close it.
    pub fn assets(&self) -> Arc<AssetLibrary> {
        let library = self.assets.get_or_init(|| {
            let library = AssetLibrary::new("assets");
            library.set_protected(true);
            tracing::debug!(target: targets::ASSET, "created default asset library");
            Arc::new(library)
        });
        Arc::clone(library)
    }

    /// Whether the default asset library has been created.
    pub fn has_assets(&self) -> bool {
        self.assets.get().is_some()
    }

    pub fn open_windows(&self) -> usize {
        *self.open_windows.lock()
    }

    pub(crate) fn window_opened(&self) {
        *self.open_windows.lock() += 1;
    }

    pub(crate) fn window_closed(&self) {
        let mut open = self.open_windows.lock();
        *open = open.saturating_sub(1);
        if *open == 0 {
            tracing::debug!(target: targets::WINDOW, "last window closed, terminating platform");
            self.platform.terminate();
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("has_assets", &self.has_assets())
            .field("open_windows", &self.open_windows())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::VirtualPlatform;

    #[test]
    fn test_assets_created_once() {
        let ctx = Context::new(VirtualPlatform::new());
        assert!(!ctx.has_assets());
        let a = ctx.assets();
        assert!(ctx.has_assets());
        let b = ctx.assets();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_platform_terminated_with_last_window() {
        let platform = VirtualPlatform::new();
        let ctx = Context::new(platform.clone());

        ctx.window_opened();
        ctx.window_opened();
        ctx.window_closed();
        assert_eq!(platform.terminations(), 0);

        ctx.window_closed();
        assert_eq!(platform.terminations(), 1);
        assert_eq!(ctx.open_windows(), 0);
    }
}
