//! Windows and their tick loop.
//!
//! A [`Window`] owns a surface, the services and top-level window objects
//! drawn into it, and the authoritative pointer state. Its tick loop runs on
//! a dedicated thread so that every graphics call for the window comes from
//! one thread.
//!
//! # Lifecycle
//!
//! ```text
//! Window::new --> add objects/services --> init(cancel) --> [tick loop] --> close pass
//! ```
//!
//! [`init`](Window::init) spawns the window thread and returns once the
//! surface exists and every registered service and object has been
//! initialized on that thread. The loop ends when the cancellation token
//! fires or the platform asks the window to close; either way every object
//! and service is closed before the surface is dropped.
//!
//! # Threading
//!
//! Other threads talk to a running window through thread-safe setters, the
//! readiness channel, and the deferred queues behind
//! [`add_object`](Window::add_object), [`remove_object`](Window::remove_object)
//! and [`add_service`](Window::add_service), which the window thread drains at
//! the top of its next tick. Children attached to an initialized object from
//! another thread are queued the same way.
//!
//! # Example
//!
//! ```no_run
//! use glint::render::VirtualPlatform;
//! use glint::window::{Window, WindowConfig};
//! use glint::{CancellationToken, Context};
//!
//! let ctx = Context::new(VirtualPlatform::new());
//! let window = Window::new(&ctx, WindowConfig::new("Demo").with_size(640, 480));
//!
//! let cancel = CancellationToken::new();
//! window.init(cancel.clone()).expect("window setup failed");
//! // ... run the application ...
//! cancel.cancel();
//! window.join();
//! ```

mod config;
mod input;
mod pacing;
mod transition;

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use glint_core::logging::{PerfSpan, span_names, targets};
use glint_core::{CancellationToken, ConnectionId, GlintError, Result, Signal};
use glint_render::{
    Color, FrameStats, MouseButton, Renderer, Surface, SurfaceEvent, SurfaceGeometry,
};
use parking_lot::{Mutex, RwLock};

use crate::context::Context;
use crate::service::Service;
use crate::widget::{PaintContext, WindowObject};

pub use config::WindowConfig;
pub use input::{KeyEvent, MouseState, ResizeEvent};
pub use transition::{FadeDirection, Transition};

use pacing::FramePacer;

#[derive(Default)]
struct Pending {
    add: Vec<Arc<dyn WindowObject>>,
    remove: Vec<Arc<dyn WindowObject>>,
    services: Vec<Arc<dyn Service>>,
    /// Children attached to initialized parents from other threads.
    children: Vec<Arc<dyn WindowObject>>,
}

/// A native window and the scene drawn into it.
pub struct Window {
    ctx: Arc<Context>,
    config: RwLock<WindowConfig>,
    width: AtomicU32,
    height: AtomicU32,
    framerate: AtomicU32,
    clear_color: RwLock<Color>,
    fullscreen: AtomicBool,
    fullscreen_request: Mutex<Option<bool>>,
    /// Windowed geometry to restore when leaving fullscreen.
    last_geometry: Mutex<SurfaceGeometry>,
    objects: RwLock<Vec<Arc<dyn WindowObject>>>,
    services: RwLock<Vec<Arc<dyn Service>>>,
    pending: Mutex<Pending>,
    mouse: Mutex<MouseState>,
    transition: Mutex<Option<Transition>>,
    initialized: AtomicBool,
    running: AtomicBool,
    cancel: Mutex<Option<CancellationToken>>,
    thread: Mutex<Option<JoinHandle<()>>>,
    thread_id: Mutex<Option<ThreadId>>,
    ready: Mutex<Option<Receiver<()>>>,
    this: Weak<Window>,

    /// Emitted on the window thread for every key event.
    pub key_pressed: Signal<KeyEvent>,
    /// Emitted after a resize has been propagated through the scene.
    pub resized: Signal<ResizeEvent>,
    /// Emitted on the window thread after the close pass.
    pub closed: Signal<()>,
}

impl Window {
    /// Create a window. The context's default asset library is registered as
    /// its first service.
    pub fn new(ctx: &Arc<Context>, config: WindowConfig) -> Arc<Self> {
        let (width, height) = config.size();
        let window = Arc::new_cyclic(|this| Self {
            ctx: Arc::clone(ctx),
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
            framerate: AtomicU32::new(config.framerate()),
            clear_color: RwLock::new(config.clear_color()),
            fullscreen: AtomicBool::new(false),
            fullscreen_request: Mutex::new(None),
            last_geometry: Mutex::new(SurfaceGeometry::default()),
            config: RwLock::new(config),
            objects: RwLock::new(Vec::new()),
            services: RwLock::new(Vec::new()),
            pending: Mutex::new(Pending::default()),
            mouse: Mutex::new(MouseState::default()),
            transition: Mutex::new(None),
            initialized: AtomicBool::new(false),
            running: AtomicBool::new(false),
            cancel: Mutex::new(None),
            thread: Mutex::new(None),
            thread_id: Mutex::new(None),
            ready: Mutex::new(None),
            this: this.clone(),
            key_pressed: Signal::new(),
            resized: Signal::new(),
            closed: Signal::new(),
        });
        window.add_service(ctx.assets());
        window
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.ctx
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Spawn the window thread and wait for first-time setup.
    ///
    /// On success the surface exists, every registered service and object is
    /// initialized, and the [ready channel](Self::ready) is closed.
    ///
    /// # Errors
    ///
    /// - [`GlintError::InvalidConfig`] if the configuration is invalid
    /// - [`GlintError::WindowAlreadyInitialized`] if called twice
    /// - [`GlintError::ThreadSpawn`] if the thread cannot be started
    /// - [`GlintError::SurfaceCreation`] if the platform refuses the surface
    pub fn init(self: &Arc<Self>, cancel: CancellationToken) -> Result<()> {
        self.config.read().validate()?;
        if self.initialized.swap(true, Ordering::AcqRel) {
            return Err(GlintError::WindowAlreadyInitialized);
        }

        let (ready_tx, ready_rx) = bounded::<()>(0);
        let (setup_tx, setup_rx) = bounded::<Result<()>>(1);
        *self.ready.lock() = Some(ready_rx);
        *self.cancel.lock() = Some(cancel.clone());

        let window = Arc::clone(self);
        let thread_name = format!("glint-window-{}", self.title());
        let handle = thread::Builder::new()
            .name(thread_name)
            .spawn(move || window.run(cancel, setup_tx, ready_tx))
            .map_err(|err| {
                self.initialized.store(false, Ordering::Release);
                GlintError::ThreadSpawn(err.to_string())
            })?;
        *self.thread.lock() = Some(handle);

        match setup_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                self.join();
                Err(err)
            }
            Err(_) => {
                self.join();
                Err(GlintError::SurfaceCreation(
                    "window thread exited during setup".to_string(),
                ))
            }
        }
    }

    /// Whether `init` has succeeded and the window has not shut down.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Whether the tick loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// A channel that disconnects once first-time setup is complete.
    ///
    /// Returns `None` before [`init`](Self::init).
    pub fn ready(&self) -> Option<Receiver<()>> {
        self.ready.lock().clone()
    }

    /// Block until setup completes or `timeout` elapses.
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        match self.ready() {
            Some(ready) => !matches!(ready.recv_timeout(timeout), Err(RecvTimeoutError::Timeout)),
            None => false,
        }
    }

    /// Cancel the tick loop and wait for the window thread to finish.
    pub fn close(&self) {
        if let Some(cancel) = self.cancel.lock().clone() {
            cancel.cancel();
        }
        self.join();
    }

    /// Whether the caller is running on this window's thread.
    pub fn is_window_thread(&self) -> bool {
        *self.thread_id.lock() == Some(thread::current().id())
    }

    /// Wait for the window thread to finish. Returns immediately when called
    /// from the window thread itself.
    pub fn join(&self) {
        let handle = self.thread.lock().take();
        if let Some(handle) = handle {
            if handle.thread().id() == thread::current().id() {
                *self.thread.lock() = Some(handle);
                return;
            }
            if handle.join().is_err() {
                tracing::error!(target: targets::WINDOW, "window thread panicked");
            }
        }
    }

    fn run(self: Arc<Self>, cancel: CancellationToken, setup: Sender<Result<()>>, ready: Sender<()>) {
        *self.thread_id.lock() = Some(thread::current().id());
        let surface_config = self.config.read().to_surface_config();
        let mut surface = match self.ctx.platform().create_surface(&surface_config) {
            Ok(surface) => surface,
            Err(err) => {
                tracing::error!(target: targets::WINDOW, error = %err, "failed to create window surface");
                self.initialized.store(false, Ordering::Release);
                let _ = setup.send(Err(GlintError::SurfaceCreation(err.to_string())));
                return;
            }
        };
        self.ctx.window_opened();

        let geometry = surface.geometry();
        *self.last_geometry.lock() = if surface_config.fullscreen {
            let (x, y) = surface_config.position.unwrap_or((0, 0));
            SurfaceGeometry {
                x,
                y,
                width: surface_config.width,
                height: surface_config.height,
            }
        } else {
            geometry
        };
        self.width.store(geometry.width, Ordering::Release);
        self.height.store(geometry.height, Ordering::Release);
        self.fullscreen.store(surface_config.fullscreen, Ordering::Release);

        {
            // Objects added from now on go through the pending queue.
            let _objects = self.objects.write();
            self.running.store(true, Ordering::Release);
        }
        for service in self.services() {
            if !service.init() {
                tracing::warn!(target: targets::WINDOW, service = %service.name(), "service failed to initialize");
            }
        }
        for object in self.objects() {
            if !object.init() {
                tracing::warn!(target: targets::WINDOW, object = %object.name(), "object failed to initialize");
            }
        }

        let _ = setup.send(Ok(()));
        drop(ready);
        tracing::debug!(target: targets::WINDOW, title = %surface_config.title, "window ready");

        let mut pacer = FramePacer::new(self.framerate());
        while !cancel.is_cancelled() && !surface.should_close() {
            pacer.set_framerate(self.framerate());
            let delta_time = pacer.wait(&cancel);
            if cancel.is_cancelled() {
                break;
            }

            self.apply_fullscreen_request(&mut *surface);
            self.drain_pending();
            self.tick(delta_time, surface.renderer());
            surface.swap_buffers();
            surface.poll_events(&mut |event| self.handle_event(event));
        }

        self.close_pass();
        self.running.store(false, Ordering::Release);
        drop(surface);
        self.initialized.store(false, Ordering::Release);
        self.ctx.window_closed();
        tracing::debug!(target: targets::WINDOW, title = %surface_config.title, "window closed");
        self.closed.emit(());
    }

    /// One frame: update every service and object, then draw.
    pub fn tick(&self, delta_time: f32, renderer: &mut dyn Renderer) -> FrameStats {
        let _span = tracing::trace_span!(target: targets::WINDOW, "tick", operation = span_names::TICK).entered();
        self.update(delta_time);
        self.draw(renderer, delta_time)
    }

    /// Update services, then objects, in registration order.
    pub fn update(&self, delta_time: f32) {
        for service in self.services() {
            service.update(delta_time);
        }
        for object in self.objects() {
            object.update(delta_time);
        }

        let mut transition = self.transition.lock();
        if let Some(fade) = transition.as_mut() {
            fade.advance(delta_time);
            if fade.is_finished() && fade.direction() == FadeDirection::In {
                *transition = None;
            }
        }
    }

    /// Clear, draw every object in list order, then the transition overlay.
    pub fn draw(&self, renderer: &mut dyn Renderer, delta_time: f32) -> FrameStats {
        let size = self.size();
        renderer.begin_frame(self.clear_color(), size);
        {
            let mut ctx = PaintContext::new(renderer, delta_time, size);
            for object in self.objects() {
                object.draw(&mut ctx);
            }
        }
        let overlay = *self.transition.lock();
        if let Some(fade) = overlay {
            renderer.draw_quad(&fade.quad());
        }
        renderer.end_frame()
    }

    fn close_pass(&self) {
        let _span = PerfSpan::new(span_names::CLOSE_PASS);
        let pending = std::mem::take(&mut *self.pending.lock());
        for object in self.objects() {
            object.close();
        }
        for object in pending.remove {
            object.close();
        }
        for service in self.services() {
            service.close();
        }
    }

    // =========================================================================
    // Scene
    // =========================================================================

    /// Add a top-level object.
    ///
    /// Before `init` the object is initialized with the rest of the scene.
    /// On a running window it is queued and initialized on the window thread
    /// at the top of the next tick.
    pub fn add_object(&self, object: Arc<dyn WindowObject>) {
        object.set_window(self.this.clone());
        let mut objects = self.objects.write();
        if self.is_running() {
            self.pending.lock().add.push(object);
        } else {
            objects.push(object);
        }
    }

    /// Remove and close a top-level object.
    ///
    /// On a running window removal is deferred to the window thread.
    pub fn remove_object(&self, object: &Arc<dyn WindowObject>) {
        if self.is_running() {
            self.pending.lock().remove.push(Arc::clone(object));
            return;
        }
        if self.detach(object) {
            object.close();
        }
    }

    fn detach(&self, object: &Arc<dyn WindowObject>) -> bool {
        let mut objects = self.objects.write();
        match objects.iter().position(|existing| Arc::ptr_eq(existing, object)) {
            Some(index) => {
                objects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Register a service. On a running window it is initialized on the
    /// window thread at the top of the next tick.
    pub fn add_service(&self, service: Arc<dyn Service>) {
        service.set_window(self.this.clone());
        let mut services = self.services.write();
        if self.is_running() {
            self.pending.lock().services.push(service);
        } else {
            services.push(service);
        }
    }

    /// Queue a child of an initialized object for init on the window thread.
    ///
    /// Returns `false` when the caller may initialize it directly: the window
    /// is not running, or the caller is the window thread.
    pub(crate) fn defer_child_init(&self, child: &Arc<dyn WindowObject>) -> bool {
        if !self.is_running() || self.is_window_thread() {
            return false;
        }
        tracing::trace!(target: targets::WINDOW, child = %child.name(), "deferring child init to window thread");
        self.pending.lock().children.push(Arc::clone(child));
        true
    }

    fn drain_pending(&self) {
        let pending = std::mem::take(&mut *self.pending.lock());
        for service in pending.services {
            self.services.write().push(Arc::clone(&service));
            service.init();
        }
        for object in pending.add {
            self.objects.write().push(Arc::clone(&object));
            object.init();
        }
        for child in pending.children {
            // Skip children whose parent was closed or detached them meanwhile.
            let attached = child
                .window_base()
                .parent()
                .is_some_and(|parent| parent.window_base().is_initialized());
            if attached && !child.init() {
                tracing::warn!(target: targets::WINDOW, object = %child.name(), "child failed to initialize");
            }
        }
        for object in pending.remove {
            if self.detach(&object) {
                object.close();
            }
        }
    }

    /// Snapshot of the top-level objects, in draw order.
    pub fn objects(&self) -> Vec<Arc<dyn WindowObject>> {
        self.objects.read().clone()
    }

    /// First top-level object with the given name.
    pub fn find_object(&self, name: &str) -> Option<Arc<dyn WindowObject>> {
        self.objects
            .read()
            .iter()
            .find(|object| &*object.name() == name)
            .cloned()
    }

    pub fn services(&self) -> Vec<Arc<dyn Service>> {
        self.services.read().clone()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn title(&self) -> String {
        self.config.read().title().to_string()
    }

    pub fn width(&self) -> u32 {
        self.width.load(Ordering::Acquire)
    }

    pub fn height(&self) -> u32 {
        self.height.load(Ordering::Acquire)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Apply a new size and propagate the resize through the scene.
    ///
    /// The window thread calls this when the surface reports a resize. It can
    /// also be called directly on a window that is not running.
    pub fn set_size(&self, width: u32, height: u32) {
        if self.size() == (width, height) {
            return;
        }
        self.resize_scene(width, height);
    }

    fn resize_scene(&self, width: u32, height: u32) {
        let old_width = self.width.swap(width, Ordering::AcqRel);
        let old_height = self.height.swap(height, Ordering::AcqRel);
        tracing::debug!(target: targets::WINDOW, old_width, old_height, width, height, "resizing scene");
        for object in self.objects() {
            object.resize(old_width, old_height, width, height);
        }
        self.resized.emit(ResizeEvent {
            old_width,
            old_height,
            width,
            height,
        });
    }

    /// Aspect-correct a horizontal extent: shrinks it by `height / width`
    /// when the window is wider than tall.
    pub fn scale_x(&self, value: f32) -> f32 {
        let (width, height) = self.size();
        if width > height && width > 0 {
            value * height as f32 / width as f32
        } else {
            value
        }
    }

    /// Aspect-correct a vertical extent: shrinks it by `width / height` when
    /// the window is taller than wide.
    pub fn scale_y(&self, value: f32) -> f32 {
        let (width, height) = self.size();
        if height > width && height > 0 {
            value * width as f32 / height as f32
        } else {
            value
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::Acquire)
    }

    /// Request a switch to or from fullscreen. Applied at the top of the next
    /// tick, never mid-frame.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        *self.fullscreen_request.lock() = Some(fullscreen);
    }

    pub fn toggle_fullscreen(&self) {
        self.set_fullscreen(!self.is_fullscreen());
    }

    fn apply_fullscreen_request(&self, surface: &mut dyn Surface) {
        let Some(fullscreen) = self.fullscreen_request.lock().take() else {
            return;
        };
        if fullscreen == self.is_fullscreen() {
            return;
        }

        let geometry = if fullscreen {
            let current = surface.geometry();
            *self.last_geometry.lock() = current;
            surface.set_fullscreen(true, current)
        } else {
            let last = *self.last_geometry.lock();
            surface.set_fullscreen(false, last)
        };
        tracing::debug!(target: targets::WINDOW, fullscreen, width = geometry.width, height = geometry.height, "switched display mode");
        self.resize_scene(geometry.width, geometry.height);
        self.fullscreen.store(fullscreen, Ordering::Release);
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    pub fn framerate(&self) -> u32 {
        self.framerate.load(Ordering::Acquire)
    }

    /// Change the target tick rate. Zero is ignored.
    pub fn set_framerate(&self, framerate: u32) {
        if framerate > 0 {
            self.framerate.store(framerate, Ordering::Release);
        }
    }

    pub fn clear_color(&self) -> Color {
        *self.clear_color.read()
    }

    pub fn set_clear_color(&self, color: Color) {
        *self.clear_color.write() = color;
    }

    /// Fade the scene in from `color` over `duration` seconds.
    pub fn fade_in(&self, duration: f32, color: Color) {
        *self.transition.lock() = Some(Transition::new(FadeDirection::In, duration, color));
    }

    /// Fade the scene out to `color` over `duration` seconds. The overlay
    /// stays once the fade completes.
    pub fn fade_out(&self, duration: f32, color: Color) {
        *self.transition.lock() = Some(Transition::new(FadeDirection::Out, duration, color));
    }

    pub fn transition(&self) -> Option<Transition> {
        *self.transition.lock()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// The current pointer state, in pixels.
    pub fn mouse_state(&self) -> MouseState {
        *self.mouse.lock()
    }

    /// Overwrite the pointer state. Surface input does this on the window
    /// thread; test harnesses may do it directly.
    pub fn set_mouse_state(&self, state: MouseState) {
        *self.mouse.lock() = state;
    }

    /// Connect a key handler.
    pub fn on_key<F>(&self, handler: F) -> ConnectionId
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        self.key_pressed.connect(handler)
    }

    fn handle_event(&self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::CursorMoved { x, y } => {
                let mut mouse = self.mouse.lock();
                mouse.x = x as f32;
                mouse.y = y as f32;
            }
            SurfaceEvent::MouseButton { button, pressed } => {
                let mut mouse = self.mouse.lock();
                match button {
                    MouseButton::Primary => mouse.primary_down = pressed,
                    MouseButton::Secondary => mouse.secondary_down = pressed,
                    MouseButton::Middle => {}
                }
            }
            SurfaceEvent::Key {
                key,
                scancode,
                action,
                modifiers,
            } => {
                self.key_pressed.emit(KeyEvent {
                    key,
                    scancode,
                    action,
                    modifiers,
                });
            }
            SurfaceEvent::Resized { width, height } => self.set_size(width, height),
            SurfaceEvent::CloseRequested => {
                tracing::debug!(target: targets::WINDOW, "close requested by platform");
            }
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title())
            .field("size", &self.size())
            .field("fullscreen", &self.is_fullscreen())
            .field("running", &self.is_running())
            .field("objects", &self.objects.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::VirtualPlatform;

    fn window(width: u32, height: u32) -> Arc<Window> {
        let ctx = Context::new(VirtualPlatform::new());
        Window::new(&ctx, WindowConfig::new("test").with_size(width, height))
    }

    #[test]
    fn test_aspect_correction() {
        let wide = window(2000, 1000);
        assert_eq!(wide.scale_x(0.5), 0.25);
        assert_eq!(wide.scale_y(0.5), 0.5);

        let tall = window(500, 1000);
        assert_eq!(tall.scale_x(0.5), 0.5);
        assert_eq!(tall.scale_y(0.5), 0.25);

        let square = window(800, 800);
        assert_eq!(square.scale_x(0.5), 0.5);
        assert_eq!(square.scale_y(0.5), 0.5);
    }

    #[test]
    fn test_default_library_is_first_service() {
        let w = window(100, 100);
        let services = w.services();
        assert_eq!(services.len(), 1);
        assert_eq!(&*services[0].name(), "assets");
    }

    #[test]
    fn test_set_size_emits_once_per_change() {
        let w = window(100, 100);
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = Arc::clone(&count);
        w.resized.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        w.set_size(200, 100);
        w.set_size(200, 100);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(w.size(), (200, 100));
    }

    #[test]
    fn test_not_ready_before_init() {
        let w = window(100, 100);
        assert!(w.ready().is_none());
        assert!(!w.wait_ready(Duration::from_millis(1)));
    }
}
