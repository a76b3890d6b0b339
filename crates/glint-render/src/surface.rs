//! Windowing-system glue.
//!
//! A [`Platform`] creates [`Surface`]s: native windows with a drawable area, a
//! renderer, and an input event queue. A window owns exactly one surface and
//! drives it from its own thread, so surfaces need not be `Send`; platforms
//! are shared between windows and must be.
//!
//! [`VirtualPlatform`] is a scripted platform with no native window behind
//! it. Tests push synthetic input through it and inspect what was presented.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;

use crate::error::{RenderError, RenderResult};
use crate::renderer::{DrawCommand, RecordingRenderer, Renderer};
use crate::types::Color;

/// Parameters for creating a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial position, or `None` to let the platform decide.
    pub position: Option<(i32, i32)>,
    pub fullscreen: bool,
    pub resizable: bool,
    pub vsync: bool,
}

/// Position and size of a surface, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

/// Input and window-manager events delivered by [`Surface::poll_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Pointer position in pixels, origin at the top-left corner.
    CursorMoved { x: f64, y: f64 },
    MouseButton { button: MouseButton, pressed: bool },
    Key {
        key: u32,
        scancode: i32,
        action: KeyAction,
        modifiers: Modifiers,
    },
    /// The drawable area changed size.
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// A native window with a drawable area.
pub trait Surface {
    fn geometry(&self) -> SurfaceGeometry;

    fn size(&self) -> (u32, u32) {
        let geometry = self.geometry();
        (geometry.width, geometry.height)
    }

    /// Whether the user asked the window to close.
    fn should_close(&self) -> bool;

    /// Present the frame drawn since the last swap.
    fn swap_buffers(&mut self);

    /// Deliver queued events to `handler`, oldest first.
    fn poll_events(&mut self, handler: &mut dyn FnMut(SurfaceEvent));

    /// Switch between fullscreen and windowed mode.
    ///
    /// `windowed` is where to put the window when leaving fullscreen. Returns
    /// the geometry after the switch.
    fn set_fullscreen(&mut self, fullscreen: bool, windowed: SurfaceGeometry) -> SurfaceGeometry;

    fn renderer(&mut self) -> &mut dyn Renderer;
}

/// A windowing system that creates surfaces.
pub trait Platform: Send + Sync {
    /// Create a surface. Called on the thread that will own it.
    fn create_surface(&self, config: &SurfaceConfig) -> RenderResult<Box<dyn Surface>>;

    /// Release global windowing state. Called once the last window closes.
    fn terminate(&self);
}

// ============================================================================
// Virtual platform
// ============================================================================

#[derive(Debug, Default)]
struct VirtualState {
    geometry: SurfaceGeometry,
    fullscreen: bool,
    close_requested: bool,
    frames: u64,
    last_frame: Vec<DrawCommand>,
    last_clear: Option<Color>,
    open_surfaces: usize,
}

/// A scripted platform for tests and headless tooling.
///
/// All surfaces created by one virtual platform share its event queue and
/// presented-frame state, so drive one window per platform at a time.
///
/// # Example
///
/// ```
/// use glint_render::{Platform, SurfaceConfig, VirtualPlatform};
///
/// let platform = VirtualPlatform::new();
/// let config = SurfaceConfig {
///     title: "test".into(),
///     width: 640,
///     height: 480,
///     position: None,
///     fullscreen: false,
///     resizable: true,
///     vsync: false,
/// };
/// let mut surface = platform.create_surface(&config).unwrap();
///
/// platform.move_cursor(10.0, 20.0);
/// let mut seen = Vec::new();
/// surface.poll_events(&mut |event| seen.push(event));
/// assert_eq!(seen.len(), 1);
/// ```
pub struct VirtualPlatform {
    state: Arc<Mutex<VirtualState>>,
    sender: Sender<SurfaceEvent>,
    receiver: Receiver<SurfaceEvent>,
    fail_next_surface: AtomicBool,
    terminations: AtomicUsize,
}

impl VirtualPlatform {
    /// Size of the virtual monitor that fullscreen surfaces fill.
    pub const MONITOR_SIZE: (u32, u32) = (1920, 1080);

    pub fn new() -> Arc<Self> {
        let (sender, receiver) = unbounded();
        Arc::new(Self {
            state: Arc::new(Mutex::new(VirtualState::default())),
            sender,
            receiver,
            fail_next_surface: AtomicBool::new(false),
            terminations: AtomicUsize::new(0),
        })
    }

    // =========================================================================
    // Scripted input
    // =========================================================================

    /// Queue an event for the next poll.
    pub fn send(&self, event: SurfaceEvent) {
        // The receiver lives as long as self, so sending cannot fail.
        let _ = self.sender.send(event);
    }

    pub fn move_cursor(&self, x: f64, y: f64) {
        self.send(SurfaceEvent::CursorMoved { x, y });
    }

    pub fn press(&self, button: MouseButton) {
        self.send(SurfaceEvent::MouseButton { button, pressed: true });
    }

    pub fn release(&self, button: MouseButton) {
        self.send(SurfaceEvent::MouseButton { button, pressed: false });
    }

    pub fn key(&self, key: u32, action: KeyAction) {
        self.send(SurfaceEvent::Key {
            key,
            scancode: 0,
            action,
            modifiers: Modifiers::default(),
        });
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.send(SurfaceEvent::Resized { width, height });
    }

    /// Simulate the user clicking the close button.
    pub fn request_close(&self) {
        self.send(SurfaceEvent::CloseRequested);
    }

    /// Make the next `create_surface` call fail.
    pub fn fail_next_surface(&self) {
        self.fail_next_surface.store(true, Ordering::SeqCst);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of frames presented by surfaces of this platform.
    pub fn frames_presented(&self) -> u64 {
        self.state.lock().frames
    }

    /// Draw commands of the most recently presented frame.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        self.state.lock().last_frame.clone()
    }

    /// Clear color of the most recently presented frame.
    pub fn last_clear_color(&self) -> Option<Color> {
        self.state.lock().last_clear
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.state.lock().geometry
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }

    pub fn open_surfaces(&self) -> usize {
        self.state.lock().open_surfaces
    }

    /// How many times [`Platform::terminate`] was called.
    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    /// Block until at least `count` frames have been presented.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_for_frames(&self, count: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.frames_presented() < count {
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        true
    }
}

impl Platform for VirtualPlatform {
    fn create_surface(&self, config: &SurfaceConfig) -> RenderResult<Box<dyn Surface>> {
        if self.fail_next_surface.swap(false, Ordering::SeqCst) {
            return Err(RenderError::SurfaceCreation("virtual surface refused".into()));
        }
        if config.width == 0 || config.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }

        let mut state = self.state.lock();
        let (x, y) = config.position.unwrap_or((0, 0));
        state.geometry = SurfaceGeometry {
            x,
            y,
            width: config.width,
            height: config.height,
        };
        state.fullscreen = false;
        state.close_requested = false;
        state.open_surfaces += 1;
        drop(state);

        let mut surface = VirtualSurface {
            state: Arc::clone(&self.state),
            events: self.receiver.clone(),
            renderer: RecordingRenderer::new(),
        };
        if config.fullscreen {
            let windowed = surface.geometry();
            surface.set_fullscreen(true, windowed);
        }
        tracing::debug!(target: "glint_render", title = %config.title, "created virtual surface");
        Ok(Box::new(surface))
    }

    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: "glint_render", "virtual platform terminated");
    }
}

/// A surface of the [`VirtualPlatform`].
pub struct VirtualSurface {
    state: Arc<Mutex<VirtualState>>,
    events: Receiver<SurfaceEvent>,
    renderer: RecordingRenderer,
}

impl Surface for VirtualSurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.state.lock().geometry
    }

    fn should_close(&self) -> bool {
        self.state.lock().close_requested
    }

    fn swap_buffers(&mut self) {
        let commands = self.renderer.take_commands();
        let mut state = self.state.lock();
        state.frames += 1;
        state.last_frame = commands;
        state.last_clear = self.renderer.clear_color();
    }

    fn poll_events(&mut self, handler: &mut dyn FnMut(SurfaceEvent)) {
        for event in self.events.try_iter() {
            match event {
                SurfaceEvent::Resized { width, height } => {
                    let mut state = self.state.lock();
                    state.geometry.width = width;
                    state.geometry.height = height;
                }
                SurfaceEvent::CloseRequested => self.state.lock().close_requested = true,
                _ => {}
            }
            handler(event);
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool, windowed: SurfaceGeometry) -> SurfaceGeometry {
        let mut state = self.state.lock();
        state.fullscreen = fullscreen;
        state.geometry = if fullscreen {
            let (width, height) = VirtualPlatform::MONITOR_SIZE;
            SurfaceGeometry { x: 0, y: 0, width, height }
        } else {
            windowed
        };
        state.geometry
    }

    fn renderer(&mut self) -> &mut dyn Renderer {
        &mut self.renderer
    }
}

impl Drop for VirtualSurface {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.open_surfaces = state.open_surfaces.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> SurfaceConfig {
        SurfaceConfig {
            title: "test".into(),
            width,
            height,
            position: Some((10, 20)),
            fullscreen: false,
            resizable: true,
            vsync: false,
        }
    }

    #[test]
    fn test_create_and_drop_surface() {
        let platform = VirtualPlatform::new();
        let surface = platform.create_surface(&config(640, 480)).unwrap();
        assert_eq!(surface.size(), (640, 480));
        assert_eq!(platform.geometry().x, 10);
        assert_eq!(platform.open_surfaces(), 1);

        drop(surface);
        assert_eq!(platform.open_surfaces(), 0);
    }

    #[test]
    fn test_creation_failures() {
        let platform = VirtualPlatform::new();
        assert!(matches!(
            platform.create_surface(&config(0, 480)),
            Err(RenderError::InvalidDimensions { width: 0, height: 480 })
        ));

        platform.fail_next_surface();
        assert!(platform.create_surface(&config(640, 480)).is_err());
        assert!(platform.create_surface(&config(640, 480)).is_ok());
    }

    #[test]
    fn test_poll_applies_resize_and_close() {
        let platform = VirtualPlatform::new();
        let mut surface = platform.create_surface(&config(640, 480)).unwrap();

        platform.resize(800, 600);
        platform.request_close();

        let mut events = Vec::new();
        surface.poll_events(&mut |event| events.push(event));
        assert_eq!(events.len(), 2);
        assert_eq!(surface.size(), (800, 600));
        assert!(surface.should_close());
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let platform = VirtualPlatform::new();
        let mut surface = platform.create_surface(&config(640, 480)).unwrap();
        let windowed = surface.geometry();

        let full = surface.set_fullscreen(true, windowed);
        assert_eq!((full.width, full.height), VirtualPlatform::MONITOR_SIZE);
        assert!(platform.is_fullscreen());

        let back = surface.set_fullscreen(false, windowed);
        assert_eq!(back, windowed);
        assert!(!platform.is_fullscreen());
    }

    #[test]
    fn test_swap_publishes_frame() {
        let platform = VirtualPlatform::new();
        let mut surface = platform.create_surface(&config(64, 64)).unwrap();

        let renderer = surface.renderer();
        renderer.begin_frame(Color::BLUE, (64, 64));
        renderer.draw_quad(&crate::renderer::Quad {
            transform: crate::types::Mat4::IDENTITY,
            color: Color::RED,
            blur: None,
        });
        renderer.end_frame();
        surface.swap_buffers();

        assert_eq!(platform.frames_presented(), 1);
        assert_eq!(platform.last_frame().len(), 1);
        assert_eq!(platform.last_clear_color(), Some(Color::BLUE));
    }
}
