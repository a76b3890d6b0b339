//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glint::render::VirtualPlatform;
use glint::widget::{MouseEventKind, MouseEvents};
use glint::window::{MouseState, Window, WindowConfig};
use glint::Context;
use parking_lot::Mutex;

pub const ALL_MOUSE_EVENTS: [MouseEventKind; 10] = [
    MouseEventKind::Enter,
    MouseEventKind::Leave,
    MouseEventKind::PrimaryDown,
    MouseEventKind::PrimaryUp,
    MouseEventKind::PrimaryClick,
    MouseEventKind::PrimaryDepressed,
    MouseEventKind::SecondaryDown,
    MouseEventKind::SecondaryUp,
    MouseEventKind::SecondaryClick,
    MouseEventKind::SecondaryDepressed,
];

pub fn setup() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Pause after scripted input. CI runners are slower, so wait longer there.
pub fn input_delay() -> Duration {
    if env::var_os("GITHUB_ACTIONS").is_some() {
        Duration::from_millis(250)
    } else {
        Duration::from_millis(25)
    }
}

pub fn timeout() -> Duration {
    if env::var_os("GITHUB_ACTIONS").is_some() {
        Duration::from_secs(30)
    } else {
        Duration::from_secs(5)
    }
}

/// A window that is never initialized; tests drive `update` and `draw`
/// themselves.
pub fn headless_window(width: u32, height: u32) -> Arc<Window> {
    let ctx = Context::new(VirtualPlatform::new());
    Window::new(&ctx, WindowConfig::new("headless").with_size(width, height))
}

/// A fast-ticking window on a fresh virtual platform.
pub fn virtual_window(width: u32, height: u32) -> (Arc<Window>, Arc<VirtualPlatform>) {
    let platform = VirtualPlatform::new();
    let ctx = Context::new(platform.clone());
    let config = WindowConfig::new("test")
        .with_size(width, height)
        .with_framerate(240);
    (Window::new(&ctx, config), platform)
}

/// Pixel position of a point in normalized window space.
pub fn pixel(window: &Window, x: f32, y: f32) -> (f32, f32) {
    let (width, height) = window.size();
    (
        (x + 1.0) / 2.0 * width as f32,
        (1.0 - y) / 2.0 * height as f32,
    )
}

/// Pointer state at a point in normalized window space.
pub fn pointer(window: &Window, x: f32, y: f32, primary_down: bool) -> MouseState {
    let (px, py) = pixel(window, x, y);
    MouseState::at(px, py).with_primary(primary_down)
}

/// Record every mouse event raised on `events`, in order.
pub fn record(events: &MouseEvents) -> Arc<Mutex<Vec<MouseEventKind>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for kind in ALL_MOUSE_EVENTS {
        let log = Arc::clone(&log);
        events.signal(kind).connect(move |_| log.lock().push(kind));
    }
    log
}

/// Let the window thread present `frames` more frames, then pause.
pub fn settle(platform: &VirtualPlatform, frames: u64) {
    let target = platform.frames_presented() + frames;
    assert!(
        platform.wait_for_frames(target, timeout()),
        "window did not present {frames} frames in time"
    );
    thread::sleep(input_delay());
}

/// Poll `condition` until it holds or the timeout expires.
pub fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout();
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
