//! Pointer hit-testing.
//!
//! A bounding object reads the window's pointer once per update, tests it
//! against its own extent, and raises mouse events from the difference
//! between this sample and the previous one. Two shapes are provided:
//! [`BoundingBox`] (axis-aligned rectangle) and [`BoundingRadius`] (ellipse
//! inscribed in the same rectangle).
//!
//! # Events
//!
//! | Event               | Fires when                                              |
//! |---------------------|---------------------------------------------------------|
//! | `enter` / `leave`   | the pointer crosses the edge, once per crossing         |
//! | `*_down`            | the button is pressed while over the object             |
//! | `*_up`              | a press that started here ends, over the object or not  |
//! | `*_click`           | a press that started here ends over the object          |
//! | `*_depressed`       | every update while a press that started here is held    |
//!
//! A held press survives the pointer leaving, so press, drag out and release
//! yields `down`, `depressed`..., `up` and no `click`.
//!
//! Handlers receive the object's parent as sender when it has one. Composite
//! widgets embed a bounding object as a child so that their events appear to
//! come from the widget itself.

use std::fmt;
use std::sync::{Arc, Weak};

use glint_core::logging::targets;
use glint_core::{Object, ObjectBase, Signal};
use glint_render::{Vec2, Vec3};
use parking_lot::Mutex;

use super::object::{WindowObject, WindowObjectBase};
use super::paint::PaintContext;
use crate::window::MouseState;

/// Which mouse event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Enter,
    Leave,
    PrimaryDown,
    PrimaryUp,
    PrimaryClick,
    PrimaryDepressed,
    SecondaryDown,
    SecondaryUp,
    SecondaryClick,
    SecondaryDepressed,
}

/// Payload passed to mouse event handlers.
#[derive(Clone)]
pub struct MouseEventArgs {
    /// The bounding object's parent, or the bounding object itself.
    pub sender: Arc<dyn WindowObject>,
    /// Pointer state in the object's local space: `[-1, 1]` across the
    /// object with +y up. The button flags are the object's own press state.
    pub mouse: MouseState,
}

impl fmt::Debug for MouseEventArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseEventArgs")
            .field("sender", &self.sender.name())
            .field("mouse", &self.mouse)
            .finish()
    }
}

/// The ten mouse event handler lists of a bounding object.
#[derive(Default)]
pub struct MouseEvents {
    pub enter: Signal<MouseEventArgs>,
    pub leave: Signal<MouseEventArgs>,
    pub primary_down: Signal<MouseEventArgs>,
    pub primary_up: Signal<MouseEventArgs>,
    pub primary_click: Signal<MouseEventArgs>,
    pub primary_depressed: Signal<MouseEventArgs>,
    pub secondary_down: Signal<MouseEventArgs>,
    pub secondary_up: Signal<MouseEventArgs>,
    pub secondary_click: Signal<MouseEventArgs>,
    pub secondary_depressed: Signal<MouseEventArgs>,
}

impl MouseEvents {
    pub fn signal(&self, kind: MouseEventKind) -> &Signal<MouseEventArgs> {
        match kind {
            MouseEventKind::Enter => &self.enter,
            MouseEventKind::Leave => &self.leave,
            MouseEventKind::PrimaryDown => &self.primary_down,
            MouseEventKind::PrimaryUp => &self.primary_up,
            MouseEventKind::PrimaryClick => &self.primary_click,
            MouseEventKind::PrimaryDepressed => &self.primary_depressed,
            MouseEventKind::SecondaryDown => &self.secondary_down,
            MouseEventKind::SecondaryUp => &self.secondary_up,
            MouseEventKind::SecondaryClick => &self.secondary_click,
            MouseEventKind::SecondaryDepressed => &self.secondary_depressed,
        }
    }
}

/// One update's pointer sample, in normalized window space.
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    /// The window's pointer state, in pixels.
    pub window_mouse: MouseState,
    /// The pointer in normalized window space.
    pub pointer: Vec2,
    pub position: Vec3,
    /// Aspect-corrected half extent.
    pub half_size: Vec2,
}

impl PointerSample {
    /// The pointer relative to the object, `[-1, 1]` across its extent.
    pub fn local(&self) -> Vec2 {
        Vec2::new(
            (self.pointer.x - self.position.x) / self.half_size.x,
            (self.pointer.y - self.position.y) / self.half_size.y,
        )
    }
}

#[derive(Debug, Default)]
struct BoundsState {
    mouse_over: bool,
    local: MouseState,
    /// The window's pointer state at the previous update.
    window_mouse: MouseState,
}

struct ButtonEvents {
    down: MouseEventKind,
    up: MouseEventKind,
    click: MouseEventKind,
    depressed: MouseEventKind,
}

const PRIMARY: ButtonEvents = ButtonEvents {
    down: MouseEventKind::PrimaryDown,
    up: MouseEventKind::PrimaryUp,
    click: MouseEventKind::PrimaryClick,
    depressed: MouseEventKind::PrimaryDepressed,
};

const SECONDARY: ButtonEvents = ButtonEvents {
    down: MouseEventKind::SecondaryDown,
    up: MouseEventKind::SecondaryUp,
    click: MouseEventKind::SecondaryClick,
    depressed: MouseEventKind::SecondaryDepressed,
};

fn step_button(
    down: &mut bool,
    over: bool,
    window_down: bool,
    was_window_down: bool,
    events: &ButtonEvents,
    fired: &mut Vec<MouseEventKind>,
) {
    if !*down && over && window_down && !was_window_down {
        *down = true;
        fired.push(events.down);
    } else if *down && over && !window_down {
        *down = false;
        fired.push(events.up);
        fired.push(events.click);
    } else if *down && !over && !window_down {
        *down = false;
        fired.push(events.up);
    } else if *down && window_down {
        fired.push(events.depressed);
    }
}

/// State shared by [`BoundingBox`] and [`BoundingRadius`].
pub struct BoundingObjectBase {
    window_base: WindowObjectBase,
    state: Mutex<BoundsState>,
    events: MouseEvents,
}

impl BoundingObjectBase {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            window_base: WindowObjectBase::new(name),
            state: Mutex::new(BoundsState::default()),
            events: MouseEvents::default(),
        }
    }

    pub fn window_base(&self) -> &WindowObjectBase {
        &self.window_base
    }

    pub fn events(&self) -> &MouseEvents {
        &self.events
    }

    pub fn is_mouse_over(&self) -> bool {
        self.state.lock().mouse_over
    }

    /// The last local pointer sample and this object's press state.
    pub fn local_mouse(&self) -> MouseState {
        self.state.lock().local
    }

    /// Sample the window pointer against this object.
    ///
    /// Returns `None` without a window, with a zero-sized window, or when
    /// either half extent is zero. The extent is recomputed on every call
    /// since aspect correction follows the live window size.
    pub fn begin_update(&self) -> Option<PointerSample> {
        let window = self.window_base.window()?;
        let half_size = self.window_base.half_size_in(&window);
        if half_size.x == 0.0 || half_size.y == 0.0 {
            return None;
        }
        let (width, height) = window.size();
        if width == 0 || height == 0 {
            return None;
        }

        let window_mouse = window.mouse_state();
        let pointer = Vec2::new(
            window_mouse.x / width as f32 * 2.0 - 1.0,
            -(window_mouse.y / height as f32 * 2.0 - 1.0),
        );
        Some(PointerSample {
            window_mouse,
            pointer,
            position: self.window_base.world_position(),
            half_size,
        })
    }

    /// Advance the event state machine with one sample and emit the
    /// resulting events. Returns the kinds fired, in emission order.
    pub fn end_update(&self, window_mouse: MouseState, mouse_over: bool, local: Vec2) -> Vec<MouseEventKind> {
        let (fired, local_mouse) = {
            let mut state = self.state.lock();
            let mut fired = Vec::new();

            if mouse_over != state.mouse_over {
                state.mouse_over = mouse_over;
                fired.push(if mouse_over {
                    MouseEventKind::Enter
                } else {
                    MouseEventKind::Leave
                });
            }

            let previous = state.window_mouse;
            step_button(
                &mut state.local.primary_down,
                mouse_over,
                window_mouse.primary_down,
                previous.primary_down,
                &PRIMARY,
                &mut fired,
            );
            step_button(
                &mut state.local.secondary_down,
                mouse_over,
                window_mouse.secondary_down,
                previous.secondary_down,
                &SECONDARY,
                &mut fired,
            );

            state.local.x = local.x;
            state.local.y = local.y;
            state.window_mouse = window_mouse;
            (fired, state.local)
        };

        if !fired.is_empty() {
            self.emit(&fired, local_mouse);
        }
        fired
    }

    fn emit(&self, fired: &[MouseEventKind], mouse: MouseState) {
        let Some(sender) = self.window_base.parent().or_else(|| self.window_base.this()) else {
            tracing::trace!(target: targets::BOUNDS, object = %self.window_base.name(), "unbound object, dropping mouse events");
            return;
        };
        tracing::trace!(target: targets::BOUNDS, object = %self.window_base.name(), ?fired, "mouse events");
        let args = MouseEventArgs { sender, mouse };
        for kind in fired {
            self.events.signal(*kind).emit_ref(&args);
        }
    }

    /// One hit-test pass using `contains` on the local pointer.
    pub fn hit_test(&self, contains: impl Fn(Vec2) -> bool) {
        let Some(sample) = self.begin_update() else {
            return;
        };
        let local = sample.local();
        self.end_update(sample.window_mouse, contains(local), local);
    }
}

/// A window object that raises mouse events for its extent.
pub trait BoundingObject: WindowObject {
    fn bounds_base(&self) -> &BoundingObjectBase;

    /// Whether a local point, `[-1, 1]` across the object, is inside.
    fn contains(&self, local: Vec2) -> bool;

    fn events(&self) -> &MouseEvents {
        self.bounds_base().events()
    }

    fn is_mouse_over(&self) -> bool {
        self.bounds_base().is_mouse_over()
    }
}

macro_rules! bounding_shape {
    ($(#[$meta:meta])* $name:ident, |$local:ident| $contains:expr) => {
        $(#[$meta])*
        pub struct $name {
            bounds: BoundingObjectBase,
        }

        impl $name {
            pub fn new(name: impl Into<Arc<str>>) -> Arc<Self> {
                Arc::new_cyclic(|this: &Weak<Self>| {
                    let bounds = BoundingObjectBase::new(name);
                    bounds.window_base().bind(this.clone());
                    Self { bounds }
                })
            }

            pub fn bounds(&self) -> &BoundingObjectBase {
                &self.bounds
            }
        }

        impl Object for $name {
            fn object_base(&self) -> &ObjectBase {
                self.bounds.window_base().object()
            }

            fn init(&self) -> bool {
                self.bounds.window_base().init_tree()
            }

            fn update(&self, delta_time: f32) -> bool {
                let base = self.bounds.window_base();
                if !base.object().update() {
                    return false;
                }
                self.bounds.hit_test(|local| self.contains(local));
                base.update_tree(delta_time)
            }

            fn close(&self) {
                self.bounds.window_base().close_tree()
            }
        }

        impl WindowObject for $name {
            fn window_base(&self) -> &WindowObjectBase {
                self.bounds.window_base()
            }

            fn draw(&self, ctx: &mut PaintContext<'_>) {
                let base = self.bounds.window_base();
                if base.can_draw() {
                    base.draw_children(ctx);
                }
            }
        }

        impl BoundingObject for $name {
            fn bounds_base(&self) -> &BoundingObjectBase {
                &self.bounds
            }

            fn contains(&self, $local: Vec2) -> bool {
                $contains
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.bounds.window_base().name())
                    .field("mouse_over", &self.bounds.is_mouse_over())
                    .finish()
            }
        }
    };
}

bounding_shape!(
    /// Rectangular hit area covering the object's extent.
    BoundingBox,
    |local| local.x.abs() <= 1.0 && local.y.abs() <= 1.0
);

bounding_shape!(
    /// Elliptical hit area inscribed in the object's extent.
    BoundingRadius,
    |local| local.length_squared() <= 1.0
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use super::MouseEventKind::*;

    fn up() -> MouseState {
        MouseState::default()
    }

    fn pressed() -> MouseState {
        MouseState::default().with_primary(true)
    }

    #[test]
    fn test_enter_and_leave_fire_on_edges_only() {
        let hitbox = BoundingBox::new("hitbox");
        let bounds = hitbox.bounds();

        assert!(bounds.end_update(up(), false, Vec2::ZERO).is_empty());
        assert_eq!(bounds.end_update(up(), true, Vec2::ZERO), vec![Enter]);
        assert!(bounds.end_update(up(), true, Vec2::ZERO).is_empty());
        assert_eq!(bounds.end_update(up(), false, Vec2::ZERO), vec![Leave]);
        assert!(bounds.end_update(up(), false, Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_click_inside() {
        let hitbox = BoundingBox::new("hitbox");
        let bounds = hitbox.bounds();

        bounds.end_update(up(), true, Vec2::ZERO);
        assert_eq!(bounds.end_update(pressed(), true, Vec2::ZERO), vec![PrimaryDown]);
        assert_eq!(bounds.end_update(pressed(), true, Vec2::ZERO), vec![PrimaryDepressed]);
        assert_eq!(
            bounds.end_update(up(), true, Vec2::ZERO),
            vec![PrimaryUp, PrimaryClick]
        );
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let hitbox = BoundingBox::new("hitbox");
        let bounds = hitbox.bounds();

        bounds.end_update(up(), true, Vec2::ZERO);
        bounds.end_update(pressed(), true, Vec2::ZERO);
        assert_eq!(
            bounds.end_update(pressed(), false, Vec2::ZERO),
            vec![Leave, PrimaryDepressed]
        );
        assert_eq!(bounds.end_update(pressed(), false, Vec2::ZERO), vec![PrimaryDepressed]);
        assert_eq!(bounds.end_update(up(), false, Vec2::ZERO), vec![PrimaryUp]);
    }

    #[test]
    fn test_drag_in_while_held_does_not_press() {
        let hitbox = BoundingBox::new("hitbox");
        let bounds = hitbox.bounds();

        bounds.end_update(pressed(), false, Vec2::ZERO);
        assert_eq!(bounds.end_update(pressed(), true, Vec2::ZERO), vec![Enter]);
        assert!(bounds.end_update(up(), true, Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_secondary_button_is_independent() {
        let hitbox = BoundingRadius::new("hitbox");
        let bounds = hitbox.bounds();
        let both = MouseState::default().with_primary(true).with_secondary(true);

        bounds.end_update(up(), true, Vec2::ZERO);
        assert_eq!(
            bounds.end_update(both, true, Vec2::ZERO),
            vec![PrimaryDown, SecondaryDown]
        );
        assert_eq!(
            bounds.end_update(pressed(), true, Vec2::ZERO),
            vec![PrimaryDepressed, SecondaryUp, SecondaryClick]
        );
    }

    #[test]
    fn test_sender_is_self_without_parent() {
        let hitbox = BoundingBox::new("hitbox");
        let entered = Arc::new(AtomicU32::new(0));
        let entered_clone = Arc::clone(&entered);
        hitbox.events().enter.connect(move |args| {
            assert_eq!(&*args.sender.name(), "hitbox");
            assert_eq!(args.mouse.x, 0.5);
            entered_clone.fetch_add(1, Ordering::SeqCst);
        });

        hitbox.bounds().end_update(up(), true, Vec2::new(0.5, -0.5));
        assert_eq!(entered.load(Ordering::SeqCst), 1);
        assert_eq!(hitbox.bounds().local_mouse().y, -0.5);
    }

    #[test]
    fn test_shapes() {
        let rect = BoundingBox::new("rect");
        let circle = BoundingRadius::new("circle");
        let corner = Vec2::new(0.9, 0.9);

        assert!(rect.contains(corner));
        assert!(!circle.contains(corner));
        assert!(circle.contains(Vec2::new(0.0, 1.0)));
        assert!(!rect.contains(Vec2::new(1.1, 0.0)));
    }

    #[test]
    fn test_no_sample_without_window() {
        let hitbox = BoundingBox::new("hitbox");
        assert!(hitbox.bounds().begin_update().is_none());
    }
}
