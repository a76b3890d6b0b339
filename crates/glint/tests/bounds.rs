//! Pointer hit-testing driven through a headless window.

mod common;

use std::sync::Arc;

use common::{headless_window, pointer, record};
use glint::prelude::*;
use glint::widget::MouseEventKind::*;
use parking_lot::Mutex;

fn hitbox_at_origin(window: &Window, scale: f32) -> Arc<BoundingBox> {
    let hitbox = BoundingBox::new("hitbox");
    hitbox.window_base().set_scale(Vec3::new(scale, scale, 1.0));
    window.add_object(hitbox.clone());
    hitbox.init();
    hitbox
}

#[test]
fn test_enter_and_leave_fire_once_per_crossing() {
    common::setup();
    let window = headless_window(1000, 1000);
    let hitbox = hitbox_at_origin(&window, 0.25);
    let log = record(hitbox.events());

    for (x, y) in [(0.5, 0.5), (0.0, 0.0), (0.1, 0.1), (0.5, 0.5), (0.6, -0.6)] {
        window.set_mouse_state(pointer(&window, x, y, false));
        window.update(0.016);
    }

    assert_eq!(*log.lock(), vec![Enter, Leave]);
}

#[test]
fn test_press_drag_out_and_release_does_not_click() {
    let window = headless_window(1000, 1000);
    let hitbox = hitbox_at_origin(&window, 0.25);
    let log = record(hitbox.events());

    let steps = [
        (0.0, false), // enter
        (0.0, true),  // press
        (0.5, true),  // drag out, still held
        (0.6, true),
        (0.6, false), // release outside
    ];
    for (x, down) in steps {
        window.set_mouse_state(pointer(&window, x, 0.0, down));
        window.update(0.016);
    }

    assert_eq!(
        *log.lock(),
        vec![Enter, PrimaryDown, Leave, PrimaryDepressed, PrimaryDepressed, PrimaryUp]
    );
}

#[test]
fn test_zero_sized_object_is_inert() {
    let window = headless_window(800, 600);
    let hitbox = hitbox_at_origin(&window, 0.0);
    let log = record(hitbox.events());

    for down in [false, true, false] {
        window.set_mouse_state(pointer(&window, 0.0, 0.0, down));
        window.update(0.016);
    }

    assert!(log.lock().is_empty());
    assert!(!hitbox.is_mouse_over());
}

#[test]
fn test_radius_excludes_corners() {
    let window = headless_window(1000, 1000);
    let circle = BoundingRadius::new("circle");
    circle.window_base().set_scale(Vec3::new(0.25, 0.25, 1.0));
    window.add_object(circle.clone());
    circle.init();
    let rect = hitbox_at_origin(&window, 0.25);

    window.set_mouse_state(pointer(&window, 0.2, 0.2, false));
    window.update(0.016);
    assert!(rect.is_mouse_over());
    assert!(!circle.is_mouse_over());

    window.set_mouse_state(pointer(&window, 0.0, 0.2, false));
    window.update(0.016);
    assert!(circle.is_mouse_over());
}

#[test]
fn test_aspect_ratio_narrows_the_hit_area() {
    let window = headless_window(2000, 1000);
    let hitbox = BoundingBox::new("hitbox");
    hitbox.window_base().set_scale(Vec3::new(0.5, 0.5, 1.0));
    hitbox.window_base().set_maintain_aspect_ratio(true);
    window.add_object(hitbox.clone());
    hitbox.init();

    window.set_mouse_state(pointer(&window, 0.3, 0.0, false));
    window.update(0.016);
    assert!(!hitbox.is_mouse_over());

    window.set_mouse_state(pointer(&window, 0.2, 0.0, false));
    window.update(0.016);
    assert!(hitbox.is_mouse_over());
}

#[test]
fn test_local_coordinates_follow_the_object() {
    let window = headless_window(1000, 1000);
    let hitbox = hitbox_at_origin(&window, 0.5);
    hitbox.window_base().set_position(Vec3::new(0.5, 0.0, 0.0));

    window.set_mouse_state(pointer(&window, 0.75, 0.25, false));
    window.update(0.016);

    let local = hitbox.bounds().local_mouse();
    assert!(common::approx_eq(local.x, 0.5));
    assert!(common::approx_eq(local.y, 0.5));
}

#[test]
fn test_button_clicks_name_the_button() {
    let window = headless_window(1000, 1000);
    let button = Button::new("ok", "OK");
    button.window_base().set_scale(Vec3::new(0.25, 0.1, 1.0));
    window.add_object(button.clone());
    button.init();

    let senders = Arc::new(Mutex::new(Vec::new()));
    let senders_clone = Arc::clone(&senders);
    button.on_click(move |args| senders_clone.lock().push(args.sender.name().to_string()));

    for down in [false, true, false] {
        window.set_mouse_state(pointer(&window, 0.0, 0.0, down));
        window.update(0.016);
    }

    assert_eq!(*senders.lock(), vec!["ok".to_string()]);
}

#[test]
fn test_check_button_toggles_on_click() {
    let window = headless_window(1000, 1000);
    let check = CheckButton::new("agree");
    check.window_base().set_scale(Vec3::new(0.1, 0.1, 1.0));
    window.add_object(check.clone());
    check.init();

    let states = Arc::new(Mutex::new(Vec::new()));
    let states_clone = Arc::clone(&states);
    check.checked_changed.connect(move |checked| states_clone.lock().push(*checked));

    for _ in 0..2 {
        for down in [true, false] {
            window.set_mouse_state(pointer(&window, 0.0, 0.0, down));
            window.update(0.016);
        }
    }

    assert_eq!(*states.lock(), vec![true, false]);
    assert!(!check.is_checked());
}

#[test]
fn test_slider_follows_a_held_pointer() {
    let window = headless_window(1000, 1000);
    let slider = Slider::new("volume", 0.0, 100.0);
    slider.window_base().set_scale(Vec3::new(0.5, 0.1, 1.0));
    window.add_object(slider.clone());
    slider.init();

    window.set_mouse_state(pointer(&window, 0.0, 0.0, false));
    window.update(0.016);
    window.set_mouse_state(pointer(&window, 0.0, 0.0, true));
    window.update(0.016);
    assert!(common::approx_eq(slider.value(), 50.0));

    // Dragging past the end keeps the press and pins the value.
    window.set_mouse_state(pointer(&window, 0.9, 0.0, true));
    window.update(0.016);
    assert!(common::approx_eq(slider.value(), 100.0));
}

#[test]
fn test_disabled_objects_do_not_hit_test() {
    let window = headless_window(1000, 1000);
    let hitbox = hitbox_at_origin(&window, 0.25);
    hitbox.window_base().set_enabled(false);
    let log = record(hitbox.events());

    window.set_mouse_state(pointer(&window, 0.0, 0.0, false));
    window.update(0.016);
    assert!(log.lock().is_empty());
}
