//! Composite widgets in a headless window.

mod common;

use std::sync::Arc;

use common::{headless_window, pointer};
use glint::asset::{BinaryAsset, FontAsset, DEFAULT_FONT};
use glint::prelude::*;
use glint::render::{DrawCommand, RecordingRenderer};
use glint::widget::SceneTreeDebug;

fn frame(window: &Window) -> Vec<DrawCommand> {
    let mut renderer = RecordingRenderer::new();
    window.draw(&mut renderer, 0.016);
    renderer.take_commands()
}

#[test]
fn test_label_resolves_fonts_through_the_context() {
    let window = headless_window(800, 600);
    let assets = window.context().assets();
    assets.add(Arc::new(FontAsset::new(DEFAULT_FONT, Vec::new())));
    assets.add(Arc::new(FontAsset::new("mono", Vec::new())));
    assets.add(Arc::new(BinaryAsset::new("logo", vec![1, 2, 3])));

    let label = Label::new("title", "Hello");
    window.add_object(label.clone());
    label.init();

    let fonts: Vec<String> = ["mono", "logo", "missing"]
        .into_iter()
        .map(|font| {
            label.set_font(font);
            match frame(&window).into_iter().next() {
                Some(DrawCommand::Text(run)) => run.font,
                other => panic!("expected a text run, got {other:?}"),
            }
        })
        .collect();
    assert_eq!(fonts, vec!["mono", DEFAULT_FONT, DEFAULT_FONT]);
}

#[test]
fn test_empty_labels_draw_nothing() {
    let window = headless_window(800, 600);
    let label = Label::new("blank", "");
    window.add_object(label.clone());
    label.init();
    assert!(frame(&window).is_empty());
}

#[test]
fn test_button_background_tracks_interaction() {
    let window = headless_window(1000, 1000);
    let button = Button::new("ok", "OK");
    button.window_base().set_scale(Vec3::new(0.2, 0.2, 1.0));
    window.add_object(button.clone());
    button.init();
    let colors = button.colors();

    let background = |window: &Window| frame(window)[0].color();
    assert_eq!(background(&window), colors.normal);

    window.set_mouse_state(pointer(&window, 0.0, 0.0, false));
    window.update(0.016);
    assert_eq!(background(&window), colors.hover);

    window.set_mouse_state(pointer(&window, 0.0, 0.0, true));
    window.update(0.016);
    assert_eq!(background(&window), colors.pressed);
}

#[test]
fn test_tab_group_switches_on_click() {
    let window = headless_window(1000, 1000);
    let tabs = TabGroup::new("tabs");
    let first = tabs.add_tab("General");
    let second = tabs.add_tab("Advanced");
    second.add_child(Shape::rectangle("advanced.content"));
    window.add_object(tabs.clone());
    tabs.init();

    // The second tab button covers the right half of the bar.
    for down in [false, true, false] {
        window.set_mouse_state(pointer(&window, 0.5, 0.9, down));
        window.update(0.016);
    }

    assert_eq!(tabs.active(), 1);
    assert!(!first.window_base().is_visible());
    assert!(second.window_base().is_visible());
}

#[test]
fn test_signal_group_shares_its_range() {
    let group = SignalGroup::new("metrics", 16);
    let cpu = group.add_line("cpu", Color::GREEN);
    group.set_range(0.0, 100.0);
    let memory = group.add_line("memory", Color::RED);

    assert_eq!(cpu.range(), (0.0, 100.0));
    assert_eq!(memory.range(), (0.0, 100.0));
    assert_eq!(cpu.capacity(), 16);
    assert!(group.line("memory").is_some());
    assert_eq!(group.window_base().child_count(), 2);
}

#[test]
fn test_hidden_subtrees_are_skipped() {
    let window = headless_window(800, 600);
    let view = View::with_color("panel", Color::GRAY);
    view.add_child(Shape::ellipse("dot"));
    window.add_object(view.clone());
    view.init();
    assert_eq!(frame(&window).len(), 2);

    view.window_base().set_visible(false);
    assert!(frame(&window).is_empty());
}

#[test]
fn test_scene_tree_lists_the_window() {
    let window = headless_window(800, 600);
    let panel = View::new("panel");
    panel.window_base().set_anchor(Anchor::Center);
    panel.add_child(CheckButton::new("agree"));
    window.add_object(panel);
    window.add_object(Slider::new("volume", 0.0, 1.0));

    let listing = SceneTreeDebug::window(&window).to_string();
    assert_eq!(
        listing,
        "panel (View) anchor=Center\n  agree (CheckButton)\n    agree.hitbox (BoundingBox)\nvolume (Slider)\n  volume.hitbox (BoundingBox)\n"
    );
}
