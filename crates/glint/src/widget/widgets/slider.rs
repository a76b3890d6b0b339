//! Horizontal value sliders.

use std::sync::{Arc, Weak};

use glint_core::Signal;
use glint_core::logging::targets;
use glint_render::{Color, Mat4, Quad, Vec3};
use parking_lot::RwLock;

use crate::widget::{
    BoundingBox, BoundingObject, MouseEventArgs, MouseEvents, PaintContext, WindowObject,
    WindowObjectBase,
};

/// Handle width as a fraction of the track.
const HANDLE_WIDTH: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
struct SliderState {
    min: f32,
    max: f32,
    step: f32,
    value: f32,
}

impl SliderState {
    fn snap(&self, value: f32) -> f32 {
        let mut value = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            value = self.min + ((value - self.min) / self.step).round() * self.step;
            value = value.clamp(self.min, self.max);
        }
        value
    }

    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }
}

/// A track with a handle; pressing or dragging on the track sets the value
/// from the pointer's horizontal position.
#[derive(Debug)]
pub struct Slider {
    base: WindowObjectBase,
    hitbox: Arc<BoundingBox>,
    state: RwLock<SliderState>,
    handle_color: RwLock<Color>,

    /// Emitted with the new value whenever it changes.
    pub value_changed: Signal<f32>,
}

impl Slider {
    /// Create a slider over `[min, max]` starting at `min`.
    pub fn new(name: impl Into<Arc<str>>, min: f32, max: f32) -> Arc<Self> {
        let name = name.into();
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(Arc::clone(&name));
            base.bind(this.clone());
            base.set_color(Color::LIGHT_GRAY);

            let hitbox = BoundingBox::new(format!("{name}.hitbox"));
            for signal in [&hitbox.events().primary_down, &hitbox.events().primary_depressed] {
                let weak = this.clone();
                signal.connect(move |args: &MouseEventArgs| {
                    if let Some(slider) = weak.upgrade() {
                        slider.set_from_local_x(args.mouse.x);
                    }
                });
            }
            base.add_child(hitbox.clone());

            Self {
                base,
                hitbox,
                state: RwLock::new(SliderState {
                    min,
                    max,
                    step: 0.0,
                    value: min,
                }),
                handle_color: RwLock::new(Color::DARK_GRAY),
                value_changed: Signal::new(),
            }
        })
    }

    pub fn value(&self) -> f32 {
        self.state.read().value
    }

    /// Set the value, clamped to the range and snapped to the step.
    /// Emits `value_changed` if the stored value changes.
    pub fn set_value(&self, value: f32) {
        let changed = {
            let mut state = self.state.write();
            let snapped = state.snap(value);
            let changed = snapped != state.value;
            state.value = snapped;
            changed.then_some(snapped)
        };
        if let Some(value) = changed {
            tracing::trace!(target: targets::OBJECT, slider = %self.base.name(), value, "slider value changed");
            self.value_changed.emit(value);
        }
    }

    /// Set the value from a local x coordinate in `[-1, 1]`.
    pub fn set_from_local_x(&self, x: f32) {
        let t = ((x + 1.0) / 2.0).clamp(0.0, 1.0);
        let (min, max) = self.range();
        self.set_value(min + t * (max - min));
    }

    pub fn range(&self) -> (f32, f32) {
        let state = self.state.read();
        (state.min, state.max)
    }

    /// Change the range; the value is re-clamped.
    pub fn set_range(&self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let value = {
            let mut state = self.state.write();
            state.min = min;
            state.max = max;
            state.value
        };
        self.set_value(value);
    }

    pub fn step(&self) -> f32 {
        self.state.read().step
    }

    /// Snap values to multiples of `step` above the minimum. Zero disables
    /// snapping.
    pub fn set_step(&self, step: f32) {
        let value = {
            let mut state = self.state.write();
            state.step = step.max(0.0);
            state.value
        };
        self.set_value(value);
    }

    /// Position of the value within the range, from 0 to 1.
    pub fn fraction(&self) -> f32 {
        self.state.read().fraction()
    }

    pub fn set_handle_color(&self, color: Color) {
        *self.handle_color.write() = color;
    }

    pub fn events(&self) -> &MouseEvents {
        self.hitbox.events()
    }
}

crate::impl_window_object_lifecycle!(Slider, base);

impl WindowObject for Slider {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let track = self.base.quad();
        ctx.renderer().draw_quad(&track);

        let offset = self.fraction() * 2.0 - 1.0;
        let handle = Quad {
            transform: track.transform
                * Mat4::from_translation(Vec3::new(offset, 0.0, 0.0))
                * Mat4::from_scale(Vec3::new(HANDLE_WIDTH, 1.0, 1.0)),
            color: *self.handle_color.read(),
            blur: None,
        };
        ctx.renderer().draw_quad(&handle);
        self.base.draw_children(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_local_x_maps_onto_range() {
        let slider = Slider::new("volume", 0.0, 10.0);
        slider.set_from_local_x(0.0);
        assert_eq!(slider.value(), 5.0);
        slider.set_from_local_x(-3.0);
        assert_eq!(slider.value(), 0.0);
        slider.set_from_local_x(1.0);
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn test_step_snapping_and_change_signal() {
        let slider = Slider::new("volume", 0.0, 1.0);
        slider.set_step(0.25);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        slider.value_changed.connect(move |value| seen_clone.lock().push(*value));

        slider.set_value(0.3);
        slider.set_value(0.2);
        slider.set_value(0.8);
        assert_eq!(*seen.lock(), vec![0.25, 0.75]);
    }

    #[test]
    fn test_range_change_reclamps() {
        let slider = Slider::new("volume", 0.0, 10.0);
        slider.set_value(8.0);
        slider.set_range(0.0, 4.0);
        assert_eq!(slider.value(), 4.0);
        assert_eq!(slider.fraction(), 1.0);
    }
}
