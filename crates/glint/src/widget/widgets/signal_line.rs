//! Scrolling sample plots.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use glint_render::{Color, Polyline, Vec2};
use parking_lot::RwLock;

use crate::widget::{LayoutContainer, PaintContext, WindowObject, WindowObjectBase};

#[derive(Debug)]
struct Samples {
    values: VecDeque<f32>,
    capacity: usize,
    min: f32,
    max: f32,
    line_width: f32,
}

/// A bounded buffer of samples drawn as a line across the object.
///
/// The oldest sample is at the left edge. Once the buffer is full each new
/// sample pushes the oldest one out.
#[derive(Debug)]
pub struct SignalLine {
    base: WindowObjectBase,
    samples: RwLock<Samples>,
}

impl SignalLine {
    /// Create a line holding up to `capacity` samples plotted over
    /// `[-1, 1]`.
    pub fn new(name: impl Into<Arc<str>>, capacity: usize) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let base = WindowObjectBase::new(name);
            base.bind(this.clone());
            base.set_color(Color::GREEN);
            Self {
                base,
                samples: RwLock::new(Samples {
                    values: VecDeque::with_capacity(capacity),
                    capacity: capacity.max(2),
                    min: -1.0,
                    max: 1.0,
                    line_width: 1.0,
                }),
            }
        })
    }

    pub fn push(&self, value: f32) {
        let mut samples = self.samples.write();
        if samples.values.len() == samples.capacity {
            samples.values.pop_front();
        }
        samples.values.push_back(value);
    }

    pub fn extend(&self, values: impl IntoIterator<Item = f32>) {
        for value in values {
            self.push(value);
        }
    }

    pub fn clear(&self) {
        self.samples.write().values.clear();
    }

    /// Snapshot of the samples, oldest first.
    pub fn samples(&self) -> Vec<f32> {
        self.samples.read().values.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.read().values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.read().capacity
    }

    /// Change the capacity, dropping the oldest samples if needed.
    pub fn set_capacity(&self, capacity: usize) {
        let mut samples = self.samples.write();
        samples.capacity = capacity.max(2);
        while samples.values.len() > samples.capacity {
            samples.values.pop_front();
        }
    }

    pub fn range(&self) -> (f32, f32) {
        let samples = self.samples.read();
        (samples.min, samples.max)
    }

    /// The sample values mapped to the bottom and top edges.
    pub fn set_range(&self, min: f32, max: f32) {
        let mut samples = self.samples.write();
        samples.min = min.min(max);
        samples.max = max.max(min);
    }

    pub fn set_line_width(&self, width: f32) {
        self.samples.write().line_width = width;
    }

    /// The plotted points in local space, oldest first. Values outside the
    /// range are clamped to the edges.
    pub fn points(&self) -> Vec<Vec2> {
        let samples = self.samples.read();
        let span = samples.max - samples.min;
        let last = (samples.capacity - 1) as f32;
        samples
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let x = index as f32 / last * 2.0 - 1.0;
                let y = if span > 0.0 {
                    ((value - samples.min) / span * 2.0 - 1.0).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                Vec2::new(x, y)
            })
            .collect()
    }
}

crate::impl_window_object_lifecycle!(SignalLine, base);

impl WindowObject for SignalLine {
    fn window_base(&self) -> &WindowObjectBase {
        &self.base
    }

    fn draw(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.can_draw() {
            return;
        }
        let points = self.points();
        if points.len() >= 2 {
            let line = Polyline {
                transform: self.base.draw_matrix(),
                color: self.base.color(),
                points,
                width: self.samples.read().line_width,
            };
            ctx.renderer().draw_polyline(&line);
        }
        self.base.draw_children(ctx);
    }

    fn as_layout_container(&self) -> Option<&dyn LayoutContainer> {
        Some(self)
    }
}

impl LayoutContainer for SignalLine {
    fn container_base(&self) -> &WindowObjectBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_drops_oldest() {
        let line = SignalLine::new("cpu", 3);
        line.extend([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(line.samples(), vec![2.0, 3.0, 4.0]);

        line.set_capacity(2);
        assert_eq!(line.samples(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_points_span_the_object() {
        let line = SignalLine::new("cpu", 3);
        line.set_range(0.0, 10.0);
        line.extend([0.0, 5.0, 20.0]);

        let points = line.points();
        assert_eq!(points[0], Vec2::new(-1.0, -1.0));
        assert_eq!(points[1], Vec2::new(0.0, 0.0));
        assert_eq!(points[2], Vec2::new(1.0, 1.0));
    }
}
