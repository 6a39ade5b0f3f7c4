use crate::core::matrix::Matrix2D;
use crate::input::{EventCallback, EventHub, FeatureEvent, FeatureEventKind, Subscription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

/// Rendered primitive inside a group: a marker, a path or a text label
#[derive(Debug, Default)]
pub struct Shape {
    transform: Option<Matrix2D>,
    stroke: Option<Stroke>,
    events: EventHub<FeatureEventKind, FeatureEvent>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_transform(mut self, transform: Matrix2D) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform(&self) -> Option<Matrix2D> {
        self.transform
    }

    pub fn transform_or_identity(&self) -> Matrix2D {
        self.transform.unwrap_or_default()
    }

    pub fn set_transform(&mut self, transform: Matrix2D) {
        self.transform = Some(transform);
    }

    /// `T = T · m`: `m` acts in the shape's local coordinates
    pub fn apply_right_transform(&mut self, m: &Matrix2D) {
        self.transform = Some(self.transform_or_identity().multiply(m));
    }

    /// `T = m · T`: `m` acts in the parent's coordinates
    pub fn apply_left_transform(&mut self, m: &Matrix2D) {
        self.transform = Some(m.multiply(&self.transform_or_identity()));
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    pub fn set_stroke(&mut self, stroke: Option<Stroke>) {
        self.stroke = stroke;
    }

    pub fn connect(&self, kind: FeatureEventKind, callback: EventCallback<FeatureEvent>) -> Subscription {
        self.events.subscribe_shared(kind, callback)
    }

    /// Delivers a pointer event hitting this shape; returns the listeners called
    pub fn fire(&self, event: &FeatureEvent) -> usize {
        self.events.emit(&event.kind, event)
    }

    pub fn listener_count(&self) -> usize {
        self.events.len()
    }
}
