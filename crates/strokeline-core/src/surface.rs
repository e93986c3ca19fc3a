//! Drawing-surface capability.
//!
//! `SurfaceHandle` is everything the stroke engine needs from a platform
//! canvas: where it sits on screen, a way to set context properties, a
//! segment primitive, a full repaint and an image export. The browser
//! binding implements it over `CanvasRenderingContext2d`;
//! `RecordingSurface` implements it headlessly by logging every call.

use crate::error::SurfaceError;
use crate::geometry::{Point, Segment};
use crate::mode::CompositeOperation;
use serde_json::{Map, Value};

pub trait SurfaceHandle {
    /// Current client-space position of the surface's top-left corner.
    /// Queried on every mapped event, so it tracks scrolling and layout moves.
    fn bounding_offset(&self) -> Point;

    /// Set one rendering-context property verbatim.
    fn set_context_property(&mut self, name: &str, value: &Value);

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.set_context_property(CompositeOperation::PROPERTY, &Value::from(op.as_str()));
    }

    /// Stroke one straight line as its own path.
    fn draw_segment(&mut self, segment: Segment);

    /// Wipe every pixel and reset all context state (transform, composite,
    /// line settings) to platform defaults.
    fn repaint(&mut self);

    /// Encode the current pixels as a data URI using the platform's default
    /// image format.
    fn encode_image(&self) -> Result<String, SurfaceError>;
}

/// One recorded call against a `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetProperty { name: String, value: Value },
    DrawSegment(Segment),
    Repaint,
}

/// A headless surface that records what it is asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    offset: Point,
    calls: Vec<SurfaceCall>,
    /// Live context state; cleared by `repaint` like a real canvas reset.
    properties: Map<String, Value>,
    image: String,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose top-left corner sits at `offset` in client space.
    pub fn with_offset(offset: Point) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Move the surface on screen (scrolling, relayout).
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Data URI returned by `encode_image`.
    pub fn set_image(&mut self, data_uri: impl Into<String>) {
        self.image = data_uri.into();
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Every segment drawn so far, in draw order.
    pub fn segments(&self) -> Vec<Segment> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::DrawSegment(segment) => Some(*segment),
                _ => None,
            })
            .collect()
    }

    /// Current value of a context property, if set since the last repaint.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn composite_operation(&self) -> Option<&str> {
        self.property(CompositeOperation::PROPERTY)
            .and_then(Value::as_str)
    }
}

impl SurfaceHandle for RecordingSurface {
    fn bounding_offset(&self) -> Point {
        self.offset
    }

    fn set_context_property(&mut self, name: &str, value: &Value) {
        self.properties.insert(name.to_string(), value.clone());
        self.calls.push(SurfaceCall::SetProperty {
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn draw_segment(&mut self, segment: Segment) {
        self.calls.push(SurfaceCall::DrawSegment(segment));
    }

    fn repaint(&mut self) {
        self.properties.clear();
        self.calls.push(SurfaceCall::Repaint);
    }

    fn encode_image(&self) -> Result<String, SurfaceError> {
        Ok(self.image.clone())
    }
}
