//! Input abstraction layer.
//!
//! Mouse and touch events are normalized into a single `InputEvent` enum at
//! the platform boundary. Positions are still in client space here; the
//! stroke surface maps them into surface-local coordinates.

use crate::error::SurfaceError;
use crate::geometry::Point;
use std::rc::Rc;

/// Which kind of pointing device produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    Mouse,
    Touch,
}

impl InputDevice {
    /// Classify a DOM event type. Anything starting with `touch` is a touch
    /// event; everything else is treated as a mouse event.
    pub fn from_event_type(event_type: &str) -> Self {
        if event_type.starts_with("touch") {
            Self::Touch
        } else {
            Self::Mouse
        }
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start. `client` is the first active touch for touch input.
    PointerDown { client: Point, device: InputDevice },

    /// Mouse move or touch move.
    PointerMove { client: Point, device: InputDevice },

    /// Mouse up or touch end. Carries no position: a finished touch has none.
    PointerUp { device: InputDevice },
}

impl InputEvent {
    /// Build an event from a DOM event type and its client position.
    ///
    /// Returns `None` for event types the surface does not listen to, and
    /// for down/move events without a position (e.g. an empty touch list).
    pub fn from_dom(event_type: &str, client: Option<Point>) -> Option<Self> {
        let device = InputDevice::from_event_type(event_type);
        match event_type {
            "mousedown" | "touchstart" => Some(Self::PointerDown {
                client: client?,
                device,
            }),
            "mousemove" | "touchmove" => Some(Self::PointerMove {
                client: client?,
                device,
            }),
            "mouseup" | "touchend" => Some(Self::PointerUp { device }),
            _ => None,
        }
    }

    pub fn device(&self) -> InputDevice {
        match self {
            Self::PointerDown { device, .. }
            | Self::PointerMove { device, .. }
            | Self::PointerUp { device } => *device,
        }
    }

    /// Client-space position, if this event carries one.
    pub fn client(&self) -> Option<Point> {
        match self {
            Self::PointerDown { client, .. } | Self::PointerMove { client, .. } => Some(*client),
            Self::PointerUp { .. } => None,
        }
    }
}

/// Callback receiving normalized events. Returns `true` when the event was
/// handled, in which case the source suppresses the platform default and
/// stops propagation.
pub type InputHandler = Rc<dyn Fn(InputEvent) -> bool>;

/// DOM event types a platform input source forwards.
pub const EVENT_TYPES: [&str; 6] = [
    "touchstart",
    "touchmove",
    "touchend",
    "mousedown",
    "mousemove",
    "mouseup",
];

/// A source of pointer input a surface can register against.
pub trait InputSource {
    fn listen(&mut self, handler: InputHandler) -> Result<(), SurfaceError>;
}

/// An input source driven by hand, for headless hosts and tests.
#[derive(Default)]
pub struct ManualInput {
    handlers: Vec<InputHandler>,
}

impl ManualInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every registered handler. Returns `true` if any
    /// handler reported it handled.
    pub fn dispatch(&self, event: InputEvent) -> bool {
        self.handlers
            .iter()
            .fold(false, |handled, handler| handler(event) || handled)
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.len()
    }
}

impl InputSource for ManualInput {
    fn listen(&mut self, handler: InputHandler) -> Result<(), SurfaceError> {
        self.handlers.push(handler);
        Ok(())
    }
}
