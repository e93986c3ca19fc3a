//! `InputSource` over DOM mouse and touch listeners on the canvas element.
//!
//! Listeners are removed again when the source is dropped.

use strokeline_core::input::EVENT_TYPES;
use strokeline_core::{InputDevice, InputEvent, InputHandler, InputSource, Point, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, TouchEvent};

type Listener = Closure<dyn FnMut(Event)>;

pub struct CanvasInput {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl CanvasInput {
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: Vec::new(),
        }
    }
}

impl InputSource for CanvasInput {
    fn listen(&mut self, handler: InputHandler) -> Result<(), SurfaceError> {
        for event_type in EVENT_TYPES {
            let handler = handler.clone();
            let listener = Listener::new(move |event: Event| {
                let Some(input) = normalize(&event) else {
                    return;
                };
                if handler(input) {
                    event.stop_propagation();
                    event.prevent_default();
                }
            });
            self.target
                .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
                .map_err(|_| SurfaceError::Listener(event_type.to_string()))?;
            self.listeners.push((event_type, listener));
        }
        Ok(())
    }
}

impl Drop for CanvasInput {
    fn drop(&mut self) {
        for (event_type, listener) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref());
        }
    }
}

/// Unify a DOM mouse or touch event. Touch events read the first active touch.
fn normalize(event: &Event) -> Option<InputEvent> {
    let event_type = event.type_();
    let client = match InputDevice::from_event_type(&event_type) {
        InputDevice::Touch => event
            .unchecked_ref::<TouchEvent>()
            .touches()
            .get(0)
            .and_then(|touch| client_point(&touch)),
        InputDevice::Mouse => client_point(event),
    };
    InputEvent::from_dom(&event_type, client)
}

/// `clientX`/`clientY` as doubles. The typed web-sys getters return `i32`
/// and drop the sub-pixel part browsers report for touches and high-DPI pointers.
fn client_point(source: &JsValue) -> Option<Point> {
    let coord = |name: &str| {
        js_sys::Reflect::get(source, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_f64())
    };
    Some(Point::new(coord("clientX")?, coord("clientY")?))
}
