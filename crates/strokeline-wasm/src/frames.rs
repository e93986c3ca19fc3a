//! `FrameScheduler` over `requestAnimationFrame`, with a `setTimeout`
//! fallback for hosts that lack it.

use strokeline_core::options::MIN_FRAME_INTERVAL_MS;
use strokeline_core::scheduler::FrameCallback;
use strokeline_core::{FrameHandle, FrameScheduler, SurfaceError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primitive {
    AnimationFrame,
    Timeout { interval_ms: i32 },
}

pub struct AnimationFrameScheduler {
    window: Window,
    primitive: Primitive,
}

impl AnimationFrameScheduler {
    /// `interval_ms` is only used when `requestAnimationFrame` is missing;
    /// values below 1ms (and NaN) run at 1ms.
    pub fn new(interval_ms: f64) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
        let has_raf = js_sys::Reflect::get(&window, &JsValue::from_str("requestAnimationFrame"))
            .map(|f| f.is_function())
            .unwrap_or(false);
        let primitive = if has_raf {
            Primitive::AnimationFrame
        } else {
            log::debug!("requestAnimationFrame unavailable, falling back to a {interval_ms}ms timer");
            Primitive::Timeout {
                interval_ms: interval_ms.max(MIN_FRAME_INTERVAL_MS).round() as i32,
            }
        };
        Ok(Self { window, primitive })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule(&mut self, callback: FrameCallback) -> Result<FrameHandle, SurfaceError> {
        // Freed by wasm-bindgen once invoked; a cancelled frame's closure is never freed.
        let callback = Closure::once_into_js(move || callback());
        let function: &js_sys::Function = callback.unchecked_ref();
        let id = match self.primitive {
            Primitive::AnimationFrame => self.window.request_animation_frame(function),
            Primitive::Timeout { interval_ms } => self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, interval_ms),
        };
        id.map(FrameHandle)
            .map_err(|e| SurfaceError::Schedule(format!("{e:?}")))
    }

    fn cancel(&mut self, handle: FrameHandle) {
        match self.primitive {
            Primitive::AnimationFrame => {
                if let Err(e) = self.window.cancel_animation_frame(handle.0) {
                    log::warn!("cancelAnimationFrame failed: {e:?}");
                }
            }
            Primitive::Timeout { .. } => self.window.clear_timeout_with_handle(handle.0),
        }
    }
}
