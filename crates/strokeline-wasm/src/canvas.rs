//! `SurfaceHandle` over an HTML `<canvas>` and its `CanvasRenderingContext2d`.

use serde::Serialize;
use serde_json::Value;
use strokeline_core::{Point, Segment, SurfaceError, SurfaceHandle};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas element by id and acquire its 2D context.
    pub fn from_id(id: &str) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(SurfaceError::NoWindow)?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::NotACanvas(id.to_string()))?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl SurfaceHandle for CanvasSurface {
    fn bounding_offset(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn set_context_property(&mut self, name: &str, value: &Value) {
        let js = match to_js(value) {
            Ok(js) => js,
            Err(e) => {
                log::warn!("context option `{name}` not representable: {e}");
                return;
            }
        };
        match js_sys::Reflect::set(&self.ctx, &JsValue::from_str(name), &js) {
            Ok(true) => {}
            Ok(false) => log::warn!("context rejected `{name}`"),
            Err(e) => log::warn!("setting `{name}` threw: {e:?}"),
        }
    }

    fn draw_segment(&mut self, segment: Segment) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(segment.p0.x, segment.p0.y);
        ctx.line_to(segment.p1.x, segment.p1.y);
        ctx.stroke();
    }

    fn repaint(&mut self) {
        // Reassigning the width clears the bitmap and resets all context state.
        self.canvas.set_width(self.canvas.width());
    }

    fn encode_image(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url()
            .map_err(|e| SurfaceError::Encode(format!("{e:?}")))
    }
}

/// Plain JS value for a JSON option: objects become plain objects, not `Map`s.
fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
