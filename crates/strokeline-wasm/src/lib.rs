//! WASM bridge for Strokeline — binds the stroke surface to an HTML canvas.
//!
//! Compiled via `wasm-pack build --target web`. From JavaScript:
//!
//! ```js
//! const line = new StrokeLine("pad", { contextOptions: { lineWidth: 4, lineCap: "round" } });
//! line.start();
//! line.setDrawType("erase");
//! const png = line.getData();
//! ```

mod canvas;
mod frames;
mod listeners;

pub use canvas::CanvasSurface;
pub use frames::AnimationFrameScheduler;
pub use listeners::CanvasInput;

use strokeline_core::{Mode, StrokeSurface, SurfaceConfig, SurfaceError};
use wasm_bindgen::prelude::*;

/// A freehand drawing surface bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct StrokeLine {
    surface: StrokeSurface<CanvasSurface, AnimationFrameScheduler>,
    // Dropped after `surface`: listeners stay attached until the loop is gone.
    _input: CanvasInput,
}

#[wasm_bindgen]
impl StrokeLine {
    /// Bind to the canvas with element id `id`.
    ///
    /// `config` is optional: `{ contextOptions?: {...}, frameIntervalMs?: number }`.
    /// Throws if the element is missing, is not a canvas, or the config is malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(id: &str, config: JsValue) -> Result<StrokeLine, JsError> {
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        let canvas = CanvasSurface::from_id(id)?;
        let mut input = CanvasInput::new(canvas.canvas().clone().into());
        let scheduler = AnimationFrameScheduler::new(config.frame_interval_ms)?;
        let surface = StrokeSurface::new(canvas, scheduler, &mut input, config.context_options)?;

        log::info!("stroke line bound to #{id}");
        Ok(Self {
            surface,
            _input: input,
        })
    }

    pub fn start(&self) {
        self.surface.start();
    }

    pub fn stop(&self) {
        self.surface.stop();
    }

    pub fn clear(&self) {
        self.surface.clear();
    }

    /// Surface contents as a PNG data URI.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Result<String, JsError> {
        Ok(self.surface.export_image()?)
    }

    #[wasm_bindgen(js_name = exportImage)]
    pub fn export_image(&self) -> Result<String, JsError> {
        self.get_data()
    }

    /// `"erase"` erases; any other value draws.
    #[wasm_bindgen(js_name = setDrawType)]
    pub fn set_draw_type(&self, mode: &str) {
        self.surface.set_mode(Mode::parse(mode));
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) {
        self.set_draw_type(mode);
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.surface.mode().to_string()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.surface.is_running()
    }
}

fn parse_config(config: JsValue) -> Result<SurfaceConfig, SurfaceError> {
    if config.is_undefined() || config.is_null() {
        return Ok(SurfaceConfig::default());
    }
    serde_wasm_bindgen::from_value::<SurfaceConfig>(config)
        .map_err(|e| SurfaceError::InvalidOptions(e.to_string()))?
        .validated()
}

/// Route `log` output to the browser console. `level` defaults to `"info"`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let level = match level.as_deref() {
        Some(name) => name
            .parse::<log::Level>()
            .map_err(|e| JsError::new(&e.to_string()))?,
        None => log::Level::Info,
    };
    console_log::init_with_level(level).map_err(|e| JsError::new(&e.to_string()))
}
