//! WebAssembly bindings for ninepatch

use wasm_bindgen::prelude::*;

use crate::geometry::BorderSpec;
use crate::sample::{CenterSample, EdgeSample};
use crate::{emit_header, CompileRequest, Compiler, EmitOptions, NinePatchError, Rect, Role};

#[wasm_bindgen]
pub struct WasmCompiler {
    request: CompileRequest,
    values_per_line: usize,
}

fn to_js(err: NinePatchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn rgba_image(rgba: &[u8], width: u32, height: u32) -> Result<image::RgbaImage, JsValue> {
    image::RgbaImage::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))
}

fn rect_to_js(rect: Rect) -> Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"x".into(), &rect.x.into())?;
    js_sys::Reflect::set(&obj, &"y".into(), &rect.y.into())?;
    js_sys::Reflect::set(&obj, &"w".into(), &rect.w.into())?;
    js_sys::Reflect::set(&obj, &"h".into(), &rect.h.into())?;
    Ok(obj)
}

#[wasm_bindgen]
impl WasmCompiler {
    #[wasm_bindgen(constructor)]
    pub fn new(prefix: String) -> WasmCompiler {
        let request = CompileRequest { prefix, ..CompileRequest::default() };
        WasmCompiler { request, values_per_line: 16 }
    }

    /// Load a full request from its JSON form; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<WasmCompiler, JsValue> {
        let request = CompileRequest::from_json_str(json).map_err(to_js)?;
        Ok(WasmCompiler { request, values_per_line: 16 })
    }

    pub fn set_border(&mut self, left: u32, right: u32, top: u32, bottom: u32) {
        self.request.border = BorderSpec::new(left, right, top, bottom);
    }

    pub fn set_top_sample(&mut self, offset: u32, length: u32) {
        self.request.samples.top = EdgeSample { offset, length };
    }

    pub fn set_bottom_sample(&mut self, offset: u32, length: u32) {
        self.request.samples.bottom = EdgeSample { offset, length };
    }

    pub fn set_left_sample(&mut self, offset: u32, length: u32) {
        self.request.samples.left = EdgeSample { offset, length };
    }

    pub fn set_right_sample(&mut self, offset: u32, length: u32) {
        self.request.samples.right = EdgeSample { offset, length };
    }

    pub fn set_center_sample(&mut self, offset_x: u32, offset_y: u32, width: u32, height: u32) {
        self.request.samples.center = CenterSample { offset_x, offset_y, width, height };
    }

    pub fn set_values_per_line(&mut self, n: usize) {
        self.values_per_line = n;
    }

    /// Compile an RGBA buffer and return the header text.
    pub fn compile(&self, rgba: &[u8], width: u32, height: u32) -> Result<String, JsValue> {
        let img = rgba_image(rgba, width, height)?;
        let set = Compiler::new(self.request.clone()).compile(&img).map_err(to_js)?;
        let options =
            EmitOptions { values_per_line: self.values_per_line, ..EmitOptions::default() };
        Ok(emit_header(&set, &options))
    }

    /// Base and exported rectangles for a `width x height` image, keyed by region,
    /// for drawing an overlay.
    pub fn regions(&self, width: u32, height: u32) -> Result<js_sys::Object, JsValue> {
        let layout = Compiler::new(self.request.clone()).layout(width, height).map_err(to_js)?;
        let result = js_sys::Object::new();
        for role in Role::ALL {
            let entry = js_sys::Object::new();
            js_sys::Reflect::set(&entry, &"base".into(), &rect_to_js(layout.base_rect(role))?)?;
            js_sys::Reflect::set(&entry, &"sample".into(), &rect_to_js(layout.export_rect(role))?)?;
            let key = role.suffix().trim_start_matches('_').to_ascii_lowercase();
            js_sys::Reflect::set(&result, &key.into(), &entry)?;
        }
        Ok(result)
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"ninepatch ready".into());
}
