// surface.rs - Canvas 2D backend for the Surface trait
//
// Drawing is issued in logical (CSS pixel) coordinates; the backing store
// runs at native density through the installed DPR transform.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    w: f32,
    h: f32,
    dpr: f64,
}

impl CanvasSurface {
    /// Grab the 2D context. Fails fast; the module is decorative and a
    /// page without a working context simply goes without it.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            w: 0.0,
            h: 0.0,
            dpr: 1.0,
        })
    }

    /// Fit the backing store to the viewport at native pixel density and
    /// install the logical-pixel transform. Idempotent: with an unchanged
    /// viewport this redoes the same assignments.
    pub fn resize(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dpr = window.device_pixel_ratio();

        // The larger of the two measurements rides out mobile viewport
        // quirks where one of them lags the other.
        let doc = window.document().and_then(|d| d.document_element());
        let doc_w = doc.as_ref().map(|e| e.client_width()).unwrap_or(0) as f64;
        let doc_h = doc.as_ref().map(|e| e.client_height()).unwrap_or(0) as f64;
        let win_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let win_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let w = doc_w.max(win_w);
        let h = doc_h.max(win_h);

        self.canvas.set_width((w * dpr).floor() as u32);
        self.canvas.set_height((h * dpr).floor() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        self.w = w as f32;
        self.h = h as f32;
        self.dpr = dpr;
    }

    /// Logical size in CSS pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn css(color: Rgba) -> JsValue {
        JsValue::from_str(&format!(
            "rgba({},{},{},{})",
            color.r, color.g, color.b, color.a
        ))
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        // Clear at identity over the physical pixels; clearing under the
        // scaled transform can leave a seam at fractional DPR.
        self.ctx.save();
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.restore();
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgba) {
        #[allow(deprecated)]
        self.ctx.set_fill_style(&Self::css(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&Self::css(color));
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.stroke();
    }
}
