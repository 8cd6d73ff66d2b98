//! [`Surface`] over a browser `<canvas>` 2D context.

use flowfield_core::{StrokeStyle, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct WebCanvas {
    context: CanvasRenderingContext2d,
    width: usize,
    height: usize,
}

impl WebCanvas {
    /// Sizes `canvas` to `width` x `height` and applies `style` to its 2D
    /// context.
    ///
    /// Resizing a canvas resets its context state, so the style is applied
    /// after the new size.
    pub fn attach(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        style: StrokeStyle,
    ) -> Result<Self, JsValue> {
        canvas.set_width(width);
        canvas.set_height(height);
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas context unavailable")?
            .dyn_into()?;
        #[allow(deprecated)]
        context.set_stroke_style(&JsValue::from_str(&style.color.to_hex()));
        context.set_line_width(style.line_width);
        Ok(Self {
            context,
            width: width as usize,
            height: height as usize,
        })
    }
}

impl Surface for WebCanvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.context.clear_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}
