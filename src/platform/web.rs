//! Browser collaborators: a 2D canvas surface and a DOM score readout

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use super::{Color, ScoreSink, Surface, TextAlign};
use crate::sim::Aabb;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.fill_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.set_text_align(align.as_css());
        if let Err(e) = self
            .ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y))
        {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

pub struct DomScoreSink {
    element: HtmlElement,
}

impl DomScoreSink {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ScoreSink for DomScoreSink {
    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}
