//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{DrawCommand, Surface};

/// Executes draw commands on a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear {
                width,
                height,
                color,
            } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                if let Some(color) = color {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, *width as f64, *height as f64);
                }
            }
            DrawCommand::DashedLine {
                from,
                to,
                dash,
                color,
            } => {
                let pattern = js_sys::Array::of2(
                    &JsValue::from_f64(dash[0] as f64),
                    &JsValue::from_f64(dash[1] as f64),
                );
                ctx.set_stroke_style_str(color);
                if let Err(e) = ctx.set_line_dash(&pattern) {
                    log::warn!("Canvas set_line_dash failed: {:?}", e);
                }
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
                if let Err(e) = ctx.set_line_dash(&js_sys::Array::new()) {
                    log::warn!("Canvas set_line_dash reset failed: {:?}", e);
                }
            }
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                if let Err(e) = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                {
                    log::warn!("Canvas arc failed: {:?}", e);
                }
                ctx.fill();
            }
        }
    }
}
