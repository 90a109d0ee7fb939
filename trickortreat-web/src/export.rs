//! Voucher PNG export through an off-screen canvas.
use thiserror::Error;
use trickortreat_game::voucher::{self, DrawOp, VoucherLayout};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use crate::dom::{document, js_error_message};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("2d canvas context unavailable")]
    NoContext,
}

impl From<JsValue> for ExportError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

fn paint(ctx: &CanvasRenderingContext2d, op: &DrawOp) -> Result<(), JsValue> {
    match op {
        DrawOp::FillRect {
            color,
            x,
            y,
            width,
            height,
        } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(*x, *y, *width, *height);
        }
        DrawOp::StrokeRect {
            color,
            line_width,
            x,
            y,
            width,
            height,
        } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*line_width);
            ctx.stroke_rect(*x, *y, *width, *height);
        }
        DrawOp::Text {
            color,
            font,
            align,
            x,
            y,
            text,
        } => {
            ctx.set_fill_style_str(color);
            ctx.set_font(font);
            ctx.set_text_align(align.as_css());
            ctx.fill_text(text, *x, *y)?;
        }
    }
    Ok(())
}

/// Render the layout and return it as a PNG data URL.
///
/// # Errors
/// Returns an error if the canvas or its 2D context cannot be created.
pub fn render_data_url(layout: &VoucherLayout) -> Result<String, ExportError> {
    let canvas = document()?
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(JsValue::from)?;
    canvas.set_width(layout.width);
    canvas.set_height(layout.height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(ExportError::NoContext)?
        .dyn_into()
        .map_err(|_| ExportError::NoContext)?;
    for op in &layout.ops {
        paint(&ctx, op)?;
    }
    Ok(canvas.to_data_url_with_type("image/png")?)
}

/// Paint the voucher for `raw_name` and trigger a browser download.
///
/// # Errors
/// Returns an error when any browser call fails; nothing is downloaded then.
pub fn download_voucher(raw_name: &str) -> Result<(), ExportError> {
    let layout = voucher::layout(raw_name);
    let href = render_data_url(&layout)?;
    let link = document()?
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    link.set_download(&layout.filename);
    link.set_href(&href);
    link.click();
    log::info!("voucher exported as {}", layout.filename);
    Ok(())
}
