use std::f64::consts::TAU;

use plot::draw::{DrawItem, DrawPrimitive};
use scene::components::{Color, Justify};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const BACKGROUND: &str = "#ffffff";

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

fn text_align(j: Justify) -> &'static str {
    match j {
        Justify::Begin => "left",
        Justify::Middle => "center",
        Justify::End => "right",
    }
}

fn text_baseline(j: Justify) -> &'static str {
    match j {
        Justify::Begin => "top",
        Justify::Middle => "middle",
        Justify::End => "bottom",
    }
}

/// Darker outline so flattened spheres stay readable against each other.
fn outline(c: Color) -> String {
    Color {
        r: c.r * 0.6,
        g: c.g * 0.6,
        b: c.b * 0.6,
    }
    .to_hex()
}

/// Paints a draw list in order; the list is already far-to-near.
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    items: &[DrawItem],
) -> Result<(), JsValue> {
    ctx_set_fill_style(ctx, BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_line_width(1.0);

    for item in items {
        match &item.primitive {
            DrawPrimitive::Ellipse {
                center,
                radius_x,
                radius_y,
                color,
            } => {
                ctx.begin_path();
                ctx.ellipse(center.x, center.y, *radius_x, *radius_y, 0.0, 0.0, TAU)?;
                ctx_set_fill_style(ctx, &color.to_hex());
                ctx.fill();
                ctx_set_stroke_style(ctx, &outline(*color));
                ctx.stroke();
            }
            DrawPrimitive::Rect {
                center,
                half_size,
                color,
            } => {
                ctx_set_fill_style(ctx, &color.to_hex());
                ctx.fill_rect(
                    center.x - half_size,
                    center.y - half_size,
                    2.0 * half_size,
                    2.0 * half_size,
                );
            }
            DrawPrimitive::Line { from, to, color } => {
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx_set_stroke_style(ctx, &color.to_hex());
                ctx.stroke();
            }
            DrawPrimitive::Text {
                at,
                string,
                size,
                family,
                justify,
                color,
            } => {
                ctx.set_font(&format!("{size:.0}px {family}, sans-serif"));
                ctx.set_text_align(text_align(justify[0]));
                ctx.set_text_baseline(text_baseline(justify[1]));
                ctx_set_fill_style(ctx, &color.to_hex());
                ctx.fill_text(string, at.x, at.y)?;
            }
        }
    }
    Ok(())
}
