//! Activity Chart Component
//!
//! Sent and received volume per day on an HTML5 canvas. The buckets come
//! zero-filled from the analytics module, so every day has a slot.

use leptos::*;
use payclone::analytics::DayBucket;
use payclone::format::currency;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const SENT_COLOR: &str = "#F44336";
const RECEIVED_COLOR: &str = "#4CAF50";

#[component]
pub fn ActivityChart(
    #[prop(into)]
    buckets: Signal<Vec<DayBucket>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let buckets = buckets.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &buckets);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-56 rounded-lg"
            />
            <div class="flex justify-center gap-6 mt-3 text-sm text-gray-300">
                <LegendDot color=SENT_COLOR label="Sent" />
                <LegendDot color=RECEIVED_COLOR label="Received" />
            </div>
        </div>
    }
}

#[component]
fn LegendDot(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div class="w-3 h-3 rounded-full" style=format!("background-color: {}", color) />
            <span>{label}</span>
        </div>
    }
}

/// Largest single value, with a floor of 1 so empty weeks still scale
fn scale_max(buckets: &[DayBucket]) -> f64 {
    buckets
        .iter()
        .map(|b| b.sent.max(b.received))
        .fold(0.0_f64, f64::max)
        .max(1.0)
}

/// Pixel height of a bar for `value` in a chart area `height` tall
fn bar_height(value: f64, max: f64, height: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        0.0
    } else {
        (value / max).min(1.0) * height
    }
}

fn draw_chart(canvas: &HtmlCanvasElement, buckets: &[DayBucket]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 70.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if buckets.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No activity yet", width / 2.0 - 60.0, height / 2.0);
        return;
    }

    let max = scale_max(buckets);

    // Horizontal grid with amount labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&currency(value), 5.0, y + 4.0);
    }

    let slot = chart_width / buckets.len() as f64;
    let bar = (slot * 0.35).min(30.0);
    let baseline = margin_top + chart_height;

    for (i, day) in buckets.iter().enumerate() {
        let center = margin_left + slot * (i as f64 + 0.5);

        let sent = bar_height(day.sent, max, chart_height);
        ctx.set_fill_style(&SENT_COLOR.into());
        ctx.fill_rect(center - bar - 1.0, baseline - sent, bar, sent);

        let received = bar_height(day.received, max, chart_height);
        ctx.set_fill_style(&RECEIVED_COLOR.into());
        ctx.fill_rect(center + 1.0, baseline - received, bar, received);

        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&day.label, center - 18.0, height - 12.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(sent: f64, received: f64) -> DayBucket {
        DayBucket {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            label: "May 01".to_string(),
            sent,
            received,
            net: received - sent,
        }
    }

    #[test]
    fn test_scale_max_has_floor() {
        assert_eq!(scale_max(&[day(0.0, 0.0)]), 1.0);
        assert_eq!(scale_max(&[day(40.0, 10.0), day(5.0, 90.0)]), 90.0);
    }

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height(50.0, 100.0, 200.0), 100.0);
        assert_eq!(bar_height(0.0, 100.0, 200.0), 0.0);
        assert_eq!(bar_height(150.0, 100.0, 200.0), 200.0);
    }
}
