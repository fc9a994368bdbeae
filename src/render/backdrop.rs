use crate::{
    foundation::core::{Point, Rect},
    render::context::FrameContext,
    scale::factory::DISTANCE_DOMAIN,
    scene::{
        element::{Attrs, ElementKey, ElementSpec, Primitive, Style, TextAnchor},
        graph::{JoinOpts, Layer, SceneGraph},
    },
};

/// Distance between x-axis ticks, in km.
pub const X_TICK_STEP: f64 = 10.0;
const Y_TICK_COUNT: usize = 5;
const TICK_LEN: f64 = 6.0;
const TICK_FONT: f64 = 11.0;
const TITLE_FONT: f64 = 13.0;

/// X-axis title.
pub const X_AXIS_TITLE: &str = "Distance to mita boundary (km)";

/// Signed-distance tick values, every [`X_TICK_STEP`] across the distance domain.
pub fn x_ticks() -> Vec<f64> {
    let (lo, hi) = DISTANCE_DOMAIN;
    let n = ((hi - lo) / X_TICK_STEP).round() as i64;
    (0..=n).map(|i| lo + i as f64 * X_TICK_STEP).collect()
}

/// Tick label with as many decimals as the tick step needs.
pub fn tick_label(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    let v = if v.abs() < 1e-12 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

fn label(
    ctx: &FrameContext<'_>,
    key: String,
    pos: Point,
    text: String,
    anchor: TextAnchor,
    size: f64,
    opacity: f64,
) -> ElementSpec {
    ElementSpec {
        key: ElementKey::Named(key),
        class: "label",
        primitive: Primitive::Label { text, anchor, size },
        style: Style::fill(ctx.palette.text),
        attrs: Attrs::at(pos, opacity),
        datum: None,
    }
}

fn line(
    key: String,
    class: &'static str,
    from: Point,
    to: Point,
    style: Style,
    opacity: f64,
) -> ElementSpec {
    ElementSpec {
        key: ElementKey::Named(key),
        class,
        primitive: Primitive::Line,
        style,
        attrs: Attrs::line(from, to, opacity),
        datum: None,
    }
}

/// Two background regions split at distance zero.
pub fn background_specs(ctx: &FrameContext<'_>, opacity: f64) -> Vec<ElementSpec> {
    let plot = ctx.plot_rect();
    let split = ctx.scales.distance.apply(0.0);
    let region = |key: &str, rect: Rect, color| ElementSpec {
        key: ElementKey::named(key),
        class: "region",
        primitive: Primitive::Rect(rect),
        style: Style::fill(color),
        attrs: Attrs::opacity(opacity),
        datum: None,
    };
    vec![
        region(
            "region-outside",
            Rect::new(plot.x0, plot.y0, split, plot.y1),
            ctx.palette.region_outside,
        ),
        region(
            "region-inside",
            Rect::new(split, plot.y0, plot.x1, plot.y1),
            ctx.palette.region_inside,
        ),
    ]
}

/// Axis lines, ticks, tick labels, and the optional threshold guide.
pub fn axis_specs(ctx: &FrameContext<'_>, opacity: f64) -> Vec<ElementSpec> {
    let plot = ctx.plot_rect();
    let axis = Style::stroke(ctx.palette.axis, 1.0);
    let mut specs = vec![
        line(
            "x-axis".into(),
            "axis",
            Point::new(plot.x0, plot.y1),
            Point::new(plot.x1, plot.y1),
            axis.clone(),
            opacity,
        ),
        line(
            "y-axis".into(),
            "axis",
            Point::new(plot.x0, plot.y0),
            Point::new(plot.x0, plot.y1),
            axis.clone(),
            opacity,
        ),
    ];

    for v in x_ticks() {
        let x = ctx.scales.distance.apply(v);
        let name = tick_label(v, X_TICK_STEP);
        specs.push(line(
            format!("x-tick-{name}"),
            "tick",
            Point::new(x, plot.y1),
            Point::new(x, plot.y1 + TICK_LEN),
            axis.clone(),
            opacity,
        ));
        specs.push(label(
            ctx,
            format!("x-tick-label-{name}"),
            Point::new(x, plot.y1 + TICK_LEN + 14.0),
            name,
            TextAnchor::Middle,
            TICK_FONT,
            opacity,
        ));
    }

    let y_scale = ctx.scales.outcome.get(ctx.outcome);
    let ticks = y_scale.ticks(Y_TICK_COUNT);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    for v in ticks {
        let y = y_scale.apply(v);
        let name = tick_label(v, step);
        specs.push(line(
            format!("y-tick-{name}"),
            "tick",
            Point::new(plot.x0 - TICK_LEN, y),
            Point::new(plot.x0, y),
            axis.clone(),
            opacity,
        ));
        specs.push(label(
            ctx,
            format!("y-tick-label-{name}"),
            Point::new(plot.x0 - TICK_LEN - 4.0, y + 4.0),
            name,
            TextAnchor::End,
            TICK_FONT,
            opacity,
        ));
    }

    if ctx.show_guides {
        let x = ctx.scales.distance.apply(0.0);
        specs.push(line(
            "threshold-guide".into(),
            "guide",
            Point::new(x, plot.y0),
            Point::new(x, plot.y1),
            Style::stroke(ctx.palette.axis, 1.0).dashed(4.0, 4.0),
            opacity,
        ));
    }
    specs
}

/// Axis titles and the side captions above the plot.
pub fn title_specs(ctx: &FrameContext<'_>, opacity: f64) -> Vec<ElementSpec> {
    let plot = ctx.plot_rect();
    let x_at = |v: f64| ctx.scales.distance.apply(v);
    vec![
        label(
            ctx,
            "x-axis-title".into(),
            Point::new(plot.center().x, plot.y1 + 44.0),
            X_AXIS_TITLE.into(),
            TextAnchor::Middle,
            TITLE_FONT,
            opacity,
        ),
        label(
            ctx,
            "y-axis-title".into(),
            Point::new(plot.x0, plot.y0 - 14.0),
            ctx.outcome.axis_label().into(),
            TextAnchor::Start,
            TITLE_FONT,
            opacity,
        ),
        label(
            ctx,
            "side-outside".into(),
            Point::new(x_at(DISTANCE_DOMAIN.0 / 2.0), plot.y0 + 16.0),
            "Outside mita".into(),
            TextAnchor::Middle,
            TICK_FONT,
            opacity,
        ),
        label(
            ctx,
            "side-inside".into(),
            Point::new(x_at(DISTANCE_DOMAIN.1 / 2.0), plot.y0 + 16.0),
            "Inside mita".into(),
            TextAnchor::Middle,
            TICK_FONT,
            opacity,
        ),
    ]
}

/// Background regions, axes, and titles at `opacity`.
pub fn render(scene: &mut SceneGraph, ctx: &FrameContext<'_>, opacity: f64) {
    let now = ctx.now_ms;
    let layers = [
        (Layer::Background, background_specs(ctx, opacity)),
        (Layer::Axes, axis_specs(ctx, opacity)),
        (Layer::Labels, title_specs(ctx, opacity)),
    ];
    for (layer, specs) in layers {
        scene.join(layer, specs, JoinOpts::immediate(), now);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backdrop.rs"]
mod tests;
