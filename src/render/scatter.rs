use crate::{
    data::scatter::ScatterPoint,
    foundation::math::clamp_point,
    render::context::{FrameContext, PathStats},
    scene::{
        element::{Attrs, ElementKey, ElementSpec, Primitive, Style},
        graph::{JoinOpts, JoinStats, Layer, SceneGraph, Update},
    },
};

/// Element class of scatter markers.
pub const MARKER_CLASS: &str = "marker";

const MARKER_STROKE_WIDTH: f64 = 0.5;

/// Marker at its final scatter coordinate, or `None` when the point has no value for the
/// active outcome.
pub fn marker_spec(ctx: &FrameContext<'_>, p: &ScatterPoint) -> Option<ElementSpec> {
    let pos = ctx.scales.scatter_position(ctx.viewport, p, ctx.outcome)?;
    Some(ElementSpec {
        key: ElementKey::District(p.id),
        class: MARKER_CLASS,
        primitive: Primitive::Circle,
        style: Style::fill(ctx.fill_for(p.mita)).with_stroke(
            ctx.palette.border,
            MARKER_STROKE_WIDTH,
            1.0,
        ),
        attrs: Attrs::circle(
            clamp_point(pos, ctx.plot_rect()),
            ctx.cfg.marker_radius,
            ctx.marker_opacity(p),
        ),
        datum: Some(p.id),
    })
}

fn marker_specs(ctx: &FrameContext<'_>) -> (Vec<ElementSpec>, PathStats) {
    let mut stats = PathStats::default();
    let specs = ctx
        .filtered
        .iter()
        .filter_map(|p| {
            let spec = marker_spec(ctx, p);
            match spec {
                Some(_) => stats.drawn += 1,
                None => stats.skipped += 1,
            }
            spec
        })
        .collect();
    (specs, stats)
}

fn join_markers(
    scene: &mut SceneGraph,
    ctx: &FrameContext<'_>,
    opts: JoinOpts,
) -> (PathStats, JoinStats) {
    let (specs, stats) = marker_specs(ctx);
    let joined = scene.join(Layer::Markers, specs, opts, ctx.now_ms);
    (stats, joined)
}

/// Full-scatter path: markers at their final coordinates. A marker whose target is unchanged
/// keeps resting; anything else transitions.
pub fn render_full(scene: &mut SceneGraph, ctx: &FrameContext<'_>) -> PathStats {
    let (stats, JoinStats { entered, exited, .. }) =
        join_markers(scene, ctx, ctx.cfg.join_animated());
    if entered + exited > 0 {
        tracing::trace!(entered, exited, "marker set changed");
    }
    stats
}

/// Outcome-transition path: existing markers move to the new outcome's Y. X is the signed
/// distance and does not depend on the outcome, so it stays fixed. Markers without a value
/// under the new outcome fade out in place.
pub fn render_outcome_transition(scene: &mut SceneGraph, ctx: &FrameContext<'_>) -> PathStats {
    let (stats, joined) = join_markers(scene, ctx, ctx.cfg.join_animated());
    tracing::debug!(
        outcome = ctx.outcome.as_str(),
        moved = joined.updated,
        entering = joined.entered,
        fading = joined.exited,
        "outcome transition"
    );
    stats
}

/// Phase-settle path: re-assert final positions without a repositioning animation.
pub fn render_phase_settle(scene: &mut SceneGraph, ctx: &FrameContext<'_>) -> PathStats {
    let opts = JoinOpts {
        update: Update::Immediate,
        ..ctx.cfg.join_animated()
    };
    join_markers(scene, ctx, opts).0
}

#[cfg(test)]
#[path = "../../tests/unit/render/scatter.rs"]
mod tests;
