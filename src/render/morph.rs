use crate::{
    foundation::{
        core::{Point, Rect, Vec2},
        math::{clamp01, clamp_point, lerp},
    },
    render::{
        context::{FrameContext, PathStats},
        map::{DISTRICT_CLASS, project_ring, ring_path},
        scatter::MARKER_CLASS,
    },
    scene::{
        element::{Attrs, ElementKey, ElementSpec, Primitive, Style},
        graph::{JoinOpts, Layer, SceneGraph},
    },
};

const BORDER_WIDTH: f64 = 0.6;

/// Marker center between the projected centroid and the scatter position, clamped to `bounds`.
pub fn morph_center(map: Point, scatter: Point, morph_t: f64, bounds: Rect) -> Point {
    let t = clamp01(morph_t);
    let raw = Point::new(lerp(map.x, scatter.x, t), lerp(map.y, scatter.y, t));
    clamp_point(raw, bounds)
}

/// Deform a projected polygon toward a circle of `target_radius` around `center`.
///
/// Each vertex keeps its angle about `centroid`; its radius shrinks by `1 - morph_t` while
/// blending toward `target_radius` with `roundness = morph_t`.
pub fn morph_polygon(
    vertices: &[Point],
    centroid: Point,
    center: Point,
    morph_t: f64,
    target_radius: f64,
) -> Vec<Point> {
    let roundness = clamp01(morph_t);
    let district_scale = 1.0 - roundness;
    vertices
        .iter()
        .map(|v| {
            let off = *v - centroid;
            let r = off.hypot();
            let theta = off.atan2();
            let radius = lerp(r * district_scale, target_radius, roundness);
            center + Vec2::from_angle(theta) * radius
        })
        .collect()
}

/// Morphing path: deformed polygons plus the fading marker layer.
pub fn render(
    scene: &mut SceneGraph,
    ctx: &FrameContext<'_>,
    morph_t: f64,
    marker_fade: f64,
) -> PathStats {
    let mut stats = PathStats::default();
    let bounds = ctx.plot_rect();
    let Some(projection) = ctx.scales.projection else {
        stats.skipped = ctx.filtered.len();
        scene.join(Layer::Districts, Vec::new(), JoinOpts::immediate(), ctx.now_ms);
        scene.join(Layer::Markers, Vec::new(), JoinOpts::immediate(), ctx.now_ms);
        return stats;
    };

    let polygon_opacity = ctx.cfg.district_opacity * (1.0 - marker_fade);
    let mut polygons = Vec::with_capacity(ctx.filtered.len());
    let mut markers = Vec::with_capacity(ctx.filtered.len());
    for p in ctx.filtered {
        let Some(d) = ctx.table.get(p.id) else {
            stats.skipped += 1;
            continue;
        };
        let (Some(map_pos), Some(scatter_pos)) = (
            projection.project(d.centroid),
            ctx.scales.scatter_position(ctx.viewport, p, ctx.outcome),
        ) else {
            stats.skipped += 1;
            continue;
        };
        let center = morph_center(map_pos, scatter_pos, morph_t, bounds);

        if let Some(ring) = project_ring(&projection, d.ring()) {
            let shape = morph_polygon(&ring, map_pos, center, morph_t, ctx.cfg.marker_radius);
            polygons.push(ElementSpec {
                key: ElementKey::District(d.id),
                class: DISTRICT_CLASS,
                primitive: Primitive::Path(ring_path(&shape)),
                style: Style::fill(ctx.fill_for(d.mita)).with_stroke(
                    ctx.palette.border,
                    BORDER_WIDTH,
                    ctx.border_opacity,
                ),
                attrs: Attrs::opacity(polygon_opacity),
                datum: Some(d.id),
            });
            stats.drawn += 1;
        } else {
            stats.skipped += 1;
        }

        markers.push(ElementSpec {
            key: ElementKey::District(p.id),
            class: MARKER_CLASS,
            primitive: Primitive::Circle,
            style: Style::fill(ctx.fill_for(p.mita)),
            attrs: Attrs::circle(
                clamp_point(center, bounds),
                ctx.cfg.marker_radius,
                ctx.marker_opacity(p) * marker_fade,
            ),
            datum: Some(p.id),
        });
        stats.drawn += 1;
    }

    scene.join(Layer::Districts, polygons, JoinOpts::immediate(), ctx.now_ms);
    scene.join(Layer::Markers, markers, JoinOpts::immediate(), ctx.now_ms);
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/render/morph.rs"]
mod tests;
