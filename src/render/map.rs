use crate::{
    data::{
        district::{District, LonLat},
        step::HighlightMode,
    },
    foundation::core::{BezPath, Point},
    render::context::{FrameContext, PathStats},
    scale::projection::Projection,
    scene::{
        element::{Attrs, ElementKey, ElementSpec, Primitive, Style},
        graph::{JoinOpts, Layer, SceneGraph},
    },
};

/// Element class of district polygons.
pub const DISTRICT_CLASS: &str = "district";

const BORDER_WIDTH: f64 = 0.6;
const BOUNDARY_WIDTH: f64 = 2.0;

/// Project every vertex of a ring. A single failed vertex drops the whole ring.
pub fn project_ring(projection: &Projection, ring: &[LonLat]) -> Option<Vec<Point>> {
    ring.iter().map(|p| projection.project(*p)).collect()
}

/// Closed path through `points`.
pub fn ring_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Opacity of a district polygon under the active highlight mode.
pub fn highlight_opacity(ctx: &FrameContext<'_>, d: &District) -> f64 {
    let dimmed = match ctx.highlight {
        HighlightMode::MitaOnly => !d.mita,
        HighlightMode::NonmitaOnly => d.mita,
        HighlightMode::None | HighlightMode::Boundary => false,
    };
    if dimmed {
        ctx.cfg.dimmed_opacity
    } else {
        ctx.cfg.district_opacity
    }
}

fn district_style(ctx: &FrameContext<'_>, d: &District) -> Style {
    let base = Style::fill(ctx.fill_for(d.mita));
    if ctx.highlight == HighlightMode::Boundary && ctx.geometry.is_boundary(d.id) {
        base.with_stroke(ctx.palette.boundary, BOUNDARY_WIDTH, 1.0)
    } else {
        base.with_stroke(ctx.palette.border, BORDER_WIDTH, ctx.border_opacity)
    }
}

/// One projected polygon per district.
pub fn district_specs(ctx: &FrameContext<'_>) -> (Vec<ElementSpec>, PathStats) {
    let mut stats = PathStats::default();
    let Some(projection) = ctx.scales.projection else {
        stats.skipped = ctx.table.len();
        return (Vec::new(), stats);
    };

    let mut specs = Vec::with_capacity(ctx.table.len());
    for d in ctx.table.districts() {
        let Some(points) = project_ring(&projection, d.ring()) else {
            stats.skipped += 1;
            continue;
        };
        specs.push(ElementSpec {
            key: ElementKey::District(d.id),
            class: DISTRICT_CLASS,
            primitive: Primitive::Path(ring_path(&points)),
            style: district_style(ctx, d),
            attrs: Attrs::opacity(highlight_opacity(ctx, d)),
            datum: Some(d.id),
        });
        stats.drawn += 1;
    }
    (specs, stats)
}

/// Geographic map path.
pub fn render(scene: &mut SceneGraph, ctx: &FrameContext<'_>) -> PathStats {
    let (specs, stats) = district_specs(ctx);
    scene.join(Layer::Districts, specs, JoinOpts::immediate(), ctx.now_ms);
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/render/map.rs"]
mod tests;
