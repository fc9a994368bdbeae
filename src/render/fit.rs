use crate::{
    data::{outcome::Outcome, scatter::ScatterPoint, step::ScatterPhase},
    foundation::{core::Point, math::clamp_point},
    render::context::FrameContext,
    scale::factory::DISTANCE_DOMAIN,
    scene::{
        element::{Attrs, ElementKey, ElementSpec, Primitive, Style, TextAnchor},
        graph::{JoinStats, Layer, SceneGraph},
    },
};

const FIT_WIDTH: f64 = 2.5;
const EFFECT_WIDTH: f64 = 2.0;
const LABEL_FONT: f64 = 12.0;
const BRACKET_ARM: f64 = 6.0;

/// Ordinary-least-squares line `y = intercept + slope * x` with the x span it was fit on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OlsLine {
    /// Change in y per km.
    pub slope: f64,
    /// Fitted value at distance zero.
    pub intercept: f64,
    /// Smallest x in the sample.
    pub x_min: f64,
    /// Largest x in the sample.
    pub x_max: f64,
    /// Sample size.
    pub n: usize,
}

impl OlsLine {
    /// Fitted value at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit needs at least two points and non-zero x variance.
pub fn ols(points: &[(f64, f64)]) -> Option<OlsLine> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;
    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });
    if !(sxx > f64::EPSILON) {
        return None;
    }
    let slope = sxy / sxx;
    let (x_min, x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.0), hi.max(p.0))
        });
    Some(OlsLine {
        slope,
        intercept: mean_y - slope * mean_x,
        x_min,
        x_max,
        n,
    })
}

fn side_points(points: &[ScatterPoint], outcome: Outcome, inside: bool) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| p.mita == inside)
        .filter_map(|p| Some((p.scatter_x, p.scatter_y(outcome)?)))
        .collect()
}

/// One regression per side of the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SideFits {
    /// Fit over districts outside the mita (x < 0).
    pub outside: Option<OlsLine>,
    /// Fit over districts inside the mita (x > 0).
    pub inside: Option<OlsLine>,
}

/// Fit each side of the boundary independently.
pub fn fit_sides(points: &[ScatterPoint], outcome: Outcome) -> SideFits {
    SideFits {
        outside: ols(&side_points(points, outcome, false)),
        inside: ols(&side_points(points, outcome, true)),
    }
}

/// Plain group means `(outside, inside)`.
pub fn group_means(points: &[ScatterPoint], outcome: Outcome) -> (Option<f64>, Option<f64>) {
    let mean = |inside: bool| {
        let ys = side_points(points, outcome, inside);
        (!ys.is_empty()).then(|| ys.iter().map(|p| p.1).sum::<f64>() / ys.len() as f64)
    };
    (mean(false), mean(true))
}

/// Effect annotation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Annotation {
    /// Difference of group means.
    NaiveGap,
    /// Difference of the two fitted intercepts at the boundary.
    ControlledGap,
}

/// Annotations visible in a phase.
pub fn annotations(phase: ScatterPhase) -> &'static [Annotation] {
    match phase {
        ScatterPhase::Dots | ScatterPhase::OlsFit => &[],
        ScatterPhase::NaiveEffect => &[Annotation::NaiveGap],
        ScatterPhase::ControlledEffect => &[Annotation::ControlledGap],
    }
}

fn signed(outcome: Outcome, v: f64) -> String {
    let sign = if v >= 0.0 { "+" } else { "-" };
    format!("{sign}{}", outcome.format_value(v.abs()))
}

struct Painter<'a, 'b> {
    ctx: &'a FrameContext<'b>,
}

impl Painter<'_, '_> {
    fn point(&self, x: f64, y: f64) -> Point {
        let p = Point::new(
            self.ctx.scales.distance.apply(x),
            self.ctx.scales.outcome.get(self.ctx.outcome).apply(y),
        );
        clamp_point(p, self.ctx.plot_rect())
    }

    fn line(
        &self,
        key: &str,
        class: &'static str,
        from: Point,
        to: Point,
        style: Style,
    ) -> ElementSpec {
        ElementSpec {
            key: ElementKey::named(key),
            class,
            primitive: Primitive::Line,
            style,
            attrs: Attrs::line(from, to, 1.0),
            datum: None,
        }
    }

    fn label(&self, key: &str, pos: Point, text: String) -> ElementSpec {
        ElementSpec {
            key: ElementKey::named(key),
            class: "effect-label",
            primitive: Primitive::Label {
                text,
                anchor: TextAnchor::Start,
                size: LABEL_FONT,
            },
            style: Style::fill(self.ctx.palette.text),
            attrs: Attrs::at(pos, 1.0),
            datum: None,
        }
    }

    /// Vertical bracket at the boundary between two outcome values, with its label.
    fn gap(&self, prefix: &str, title: &str, from_y: f64, to_y: f64) -> Vec<ElementSpec> {
        let style = Style::stroke(self.ctx.palette.effect, EFFECT_WIDTH);
        let a = self.point(0.0, from_y);
        let b = self.point(0.0, to_y);
        let arm = |p: Point| (p - (BRACKET_ARM, 0.0), p + (BRACKET_ARM, 0.0));
        let (a0, a1) = arm(a);
        let (b0, b1) = arm(b);
        let mid = a.midpoint(b);
        vec![
            self.line(&format!("{prefix}-gap"), "effect", a, b, style.clone()),
            self.line(&format!("{prefix}-cap-from"), "effect", a0, a1, style.clone()),
            self.line(&format!("{prefix}-cap-to"), "effect", b0, b1, style),
            self.label(
                &format!("{prefix}-label"),
                mid + (BRACKET_ARM + 4.0, 4.0),
                format!("{title}: {}", signed(self.ctx.outcome, to_y - from_y)),
            ),
        ]
    }
}

/// Fitted line segments: the outside fit runs up to the boundary, the inside fit starts there.
pub fn fit_specs(ctx: &FrameContext<'_>, fits: &SideFits) -> Vec<ElementSpec> {
    if !ctx.phase.shows_fit() {
        return Vec::new();
    }
    let painter = Painter { ctx };
    let style = Style::stroke(ctx.palette.fit, FIT_WIDTH);
    let mut specs = Vec::with_capacity(2);
    if let Some(f) = fits.outside {
        specs.push(painter.line(
            "fit-outside",
            "fit-line",
            painter.point(f.x_min, f.at(f.x_min)),
            painter.point(0.0, f.at(0.0)),
            style.clone(),
        ));
    }
    if let Some(f) = fits.inside {
        specs.push(painter.line(
            "fit-inside",
            "fit-line",
            painter.point(0.0, f.at(0.0)),
            painter.point(f.x_max, f.at(f.x_max)),
            style,
        ));
    }
    specs
}

/// Group-mean lines and gap brackets for the phase's annotations.
pub fn effect_specs(ctx: &FrameContext<'_>, fits: &SideFits) -> Vec<ElementSpec> {
    let painter = Painter { ctx };
    let (lo, hi) = DISTANCE_DOMAIN;
    let mut specs = Vec::new();
    for annotation in annotations(ctx.phase) {
        match annotation {
            Annotation::NaiveGap => {
                let (Some(out_mean), Some(in_mean)) = group_means(ctx.filtered, ctx.outcome)
                else {
                    continue;
                };
                let style = Style::stroke(ctx.palette.effect, EFFECT_WIDTH).dashed(6.0, 4.0);
                specs.push(painter.line(
                    "naive-mean-outside",
                    "effect",
                    painter.point(lo, out_mean),
                    painter.point(0.0, out_mean),
                    style.clone(),
                ));
                specs.push(painter.line(
                    "naive-mean-inside",
                    "effect",
                    painter.point(0.0, in_mean),
                    painter.point(hi, in_mean),
                    style,
                ));
                specs.extend(painter.gap("naive", "Naive gap", out_mean, in_mean));
            }
            Annotation::ControlledGap => {
                let (Some(out_fit), Some(in_fit)) = (fits.outside, fits.inside) else {
                    continue;
                };
                specs.extend(painter.gap("rd", "RD estimate", out_fit.at(0.0), in_fit.at(0.0)));
            }
        }
    }
    specs
}

/// (Re)render fit and effect layers for the active phase. Elements fade in, transition, and
/// fade out across phase and outcome changes.
pub fn render(scene: &mut SceneGraph, ctx: &FrameContext<'_>) -> (JoinStats, JoinStats) {
    let fits = fit_sides(ctx.filtered, ctx.outcome);
    let opts = ctx.cfg.join_animated();
    let lines = scene.join(Layer::FitLines, fit_specs(ctx, &fits), opts, ctx.now_ms);
    let effects = scene.join(Layer::Effects, effect_specs(ctx, &fits), opts, ctx.now_ms);
    (lines, effects)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
