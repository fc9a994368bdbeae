//! Scene controller.
//!
//! Owns the district table and everything derived from it, the three animation handles, and
//! the scene graph. Steps set targets; [`SceneController::frame`] advances the handles, routes
//! the frame, and runs exactly one render path plus the backdrop and fit layers.

use crate::{
    animation::driver::{AnimationDriver, DriverSample},
    data::{
        district::{DistrictId, DistrictTable},
        outcome::Outcome,
        scatter::{ScatterPoint, derive_all, filter_for},
        step::{HighlightMode, ScatterPhase, Step},
    },
    foundation::{
        core::Point,
        error::{MorphError, MorphResult},
    },
    geometry::index::GeometryIndex,
    interaction::broker::{HoverEvent, InteractionBroker},
    render::{
        backdrop,
        context::{FrameContext, PathStats},
        fit, map, morph,
        router::{PhaseRouter, RenderPath, RouteInput},
        scatter,
    },
    scale::factory::ScaleFactory,
    scene::{
        element::{ElementKey, HoverOverride},
        graph::{ClearPolicy, Layer, SceneGraph},
        svg,
    },
    session::config::SceneConfig,
};

/// Upper bound on frames stepped by [`SceneController::settle`].
const MAX_SETTLE_FRAMES: usize = 100_000;

/// Continuous values and edge bookkeeping carried between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneState {
    /// Morph progress after the last frame.
    pub morph: f64,
    /// Zoom blend after the last frame.
    pub zoom: f64,
    /// Border opacity after the last frame.
    pub border: f64,
    /// Outcome of the last rendered frame.
    pub prev_outcome: Option<Outcome>,
    /// Phase of the last rendered frame.
    pub prev_phase: Option<ScatterPhase>,
}

/// Summary of one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Path that rendered the frame.
    pub path: RenderPath,
    /// Raw morph progress.
    pub t: f64,
    /// Eased morph sub-progress.
    pub morph_t: f64,
    /// Zoom blend.
    pub zoom: f64,
    /// Border opacity.
    pub border: f64,
    /// Primitives drawn and skipped by the path.
    pub stats: PathStats,
    /// Handles or element transitions are still running.
    pub animating: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hovered {
    layer: Layer,
    id: DistrictId,
    pointer: Point,
}

/// Drives the morph scene: owns the data, the three animation handles, and the scene graph.
pub struct SceneController {
    config: SceneConfig,
    table: DistrictTable,
    geometry: GeometryIndex,
    scatter_all: Vec<ScatterPoint>,
    factory: ScaleFactory,
    router: PhaseRouter,
    driver: AnimationDriver,
    scene: SceneGraph,
    broker: InteractionBroker,
    step: Step,
    state: SceneState,
    last_path: Option<RenderPath>,
    hovered: Option<Hovered>,
    disposed: bool,
}

impl SceneController {
    /// Precompute geometry and scales for `table` and start at the default step (the country map).
    #[tracing::instrument(skip(table, config), fields(districts = table.len()))]
    pub fn new(table: DistrictTable, config: SceneConfig) -> MorphResult<Self> {
        config.validate()?;
        let geometry = GeometryIndex::build(&table, config.geometry.vertex_tolerance);
        let scatter_all = derive_all(&table);
        let factory = ScaleFactory::new(
            config.viewport,
            &table,
            &geometry,
            &scatter_all,
            config.geometry.framing(),
        );

        let step = Step::default();
        let initial = DriverSample {
            morph: step.morph_progress,
            zoom: step.zoom.as_f64(),
            border: if step.show_districts { 1.0 } else { 0.0 },
        };
        tracing::debug!(
            boundary = geometry.boundary().len(),
            scatter = scatter_all.len(),
            "scene controller ready"
        );

        Ok(Self {
            router: PhaseRouter::new(config.morph),
            driver: AnimationDriver::new(config.timing, initial),
            scene: SceneGraph::new(config.viewport),
            broker: InteractionBroker::new(),
            state: SceneState {
                morph: initial.morph,
                zoom: initial.zoom,
                border: initial.border,
                prev_outcome: None,
                prev_phase: None,
            },
            config,
            table,
            geometry,
            scatter_all,
            factory,
            step,
            last_path: None,
            hovered: None,
            disposed: false,
        })
    }

    fn ensure_live(&self) -> MorphResult<()> {
        if self.disposed {
            Err(MorphError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Take a step's targets. Continuous values animate from wherever they are now; discrete
    /// fields apply from the next frame.
    #[tracing::instrument(skip(self, step), fields(outcome = step.outcome.as_str()))]
    pub fn apply_step(&mut self, step: &Step, now_ms: f64) -> MorphResult<()> {
        self.ensure_live()?;
        step.validate()?;
        self.driver.morph.start(step.morph_progress, now_ms)?;
        self.driver.zoom.start(step.zoom.as_f64(), now_ms)?;
        self.driver
            .border
            .start(if step.show_districts { 1.0 } else { 0.0 }, now_ms)?;
        tracing::debug!(
            morph = step.morph_progress,
            phase = ?step.scatter_phase,
            zoom = ?step.zoom,
            "step applied"
        );
        self.step = step.clone();
        Ok(())
    }

    /// Advance to `now_ms` and render one frame.
    pub fn frame(&mut self, now_ms: f64) -> MorphResult<FrameReport> {
        self.ensure_live()?;
        let sample = self.driver.tick(now_ms);
        let outcome = self.step.outcome;
        let phase = self.step.scatter_phase;

        let route = self.router.route(RouteInput {
            t: sample.morph,
            outcome,
            phase,
            prev_outcome: self.state.prev_outcome,
            prev_phase: self.state.prev_phase,
        });
        if self.last_path != Some(route.path) {
            tracing::debug!(
                from = self.last_path.map(RenderPath::as_str),
                to = route.path.as_str(),
                t = sample.morph,
                "render path changed"
            );
            self.last_path = Some(route.path);
        }

        self.scene.clear(route.clear);
        let scales = self.factory.scales(sample.zoom);
        let filtered = filter_for(&self.scatter_all, outcome);
        let ctx = FrameContext {
            cfg: &self.config.morph,
            palette: &self.config.palette,
            viewport: &self.config.viewport,
            scales: &scales,
            table: &self.table,
            geometry: &self.geometry,
            scatter_all: &self.scatter_all,
            filtered: &filtered,
            outcome,
            phase,
            highlight: self.step.highlight.unwrap_or(HighlightMode::None),
            emphasis: self.step.emphasis,
            show_guides: self.step.show_guides.unwrap_or(false),
            border_opacity: sample.border,
            t: sample.morph,
            now_ms,
        };

        backdrop::render(&mut self.scene, &ctx, route.backdrop_opacity);
        let stats = match route.path {
            RenderPath::Map => map::render(&mut self.scene, &ctx),
            RenderPath::Morphing => {
                morph::render(&mut self.scene, &ctx, route.morph_t, route.marker_fade)
            }
            RenderPath::FullScatter => scatter::render_full(&mut self.scene, &ctx),
            RenderPath::OutcomeTransition => {
                scatter::render_outcome_transition(&mut self.scene, &ctx)
            }
            RenderPath::PhaseSettle => scatter::render_phase_settle(&mut self.scene, &ctx),
        };
        if route.render_fit {
            fit::render(&mut self.scene, &ctx);
        }
        if stats.skipped > 0 {
            tracing::warn!(
                skipped = stats.skipped,
                path = route.path.as_str(),
                "primitives omitted: geometry could not be projected"
            );
        }

        self.scene.advance(now_ms);
        self.restore_hover();

        if cfg!(debug_assertions) {
            self.scene.verify_alignment()?;
        }

        self.state = SceneState {
            morph: sample.morph,
            zoom: sample.zoom,
            border: sample.border,
            prev_outcome: Some(outcome),
            prev_phase: Some(phase),
        };
        Ok(FrameReport {
            path: route.path,
            t: sample.morph,
            morph_t: route.morph_t,
            zoom: sample.zoom,
            border: sample.border,
            stats,
            animating: self.driver.any_active() || self.scene.is_animating(),
        })
    }

    /// Render frames every `frame_ms` from `now_ms` until nothing animates. Returns the time of
    /// the last frame.
    pub fn settle(&mut self, now_ms: f64, frame_ms: f64) -> MorphResult<f64> {
        if !(frame_ms.is_finite() && frame_ms > 0.0) {
            return Err(MorphError::validation("frame interval must be > 0"));
        }
        let mut now = now_ms;
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.frame(now)?.animating {
                return Ok(now);
            }
            now += frame_ms;
        }
        Err(MorphError::animation("scene did not settle"))
    }

    /// Pointer moved to `pointer` (surface coordinates). Markers take precedence over
    /// district polygons.
    pub fn pointer_move(&mut self, pointer: Point) -> MorphResult<HoverEvent> {
        self.ensure_live()?;
        let p = self.scene.to_plot_space(pointer);
        let hit = [Layer::Markers, Layer::Districts]
            .into_iter()
            .find_map(|layer| {
                let el = self.scene.hit_test(layer, p)?;
                Some((layer, el.datum()?))
            });
        match hit {
            Some((layer, id)) => self.hover_element(layer, id, pointer),
            None => self.pointer_leave(),
        }
    }

    /// Pointer entered the element drawn for district `id` in `layer`.
    pub fn hover_element(
        &mut self,
        layer: Layer,
        id: DistrictId,
        pointer: Point,
    ) -> MorphResult<HoverEvent> {
        self.ensure_live()?;
        let target = Hovered { layer, id, pointer };
        let hover = self.hover_override(layer);
        let Some(district) = self.table.get(id) else {
            return self.pointer_leave();
        };
        if !apply_hover(&mut self.scene, target, hover) {
            return self.pointer_leave();
        }
        self.hovered = Some(target);
        Ok(self.broker.hover(district, self.step.outcome, pointer).clone())
    }

    /// Pointer left the element or the whole scene. Baselines come back exactly.
    pub fn pointer_leave(&mut self) -> MorphResult<HoverEvent> {
        self.ensure_live()?;
        self.hovered = None;
        self.scene.clear_hover();
        Ok(self.broker.leave().clone())
    }

    fn hover_override(&self, layer: Layer) -> HoverOverride {
        match layer {
            Layer::Markers => HoverOverride {
                radius: self.config.morph.hover_radius,
                opacity: 1.0,
            },
            _ => HoverOverride {
                radius: 0.0,
                opacity: 1.0,
            },
        }
    }

    /// Re-apply hover to rebuilt elements and keep the tooltip on the active outcome. Publishes
    /// a leave when the hovered element is gone or no longer visible.
    fn restore_hover(&mut self) {
        let Some(target) = self.hovered else {
            return;
        };
        let hover = self.hover_override(target.layer);
        if !apply_hover(&mut self.scene, target, hover) {
            self.hovered = None;
            self.broker.leave();
            return;
        }
        let outcome = self.step.outcome;
        let stale = self
            .broker
            .current()
            .payload
            .as_ref()
            .is_some_and(|p| p.outcome != outcome);
        if stale {
            if let Some(district) = self.table.get(target.id) {
                self.broker.hover(district, outcome, target.pointer);
            }
        }
    }

    /// Change the host's physical scale; the logical space is unchanged.
    pub fn set_surface_scale(&mut self, scale: f64) -> MorphResult<()> {
        self.ensure_live()?;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MorphError::validation("surface scale must be > 0"));
        }
        self.config.viewport.scale = scale;
        self.scene.set_surface_scale(scale);
        Ok(())
    }

    /// Cancel every animation and drop the scene. Any later call fails with
    /// [`MorphError::Disposed`].
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.driver.dispose();
        self.scene.clear(ClearPolicy::Full);
        self.hovered = None;
        self.broker.leave();
        self.disposed = true;
        tracing::debug!("scene controller torn down");
    }

    /// Whether [`SceneController::teardown`] ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Scene as of the last frame.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Scene as an SVG document.
    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.scene)
    }

    /// Values carried between frames.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Active step.
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// The three animation handles.
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Hover channel, for reading events.
    pub fn broker(&mut self) -> &mut InteractionBroker {
        &mut self.broker
    }

    /// District table.
    pub fn table(&self) -> &DistrictTable {
        &self.table
    }

    /// Boundary set and bounds.
    pub fn geometry(&self) -> &GeometryIndex {
        &self.geometry
    }

    /// Every scatter point, across outcomes.
    pub fn scatter_all(&self) -> &[ScatterPoint] {
        &self.scatter_all
    }

    /// Scale and projection source.
    pub fn factory(&self) -> &ScaleFactory {
        &self.factory
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

fn apply_hover(scene: &mut SceneGraph, target: Hovered, hover: HoverOverride) -> bool {
    scene.clear_hover();
    scene.set_hover(target.layer, &ElementKey::District(target.id), hover)
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
