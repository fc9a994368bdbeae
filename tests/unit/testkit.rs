//! Shared fixtures for unit tests.

use crate::{
    data::{
        district::DistrictTable,
        outcome::Outcome,
        scatter::{ScatterPoint, derive_all, filter_for},
        step::{HighlightMode, ScatterPhase},
    },
    foundation::core::Viewport,
    geometry::index::{DEFAULT_VERTEX_TOLERANCE, GeometryIndex},
    render::context::{FrameContext, Palette, RenderConfig},
    scale::factory::{FramingOpts, ScaleFactory, Scales},
};

pub const DISTRICTS_JSON: &str = include_str!("../fixtures/districts.json");

pub fn table() -> DistrictTable {
    DistrictTable::from_json_str(DISTRICTS_JSON).unwrap()
}

/// Fixture table with everything a render path borrows.
pub struct Fixture {
    pub table: DistrictTable,
    pub geometry: GeometryIndex,
    pub scatter_all: Vec<ScatterPoint>,
    pub factory: ScaleFactory,
    pub cfg: RenderConfig,
    pub palette: Palette,
    pub viewport: Viewport,
}

impl Fixture {
    pub fn new() -> Self {
        let table = table();
        let geometry = GeometryIndex::build(&table, DEFAULT_VERTEX_TOLERANCE);
        let scatter_all = derive_all(&table);
        let viewport = Viewport::default();
        let factory = ScaleFactory::new(
            viewport,
            &table,
            &geometry,
            &scatter_all,
            FramingOpts {
                context_padding: 0.2,
                map_padding: 10.0,
            },
        );
        Self {
            table,
            geometry,
            scatter_all,
            factory,
            cfg: RenderConfig::default(),
            palette: Palette::default(),
            viewport,
        }
    }

    pub fn scales(&self, zoom: f64) -> Scales {
        self.factory.scales(zoom)
    }

    pub fn filtered(&self, outcome: Outcome) -> Vec<ScatterPoint> {
        filter_for(&self.scatter_all, outcome)
    }

    pub fn ctx<'a>(
        &'a self,
        scales: &'a Scales,
        filtered: &'a [ScatterPoint],
        outcome: Outcome,
        t: f64,
        now_ms: f64,
    ) -> FrameContext<'a> {
        FrameContext {
            cfg: &self.cfg,
            palette: &self.palette,
            viewport: &self.viewport,
            scales,
            table: &self.table,
            geometry: &self.geometry,
            scatter_all: &self.scatter_all,
            filtered,
            outcome,
            phase: ScatterPhase::Dots,
            highlight: HighlightMode::None,
            emphasis: None,
            show_guides: false,
            border_opacity: 1.0,
            t,
            now_ms,
        }
    }
}
