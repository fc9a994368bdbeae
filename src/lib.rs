//! Mitamorph renders an animated scene that morphs a district choropleth of the Peruvian mita
//! boundary into a regression-discontinuity scatter plot.
//!
//! The engine is step-driven and frame-clocked:
//!
//! - Load a [`DistrictTable`] and build a [`SceneController`]
//! - Feed narrative [`Step`]s; continuous values animate toward their targets
//! - Call [`SceneController::frame`] once per display refresh and read the [`SceneGraph`],
//!   or export it with [`scene::svg::to_svg`] / [`scene::raster::render_png`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing, tweens, and the three-handle animation driver.
pub mod animation;
/// District table, outcomes, scatter derivation, and narrative steps.
pub mod data;
/// Core types, errors, and numeric helpers.
pub mod foundation;
/// Centroids and boundary adjacency.
pub mod geometry;
/// Hover routing to tooltip payloads.
pub mod interaction;
/// Phase routing and the layer render paths.
pub mod render;
/// Linear scales, projection, and the scale factory.
pub mod scale;
/// Retained scene graph, keyed joins, and export.
pub mod scene;
/// Scene configuration and controller.
pub mod session;

#[cfg(test)]
#[path = "../tests/unit/testkit.rs"]
pub(crate) mod testkit;

pub use crate::animation::driver::{AnimationDriver, AnimationHandle, DriverTiming};
pub use crate::animation::ease::Ease;
pub use crate::data::district::{District, DistrictId, DistrictRecord, DistrictTable, LonLat};
pub use crate::data::outcome::{Outcome, OutcomeValues};
pub use crate::data::scatter::ScatterPoint;
pub use crate::data::step::{
    HighlightMode, MarkerEmphasis, ScatterPhase, Step, ZoomLevel, load_steps,
};
pub use crate::foundation::core::{Affine, BezPath, Margin, Point, Rect, Rgb8, Vec2, Viewport};
pub use crate::foundation::error::{MorphError, MorphResult};
pub use crate::geometry::index::{BoundarySet, GeometryIndex};
pub use crate::interaction::broker::{HoverEvent, InteractionBroker, TooltipPayload};
pub use crate::render::router::{PhaseRouter, RenderPath};
pub use crate::scene::graph::{Layer, SceneGraph};
pub use crate::session::config::SceneConfig;
pub use crate::session::controller::{FrameReport, SceneController, SceneState};
