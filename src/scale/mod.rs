/// Scale and projection construction from data and viewport.
pub mod factory;
/// Clamped linear scales with nice ticks.
pub mod linear;
/// Zoomable Mercator projection.
pub mod projection;
