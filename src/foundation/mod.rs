/// Viewport geometry and shared kurbo re-exports.
pub mod core;
/// Crate error taxonomy.
pub mod error;
/// Small numeric helpers shared by scales and renderers.
pub mod math;
