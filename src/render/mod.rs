/// Background regions, axes, and axis titles.
pub mod backdrop;
/// Per-frame inputs shared by every render path.
pub mod context;
/// Fitted regression lines and effect annotations.
pub mod fit;
/// Geographic map path.
pub mod map;
/// Polygon-to-marker morphing path.
pub mod morph;
/// Frame classification into render paths.
pub mod router;
/// Full-scatter, outcome-transition, and phase-settle paths.
pub mod scatter;
