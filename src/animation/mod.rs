/// Three continuous scene values, each driven by its own cancellable handle.
pub mod driver;
/// Easing curves.
pub mod ease;
/// Time-based tweens over interpolatable values.
pub mod tween;
