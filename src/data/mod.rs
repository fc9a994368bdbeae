/// District records and the immutable district table.
pub mod district;
/// Outcome tags and their per-outcome policies.
pub mod outcome;
/// Scatter-point derivation from the district table.
pub mod scatter;
/// Narrative step targets consumed by the scene controller.
pub mod step;
