use crate::data::{
    district::{District, DistrictId, DistrictTable},
    outcome::{Outcome, OutcomeValues},
};

/// Derived scatter observation for one district.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    /// District key.
    pub id: DistrictId,
    /// Inside the mita.
    pub mita: bool,
    /// Absolute distance to the boundary in km.
    pub distance: f64,
    /// Signed distance: positive inside the mita, negative outside.
    pub scatter_x: f64,
    /// Accepted outcome values in plotted units.
    pub values: OutcomeValues,
}

impl ScatterPoint {
    /// Plotted value for `outcome`, `None` when missing.
    pub fn scatter_y(&self, outcome: Outcome) -> Option<f64> {
        self.values.get(outcome)
    }
}

/// Signed distance convention shared by the scatter renderer and the distance scale.
pub fn signed_distance(distance: f64, mita: bool) -> f64 {
    if mita { distance.abs() } else { -distance.abs() }
}

/// Derive the scatter point for a district, if it has a distance and any accepted outcome.
pub fn derive_point(d: &District) -> Option<ScatterPoint> {
    let distance = d.distance?;
    let values = d.outcomes.to_plotted();
    if !values.any() {
        return None;
    }
    Some(ScatterPoint {
        id: d.id,
        mita: d.mita,
        distance: distance.abs(),
        scatter_x: signed_distance(distance, d.mita),
        values,
    })
}

/// Every district with a distance and at least one accepted outcome.
///
/// Outcome transitions animate over this set so points that become invalid can fade out in place.
pub fn derive_all(table: &DistrictTable) -> Vec<ScatterPoint> {
    table.districts().iter().filter_map(derive_point).collect()
}

/// Points valid under `outcome`.
pub fn filter_for(all: &[ScatterPoint], outcome: Outcome) -> Vec<ScatterPoint> {
    all.iter()
        .filter(|p| p.scatter_y(outcome).is_some())
        .cloned()
        .collect()
}

/// Observed `(min, max)` of an outcome across all valid points.
pub fn outcome_extent(all: &[ScatterPoint], outcome: Outcome) -> Option<(f64, f64)> {
    all.iter()
        .filter_map(|p| p.scatter_y(outcome))
        .fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
}

#[cfg(test)]
#[path = "../../tests/unit/data/scatter.rs"]
mod tests;
