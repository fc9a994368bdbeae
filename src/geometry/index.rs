//! Per-load geometric precomputation over the district table.
//!
//! The boundary set is a quadratic pairwise scan between treated and control districts. District
//! counts are bounded (low hundreds), so a bounding-box prefilter is the only acceleration.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::data::district::{District, DistrictId, DistrictTable, LonLat, open_ring};

/// Vertex match tolerance in degrees (roughly 100 m).
pub const DEFAULT_VERTEX_TOLERANCE: f64 = 0.001;

/// Matching vertices required before two rings are considered to share an edge.
const SHARED_EDGE_MIN_VERTICES: usize = 2;

/// Planar centroid of a ring; degenerate (zero-area) rings fall back to the vertex mean.
pub fn compute_centroid(polygon: &[LonLat]) -> LonLat {
    let ring = open_ring(polygon);
    if ring.is_empty() {
        return LonLat::new(0.0, 0.0);
    }

    // Shoelace about the first vertex to limit cancellation.
    let o = ring[0];
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let (ax, ay) = (a.lon - o.lon, a.lat - o.lat);
        let (bx, by) = (b.lon - o.lon, b.lat - o.lat);
        let cross = ax * by - bx * ay;
        area2 += cross;
        cx += (ax + bx) * cross;
        cy += (ay + by) * cross;
    }

    if area2.abs() < 1e-18 {
        let n = ring.len() as f64;
        let (sx, sy) = ring
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.lon, sy + p.lat));
        return LonLat::new(sx / n, sy / n);
    }

    LonLat::new(o.lon + cx / (3.0 * area2), o.lat + cy / (3.0 * area2))
}

/// Axis-aligned lon/lat bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// South-west corner.
    pub min: LonLat,
    /// North-east corner.
    pub max: LonLat,
}

impl GeoBounds {
    /// Bounds of `points`; `None` when empty.
    pub fn of(points: &[LonLat]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            b.include(*p);
        }
        Some(b)
    }

    /// Grow to cover `p`.
    pub fn include(&mut self, p: LonLat) {
        self.min.lon = self.min.lon.min(p.lon);
        self.min.lat = self.min.lat.min(p.lat);
        self.max.lon = self.max.lon.max(p.lon);
        self.max.lat = self.max.lat.max(p.lat);
    }

    /// Bounds covering both.
    pub fn union(mut self, other: Self) -> Self {
        self.include(other.min);
        self.include(other.max);
        self
    }

    /// Boxes intersect once each is grown by `margin`.
    pub fn overlaps(&self, other: &Self, margin: f64) -> bool {
        self.min.lon <= other.max.lon + margin
            && other.min.lon <= self.max.lon + margin
            && self.min.lat <= other.max.lat + margin
            && other.min.lat <= self.max.lat + margin
    }

    /// Grow every side by `fraction` of the larger span.
    pub fn padded(&self, fraction: f64) -> Self {
        let span = (self.max.lon - self.min.lon).max(self.max.lat - self.min.lat);
        let pad = span * fraction;
        Self {
            min: LonLat::new(self.min.lon - pad, self.min.lat - pad),
            max: LonLat::new(self.max.lon + pad, self.max.lat + pad),
        }
    }
}

/// District ids that share an edge with a district of the opposite treatment status.
pub type BoundarySet = BTreeSet<DistrictId>;

/// True once at least two vertices of `a` lie within `tolerance` of a vertex of `b`.
pub fn shares_edge(a: &[LonLat], b: &[LonLat], tolerance: f64) -> bool {
    let tol2 = tolerance * tolerance;
    let mut matches = 0;
    for va in open_ring(a) {
        let hit = open_ring(b).iter().any(|vb| {
            let dx = va.lon - vb.lon;
            let dy = va.lat - vb.lat;
            dx * dx + dy * dy <= tol2
        });
        if hit {
            matches += 1;
            if matches >= SHARED_EDGE_MIN_VERTICES {
                return true;
            }
        }
    }
    false
}

/// Every district that shares an edge with a district on the other side of the mita line.
///
/// Only treated/control pairs are compared, in parallel over treated districts.
#[tracing::instrument(skip(districts))]
pub fn compute_boundary_set(districts: &[District], tolerance: f64) -> BoundarySet {
    let bounds: BTreeMap<DistrictId, GeoBounds> = districts
        .iter()
        .filter_map(|d| GeoBounds::of(&d.polygon).map(|b| (d.id, b)))
        .collect();

    let (treated, control): (Vec<&District>, Vec<&District>) =
        districts.iter().partition(|d| d.mita);

    let control = &control;
    let bounds = &bounds;
    let pairs: Vec<(DistrictId, DistrictId)> = treated
        .par_iter()
        .flat_map_iter(move |d1| {
            let b1 = bounds.get(&d1.id).copied();
            control.iter().filter_map(move |d2| {
                let (b1, b2) = (b1?, bounds.get(&d2.id)?);
                if !b1.overlaps(b2, tolerance) {
                    return None;
                }
                shares_edge(&d1.polygon, &d2.polygon, tolerance).then_some((d1.id, d2.id))
            })
        })
        .collect();

    let mut set = BoundarySet::new();
    for (a, b) in pairs {
        set.insert(a);
        set.insert(b);
    }
    tracing::debug!(boundary = set.len(), "computed boundary set");
    set
}

/// Geometry precomputed once per district table.
#[derive(Clone, Debug, Default)]
pub struct GeometryIndex {
    boundary: BoundarySet,
    full_bounds: Option<GeoBounds>,
}

impl GeometryIndex {
    /// Compute the boundary set and overall bounds of `table`.
    #[tracing::instrument(skip(table))]
    pub fn build(table: &DistrictTable, tolerance: f64) -> Self {
        let boundary = compute_boundary_set(table.districts(), tolerance);
        let full_bounds = table
            .districts()
            .iter()
            .filter_map(|d| GeoBounds::of(&d.polygon))
            .reduce(GeoBounds::union);
        Self {
            boundary,
            full_bounds,
        }
    }

    /// Ids of boundary districts.
    pub fn boundary(&self) -> &BoundarySet {
        &self.boundary
    }

    /// Whether `id` is a boundary district.
    pub fn is_boundary(&self, id: DistrictId) -> bool {
        self.boundary.contains(&id)
    }

    /// Bounds of every polygon; `None` for an empty table.
    pub fn full_bounds(&self) -> Option<GeoBounds> {
        self.full_bounds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/index.rs"]
mod tests;
