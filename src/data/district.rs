use std::collections::HashMap;
use std::io::Read;

use crate::{
    data::outcome::OutcomeValues,
    foundation::error::{MorphError, MorphResult},
    geometry::index::compute_centroid,
};

/// Stable district key.
pub type DistrictId = u32;

/// Geographic coordinate in degrees, serialized as `[lon, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    /// Longitude.
    pub lon: f64,
    /// Latitude.
    pub lat: f64,
}

impl LonLat {
    /// Coordinate from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(v: LonLat) -> Self {
        [v.lon, v.lat]
    }
}

/// Row shape of the precomputed district table.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DistrictRecord {
    /// Stable key, unique within the table.
    pub id: DistrictId,
    /// Inside the mita catchment (treatment side).
    pub mita: bool,
    /// Outer ring; may or may not repeat its first vertex.
    pub polygon: Vec<LonLat>,
    /// Absolute distance to the mita boundary in km.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Raw outcome values; zero means missing for some outcomes.
    #[serde(default)]
    pub outcomes: OutcomeValues,
}

/// Immutable district with its derived centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct District {
    /// Stable key.
    pub id: DistrictId,
    /// Inside the mita catchment.
    pub mita: bool,
    /// Outer ring as loaded.
    pub polygon: Vec<LonLat>,
    /// Area-weighted centroid of the ring.
    pub centroid: LonLat,
    /// Absolute distance to the boundary in km, when known and finite.
    pub distance: Option<f64>,
    /// Raw outcome values.
    pub outcomes: OutcomeValues,
}

impl District {
    /// Validate a record and derive its centroid.
    pub fn from_record(rec: DistrictRecord) -> MorphResult<Self> {
        let ring_len = open_ring(&rec.polygon).len();
        if ring_len < 3 {
            return Err(MorphError::validation(format!(
                "district {} polygon must have at least 3 vertices (got {ring_len})",
                rec.id
            )));
        }
        if rec
            .polygon
            .iter()
            .any(|p| !p.lon.is_finite() || !p.lat.is_finite())
        {
            return Err(MorphError::validation(format!(
                "district {} polygon has non-finite coordinates",
                rec.id
            )));
        }
        let centroid = compute_centroid(&rec.polygon);
        Ok(Self {
            id: rec.id,
            mita: rec.mita,
            polygon: rec.polygon,
            centroid,
            distance: rec.distance.filter(|d| d.is_finite()),
            outcomes: rec.outcomes,
        })
    }

    /// Ring vertices without the repeated closing vertex.
    pub fn ring(&self) -> &[LonLat] {
        open_ring(&self.polygon)
    }
}

/// Strip the closing vertex when a ring repeats its first point.
pub fn open_ring(ring: &[LonLat]) -> &[LonLat] {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) if ring.len() > 1 && a == b => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// District table loaded once per session.
#[derive(Clone, Debug, Default)]
pub struct DistrictTable {
    districts: Vec<District>,
    by_id: HashMap<DistrictId, usize>,
}

impl DistrictTable {
    /// Build the table, rejecting duplicate ids and degenerate polygons.
    pub fn from_records(records: Vec<DistrictRecord>) -> MorphResult<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut districts = Vec::with_capacity(records.len());
        for rec in records {
            if by_id.insert(rec.id, districts.len()).is_some() {
                return Err(MorphError::validation(format!(
                    "duplicate district id {}",
                    rec.id
                )));
            }
            districts.push(District::from_record(rec)?);
        }
        Ok(Self { districts, by_id })
    }

    /// Parse a JSON array of [`DistrictRecord`]s.
    #[tracing::instrument(skip(reader))]
    pub fn from_json_reader(reader: impl Read) -> MorphResult<Self> {
        let records: Vec<DistrictRecord> = serde_json::from_reader(reader)?;
        let table = Self::from_records(records)?;
        tracing::debug!(districts = table.len(), "loaded district table");
        Ok(table)
    }

    /// [`DistrictTable::from_json_reader`] over a string.
    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        Self::from_json_reader(s.as_bytes())
    }

    /// Districts in load order.
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// District by id.
    pub fn get(&self, id: DistrictId) -> Option<&District> {
        self.by_id.get(&id).map(|&i| &self.districts[i])
    }

    /// Number of districts.
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// No districts loaded.
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/district.rs"]
mod tests;
