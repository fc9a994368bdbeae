use crate::{
    data::{
        district::DistrictTable,
        outcome::Outcome,
        scatter::{ScatterPoint, outcome_extent},
    },
    foundation::{
        core::{Point, Viewport},
        math::clamp_point,
    },
    geometry::index::{GeoBounds, GeometryIndex},
    scale::{linear::LinearScale, projection::Projection},
};

/// Signed distance domain (km) of the scatter x axis.
pub const DISTANCE_DOMAIN: (f64, f64) = (-50.0, 50.0);

/// Inputs controlling how the two map framings are chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramingOpts {
    /// Country framing grows the data bounds by this fraction for neighboring context.
    pub context_padding: f64,
    /// Pixel inset for both framings.
    pub map_padding: f64,
}

/// One linear scale per outcome; lookup is total over [`Outcome`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeScales {
    /// Consumption axis.
    pub consumption: LinearScale,
    /// Stunting axis, in percent.
    pub stunting: LinearScale,
    /// Road density axis.
    pub roads: LinearScale,
}

impl OutcomeScales {
    /// Scale for `outcome`.
    pub fn get(&self, outcome: Outcome) -> &LinearScale {
        match outcome {
            Outcome::Consumption => &self.consumption,
            Outcome::Stunting => &self.stunting,
            Outcome::Roads => &self.roads,
        }
    }
}

/// Scales resolved for a single frame.
#[derive(Clone, Copy, Debug)]
pub struct Scales {
    /// Signed distance to plot x, clamped to the domain.
    pub distance: LinearScale,
    /// Outcome values to plot y.
    pub outcome: OutcomeScales,
    /// `None` when the table has no projectable geometry.
    pub projection: Option<Projection>,
}

impl Scales {
    /// Final scatter position of a point under `outcome`, clamped to the plot.
    pub fn scatter_position(
        &self,
        viewport: &Viewport,
        p: &ScatterPoint,
        outcome: Outcome,
    ) -> Option<Point> {
        let y = p.scatter_y(outcome)?;
        let raw = Point::new(
            self.distance.apply(p.scatter_x),
            self.outcome.get(outcome).apply(y),
        );
        Some(clamp_point(raw, viewport.plot_rect()))
    }
}

/// Derives projection and Cartesian scales from the data and viewport.
///
/// Outcome domains and the two map framings depend only on data and viewport, so they are
/// computed once; the projection itself is re-blended for every zoom value.
#[derive(Clone, Debug)]
pub struct ScaleFactory {
    viewport: Viewport,
    distance: LinearScale,
    outcome: OutcomeScales,
    country: Option<Projection>,
    region: Option<Projection>,
}

impl ScaleFactory {
    /// Precompute scales and framings for `table` inside `viewport`.
    ///
    /// Region framing covers districts within the distance domain and falls back to the country
    /// framing when none qualify.
    #[tracing::instrument(skip(table, geometry, scatter_all))]
    pub fn new(
        viewport: Viewport,
        table: &DistrictTable,
        geometry: &GeometryIndex,
        scatter_all: &[ScatterPoint],
        opts: FramingOpts,
    ) -> Self {
        let frame = viewport.plot_rect();
        let distance =
            LinearScale::new(DISTANCE_DOMAIN, (0.0, viewport.inner_width())).clamped();

        let outcome_scale = |o: Outcome| {
            let domain = outcome_extent(scatter_all, o).unwrap_or((0.0, 1.0));
            LinearScale::new(domain, (viewport.inner_height(), 0.0))
        };
        let outcome = OutcomeScales {
            consumption: outcome_scale(Outcome::Consumption),
            stunting: outcome_scale(Outcome::Stunting),
            roads: outcome_scale(Outcome::Roads),
        };

        let country = geometry.full_bounds().and_then(|b| {
            Projection::fit(b.padded(opts.context_padding), frame, opts.map_padding)
        });

        let (lo, hi) = DISTANCE_DOMAIN;
        let region_bounds = table
            .districts()
            .iter()
            .filter(|d| d.distance.is_some_and(|dist| dist.abs() <= hi.max(-lo)))
            .filter_map(|d| GeoBounds::of(&d.polygon))
            .reduce(GeoBounds::union);
        let region = region_bounds
            .and_then(|b| Projection::fit(b, frame, opts.map_padding))
            .or(country);

        if country.is_none() {
            tracing::warn!("district geometry cannot be projected; map layers will be empty");
        }

        Self {
            viewport,
            distance,
            outcome,
            country,
            region,
        }
    }

    /// Logical space the scales map into.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Signed distance scale.
    pub fn distance_scale(&self) -> LinearScale {
        self.distance
    }

    /// Scale for `outcome`.
    pub fn outcome_scale(&self, outcome: Outcome) -> LinearScale {
        *self.outcome.get(outcome)
    }

    /// Projection for a zoom value in `[0, 1]` (0 = country, 1 = mita region).
    pub fn projection(&self, zoom: f64) -> Option<Projection> {
        match (self.country, self.region) {
            (Some(c), Some(r)) => Some(Projection::blend(&c, &r, zoom)),
            (c, r) => c.or(r),
        }
    }

    /// Everything a frame at `zoom` needs.
    pub fn scales(&self, zoom: f64) -> Scales {
        Scales {
            distance: self.distance,
            outcome: self.outcome,
            projection: self.projection(zoom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/factory.rs"]
mod tests;
