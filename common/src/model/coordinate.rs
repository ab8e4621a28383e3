use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees, inclusive on both ends.
pub const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees, inclusive on both ends.
pub const LNG_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A single vertex of a field boundary.
///
/// Serialized as `{"lat": .., "lng": ..}`, which is the shape the portal frontend
/// draws with and the shape stored in a submission's `polygon` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate without checking ranges.
    ///
    /// Drawn polygons go through this path as-is; KML points and the
    /// center of the default square go through [`Coordinate::checked`].
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate only when both components are inside their ranges.
    /// `NaN` never satisfies a range, so it is rejected as well.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let coordinate = Self::new(lat, lng);
        coordinate.is_in_range().then_some(coordinate)
    }

    pub fn is_in_range(&self) -> bool {
        LAT_RANGE.contains(&self.lat) && LNG_RANGE.contains(&self.lng)
    }
}
