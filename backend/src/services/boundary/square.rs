use super::error::ResolveError;
use common::model::boundary::Boundary;
use common::model::coordinate::Coordinate;
use common::model::submission::CenterValue;

/// Half the side of the default square, in degrees (about 500 m).
pub const DEFAULT_HALF_WIDTH_DEG: f64 = 0.005;

/// Closed five-vertex square centered on `center`, starting and ending at
/// the south-west corner and going east first.
pub fn square_around(center: Coordinate, half_width: f64) -> Boundary {
    let Coordinate { lat, lng } = center;
    let o = half_width;
    Boundary::from(vec![
        Coordinate::new(lat - o, lng - o),
        Coordinate::new(lat - o, lng + o),
        Coordinate::new(lat + o, lng + o),
        Coordinate::new(lat + o, lng - o),
        Coordinate::new(lat - o, lng - o),
    ])
}

/// Builds the fallback square from the submitted center point.
///
/// No center at all is `Ok(None)`. A center that is half missing, not
/// numeric or out of range is an error.
pub fn default_square(
    lat: Option<&CenterValue>,
    lng: Option<&CenterValue>,
) -> Result<Option<Boundary>, ResolveError> {
    if lat.is_none() && lng.is_none() {
        return Ok(None);
    }
    let center = lat
        .and_then(CenterValue::to_f64)
        .zip(lng.and_then(CenterValue::to_f64))
        .and_then(|(lat, lng)| Coordinate::checked(lat, lng))
        .ok_or_else(|| ResolveError::InvalidCenterCoordinate {
            lat: describe(lat),
            lng: describe(lng),
        })?;
    Ok(Some(square_around(center, DEFAULT_HALF_WIDTH_DEG)))
}

fn describe(value: Option<&CenterValue>) -> String {
    match value {
        Some(CenterValue::Number(n)) => n.to_string(),
        Some(CenterValue::Text(t)) => t.clone(),
        None => "<missing>".to_string(),
    }
}
