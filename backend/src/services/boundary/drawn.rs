use super::error::ResolveError;
use common::model::boundary::Boundary;
use common::model::coordinate::Coordinate;
use common::model::submission::DrawnPolygon;

/// Turns the drawn polygon into a boundary.
///
/// Points are taken exactly as drawn: unlike KML points they are not range
/// checked. Blank text and an empty list count as "no polygon".
pub fn decode_drawn_polygon(polygon: &DrawnPolygon) -> Result<Option<Boundary>, ResolveError> {
    let points = match polygon {
        DrawnPolygon::Raw(text) if text.trim().is_empty() => return Ok(None),
        DrawnPolygon::Raw(text) => serde_json::from_str::<Vec<Coordinate>>(text)?,
        DrawnPolygon::Points(points) => points.clone(),
        DrawnPolygon::Unrecognized(value) => {
            serde_json::from_value::<Vec<Coordinate>>(value.clone())?
        }
    };
    Ok((!points.is_empty()).then(|| Boundary::from(points)))
}
