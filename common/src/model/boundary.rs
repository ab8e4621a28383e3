//! The canonical field boundary stored with a submission.
//!
//! Whatever the client sent (a KML file, a drawn polygon, or only a center
//! point), the backend reduces it to one [`Boundary`]. The boundary is
//! computed once when the submission arrives and embedded verbatim into the
//! submission record's `polygon` attribute. An empty boundary is a valid
//! outcome, not an error.

use crate::model::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Ordered ring of vertices delimiting a field.
///
/// Serializes transparently as a JSON array of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boundary(Vec<Coordinate>);

impl Boundary {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    /// True when the ring starts and ends on the same vertex.
    ///
    /// Only the default square guarantees this; KML and drawn polygons are
    /// stored as received.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.0
    }
}

impl From<Vec<Coordinate>> for Boundary {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

/// Which input produced the resolved boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySource {
    /// Coordinates extracted from the uploaded KML file.
    Kml,
    /// The polygon the user drew on the map.
    DrawnPolygon,
    /// Square generated around the submitted center point.
    DefaultSquare,
    /// Nothing usable was supplied; the boundary is empty.
    None,
}

/// A resolved boundary together with the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub boundary: Boundary,
    pub source: BoundarySource,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self {
            boundary: Boundary::empty(),
            source: BoundarySource::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_ring_detection() {
        let open = Boundary::from(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
        let closed = Boundary::from(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]);
        assert!(!open.is_closed());
        assert!(closed.is_closed());
        assert!(!Boundary::empty().is_closed());
    }

    #[test]
    fn serializes_as_plain_array() {
        let boundary = Boundary::from(vec![Coordinate::new(10.0, 20.0)]);
        let json = serde_json::to_string(&boundary).unwrap();
        assert_eq!(json, r#"[{"lat":10.0,"lng":20.0}]"#);
        assert_eq!(serde_json::to_string(&Boundary::empty()).unwrap(), "[]");
    }

    #[test]
    fn source_uses_snake_case() {
        let json = serde_json::to_string(&BoundarySource::DefaultSquare).unwrap();
        assert_eq!(json, r#""default_square""#);
    }
}
