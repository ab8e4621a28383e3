//! Wire types for the boundary intake endpoints.

use crate::model::boundary::{Boundary, BoundarySource, Resolution};
use crate::model::submission::{CenterValue, DrawnPolygon, SubmissionInput};
use serde::{Deserialize, Serialize};

/// Multipart part and JSON key names used by the submission form.
pub mod fields {
    pub const KML_FILE: &str = "kml_file";
    pub const POLYGON: &str = "polygon";
    pub const LAT: &str = "lat";
    pub const LNG: &str = "lng";
}

/// JSON body accepted by `POST /api/fields/boundary/json`.
///
/// KML files only travel through the multipart endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub polygon: Option<DrawnPolygon>,
    #[serde(default)]
    pub lat: Option<CenterValue>,
    #[serde(default)]
    pub lng: Option<CenterValue>,
}

impl From<SubmissionRequest> for SubmissionInput {
    fn from(req: SubmissionRequest) -> Self {
        SubmissionInput {
            kml_file: None,
            drawn_polygon: req.polygon,
            center_lat: req.lat,
            center_lng: req.lng,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryResponse {
    pub polygon: Boundary,
    pub polygon_points: usize,
    pub source: BoundarySource,
    /// Hex MD5 of the uploaded KML file, when one was sent.
    pub kml_md5: Option<String>,
}

impl BoundaryResponse {
    pub fn new(resolution: Resolution, kml_md5: Option<String>) -> Self {
        Self {
            polygon_points: resolution.boundary.len(),
            polygon: resolution.boundary,
            source: resolution.source,
            kml_md5,
        }
    }
}
