//! # Field Boundary Service
//!
//! Resolves the canonical boundary of a submitted field and exposes it under
//! `/api/fields`.
//!
//! ## Sub-modules:
//! - `resolver`: the priority cascade (KML, drawn polygon, default square).
//! - `kml`: tiered coordinate search in uploaded KML documents.
//! - `coordinates`: KML `lng,lat[,alt]` text decoding and encoding.
//! - `drawn`: decoding of the polygon drawn on the map.
//! - `square`: the fallback square around the center point.
//! - `observer`: injectable diagnostics for the resolver.
//! - `intake`: HTTP handlers turning requests into typed submissions.

pub mod coordinates;
pub mod drawn;
pub mod error;
pub mod intake;
pub mod kml;
pub mod observer;
pub mod resolver;
pub mod square;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/fields";

/// Configures and returns the Actix `Scope` for boundary routes.
///
/// # Registered Routes:
///
/// *   **`POST /boundary`**: multipart form with optional `kml_file`,
///     `polygon`, `lat` and `lng` parts.
/// *   **`POST /boundary/json`**: JSON body with optional `polygon` (string or
///     list of `{lat, lng}`), `lat` and `lng`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/boundary", post().to(intake::process))
        .route("/boundary/json", post().to(intake::process_json))
}
