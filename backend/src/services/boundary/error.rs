use thiserror::Error;

/// Why a boundary source that was present could not be used.
///
/// These never leave the resolver: each one is reported to the observer and
/// the cascade moves on to the next source.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed KML file: {0}")]
    MalformedFile(String),

    #[error("malformed drawn polygon JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("invalid center coordinate: lat={lat:?}, lng={lng:?}")]
    InvalidCenterCoordinate { lat: String, lng: String },
}

impl ResolveError {
    pub fn malformed_file(msg: impl Into<String>) -> Self {
        Self::MalformedFile(msg.into())
    }
}

/// Why a single KML coordinate token was dropped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    #[error("expected at least longitude and latitude")]
    TooFewFields,

    #[error("longitude or latitude is not a number")]
    NotNumeric,

    #[error("lat={lat}, lng={lng} is outside the valid range")]
    OutOfRange { lat: f64, lng: f64 },
}
