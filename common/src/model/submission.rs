//! Typed view of the boundary-related part of a field submission.
//!
//! A submission may carry any combination of a KML upload, a drawn polygon and
//! a center point. The transport layer fills a [`SubmissionInput`] and hands it
//! to the boundary resolver; no untyped field access happens past that point.

use crate::model::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Seek, SeekFrom};

/// Every boundary source a single submission request may supply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionInput {
    pub kml_file: Option<KmlUpload>,
    pub drawn_polygon: Option<DrawnPolygon>,
    pub center_lat: Option<CenterValue>,
    pub center_lng: Option<CenterValue>,
}

/// Raw bytes of an uploaded KML boundary file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlUpload {
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

impl KmlUpload {
    pub fn new(file_name: Option<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name,
            content: content.into(),
        }
    }

    /// Reads the whole upload from `reader`, then rewinds it to the start so
    /// the same handle can be stored afterwards.
    pub fn from_reader<R: Read + Seek>(file_name: Option<String>, reader: &mut R) -> io::Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(Self { file_name, content })
    }
}

/// A polygon drawn on the map, either still JSON-encoded or already decoded.
///
/// Structured JSON that is not a list of `{lat, lng}` objects is kept as
/// `Unrecognized` so the request still deserializes; the resolver then treats
/// it as malformed and moves on to the next source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrawnPolygon {
    Raw(String),
    Points(Vec<Coordinate>),
    Unrecognized(serde_json::Value),
}

/// A center latitude or longitude as it arrived: form fields are text, JSON
/// bodies may carry either numbers or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterValue {
    Number(f64),
    Text(String),
}

impl CenterValue {
    /// Converts to a float. Text is trimmed before parsing.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CenterValue::Number(value) => Some(*value),
            CenterValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<f64> for CenterValue {
    fn from(value: f64) -> Self {
        CenterValue::Number(value)
    }
}

impl From<&str> for CenterValue {
    fn from(value: &str) -> Self {
        CenterValue::Text(value.to_string())
    }
}
