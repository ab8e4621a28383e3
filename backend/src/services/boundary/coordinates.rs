//! KML coordinate text.
//!
//! A `<coordinates>` block is a whitespace-separated list of tuples written
//! `longitude,latitude[,altitude]`. Longitude comes first, the reverse of the
//! `{lat, lng}` order used everywhere else in the portal.

use super::error::TokenError;
use common::model::coordinate::Coordinate;

/// Decodes one `lng,lat[,alt]` tuple. Altitude and any further fields are ignored.
pub fn decode_token(token: &str) -> Result<Coordinate, TokenError> {
    let mut fields = token.split(',');
    let (Some(lng), Some(lat)) = (fields.next(), fields.next()) else {
        return Err(TokenError::TooFewFields);
    };
    let lng: f64 = lng.parse().map_err(|_| TokenError::NotNumeric)?;
    let lat: f64 = lat.parse().map_err(|_| TokenError::NotNumeric)?;
    Coordinate::checked(lat, lng).ok_or(TokenError::OutOfRange { lat, lng })
}

/// Decodes a coordinate block, calling `on_reject` for each dropped token.
/// Output keeps the order of the accepted tokens.
pub fn decode_coordinate_text_with(
    text: &str,
    mut on_reject: impl FnMut(&str, &TokenError),
) -> Vec<Coordinate> {
    text.split_whitespace()
        .filter_map(|token| match decode_token(token) {
            Ok(coordinate) => Some(coordinate),
            Err(err) => {
                on_reject(token, &err);
                None
            }
        })
        .collect()
}

pub fn decode_coordinate_text(text: &str) -> Vec<Coordinate> {
    decode_coordinate_text_with(text, |_, _| {})
}

/// Writes coordinates back in KML order, one `lng,lat` tuple per point.
pub fn encode_coordinate_text(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.lng, p.lat))
        .collect::<Vec<_>>()
        .join(" ")
}
