//! Field intake backend for the crop-field registration portal.
//!
//! Submissions describe a field in one of three ways: an uploaded KML file, a
//! polygon drawn on the map, or just a center coordinate. This crate reduces
//! them to one canonical boundary (see [`services::boundary::resolver`]) and
//! serves that resolution over HTTP.

pub mod config;
pub mod services;
