//! # Boundary Resolver
//!
//! Reduces a [`SubmissionInput`] to the single boundary stored with a field
//! submission. Sources are tried in a fixed order and the first one that
//! yields at least one point wins; sources are never merged:
//!
//! 1. **KML**: coordinates extracted from the uploaded file (see `kml`).
//! 2. **Drawn polygon**: the polygon drawn on the map, JSON text or list.
//! 3. **Default square**: a 0.005° half-width square around the center point.
//!
//! A source that is present but unusable (malformed XML, malformed JSON, a
//! non-numeric center) is reported to the [`ResolveObserver`] and skipped.
//! When no source yields anything the result is an empty boundary. Nothing
//! here returns an error to the caller.

use super::drawn::decode_drawn_polygon;
use super::error::ResolveError;
use super::kml::extract_kml_boundary;
use super::observer::{LogObserver, ResolveObserver};
use super::square::default_square;
use common::model::boundary::{Boundary, BoundarySource, Resolution};
use common::model::submission::SubmissionInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Kml,
    DrawnPolygon,
    DefaultSquare,
}

impl Strategy {
    /// Priority order; the first non-empty result wins.
    pub const CASCADE: [Strategy; 3] = [Strategy::Kml, Strategy::DrawnPolygon, Strategy::DefaultSquare];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Kml => "kml",
            Strategy::DrawnPolygon => "drawn_polygon",
            Strategy::DefaultSquare => "default_square",
        }
    }

    pub fn source(self) -> BoundarySource {
        match self {
            Strategy::Kml => BoundarySource::Kml,
            Strategy::DrawnPolygon => BoundarySource::DrawnPolygon,
            Strategy::DefaultSquare => BoundarySource::DefaultSquare,
        }
    }

    fn attempt<O: ResolveObserver>(
        self,
        input: &SubmissionInput,
        observer: &O,
    ) -> Result<Option<Boundary>, ResolveError> {
        match self {
            Strategy::Kml => match &input.kml_file {
                Some(upload) => extract_kml_boundary(&upload.content, |token, err| {
                    observer.token_rejected(token, err)
                }),
                None => Ok(None),
            },
            Strategy::DrawnPolygon => match &input.drawn_polygon {
                Some(polygon) => decode_drawn_polygon(polygon),
                None => Ok(None),
            },
            Strategy::DefaultSquare => {
                default_square(input.center_lat.as_ref(), input.center_lng.as_ref())
            }
        }
    }
}

/// Runs the strategy cascade, reporting diagnostics to an injected observer.
#[derive(Debug, Clone, Default)]
pub struct BoundaryResolver<O = LogObserver> {
    observer: O,
}

impl BoundaryResolver<LogObserver> {
    pub fn new() -> Self {
        Self::with_observer(LogObserver)
    }
}

impl<O: ResolveObserver> BoundaryResolver<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Resolves the boundary and reports which source produced it.
    pub fn resolve(&self, input: &SubmissionInput) -> Resolution {
        let resolution = Strategy::CASCADE
            .into_iter()
            .find_map(|strategy| {
                match strategy.attempt(input, &self.observer) {
                    Ok(Some(boundary)) if !boundary.is_empty() => {
                        return Some(Resolution {
                            boundary,
                            source: strategy.source(),
                        });
                    }
                    Ok(_) => self.observer.strategy_empty(strategy),
                    Err(err) => self.observer.strategy_failed(strategy, &err),
                }
                None
            })
            .unwrap_or_else(Resolution::unresolved);
        self.observer.resolved(&resolution);
        resolution
    }

    pub fn resolve_boundary(&self, input: &SubmissionInput) -> Boundary {
        self.resolve(input).boundary
    }
}

/// Resolves a boundary with the default logging observer.
pub fn resolve_boundary(input: &SubmissionInput) -> Boundary {
    BoundaryResolver::new().resolve_boundary(input)
}
