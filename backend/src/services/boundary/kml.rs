//! Boundary extraction from uploaded KML files.
//!
//! Coordinates are searched in tiers, most specific first. Every matching
//! element of a tier contributes its points; the first tier that yields at
//! least one valid point wins. A tier whose elements exist but hold no valid
//! points falls through to the next tier.

use super::coordinates::decode_coordinate_text_with;
use super::error::{ResolveError, TokenError};
use common::model::boundary::Boundary;
use roxmltree::{Document, Node, ParsingOptions};

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// `Polygon/outerBoundaryIs/LinearRing/coordinates`
    PolygonOuterRing,
    /// `LineString/coordinates`
    LineString,
    /// `Point/coordinates`
    Point,
    /// Any element whose local name ends in `coordinates`, in any namespace.
    AnyCoordinates,
}

impl Tier {
    const ORDER: [Tier; 4] = [
        Tier::PolygonOuterRing,
        Tier::LineString,
        Tier::Point,
        Tier::AnyCoordinates,
    ];

    fn text_blocks(self, doc: &Document) -> Vec<String> {
        let nodes: Vec<Node> = match self {
            Tier::PolygonOuterRing => doc
                .descendants()
                .filter(|n| is_kml(n, "Polygon"))
                .filter_map(|polygon| {
                    kml_children(polygon, "outerBoundaryIs")
                        .flat_map(|outer| kml_children(outer, "LinearRing"))
                        .flat_map(|ring| kml_children(ring, "coordinates"))
                        .next()
                })
                .collect(),
            Tier::LineString => coordinates_under(doc, "LineString"),
            Tier::Point => coordinates_under(doc, "Point"),
            Tier::AnyCoordinates => doc
                .descendants()
                .filter(|n| n.is_element() && n.tag_name().name().ends_with("coordinates"))
                .collect(),
        };

        nodes
            .into_iter()
            .map(element_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Concatenated text children of an element; comments and nested elements
/// are skipped.
fn element_text(node: Node) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

fn is_kml(node: &Node, name: &str) -> bool {
    node.has_tag_name((KML_NAMESPACE, name))
}

fn kml_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_kml(n, name))
}

fn coordinates_under<'a, 'input>(doc: &'a Document<'input>, parent: &str) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| is_kml(n, parent))
        .flat_map(|n| kml_children(n, "coordinates"))
        .collect()
}

/// Extracts a boundary from raw KML bytes.
///
/// Returns `Ok(None)` when the document is well formed but holds no valid
/// coordinates in any tier.
pub fn extract_kml_boundary(
    content: &[u8],
    mut on_reject: impl FnMut(&str, &TokenError),
) -> Result<Option<Boundary>, ResolveError> {
    let text = std::str::from_utf8(content)
        .map_err(|e| ResolveError::malformed_file(format!("not valid UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| ResolveError::malformed_file(e.to_string()))?;

    for tier in Tier::ORDER {
        let points: Vec<_> = tier
            .text_blocks(&doc)
            .into_iter()
            .flat_map(|block| decode_coordinate_text_with(&block, &mut on_reject))
            .collect();
        if !points.is_empty() {
            return Ok(Some(Boundary::from(points)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::coordinate::Coordinate;

    fn kml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{}</Document></kml>"#,
            body
        )
    }

    fn extract(content: &str) -> Option<Vec<Coordinate>> {
        extract_kml_boundary(content.as_bytes(), |_, _| {})
            .unwrap()
            .map(Boundary::into_points)
    }

    const POLYGON: &str = r#"<Placemark><Polygon><outerBoundaryIs><LinearRing><coordinates>
        20.0,10.0,0 20.1,10.0,0 20.1,10.1,0 20.0,10.0,0
    </coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>"#;

    #[test]
    fn polygon_outer_ring_in_file_order() {
        let points = extract(&kml(POLYGON)).unwrap();
        assert_eq!(
            points,
            vec![
                Coordinate::new(10.0, 20.0),
                Coordinate::new(10.0, 20.1),
                Coordinate::new(10.1, 20.1),
                Coordinate::new(10.0, 20.0),
            ]
        );
    }

    #[test]
    fn inner_rings_are_ignored() {
        let body = r#"<Polygon>
            <outerBoundaryIs><LinearRing><coordinates>1,1 2,2</coordinates></LinearRing></outerBoundaryIs>
            <innerBoundaryIs><LinearRing><coordinates>5,5 6,6</coordinates></LinearRing></innerBoundaryIs>
        </Polygon>"#;
        let points = extract(&kml(body)).unwrap();
        assert_eq!(points, vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);
    }

    #[test]
    fn all_polygons_of_the_tier_are_accumulated() {
        let body = r#"<Polygon><outerBoundaryIs><LinearRing><coordinates>1,1</coordinates></LinearRing></outerBoundaryIs></Polygon>
            <Polygon><outerBoundaryIs><LinearRing><coordinates>2,2</coordinates></LinearRing></outerBoundaryIs></Polygon>
            <LineString><coordinates>3,3</coordinates></LineString>"#;
        let points = extract(&kml(body)).unwrap();
        assert_eq!(points, vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);
    }

    #[test]
    fn polygon_beats_linestring_and_point() {
        let body = format!(
            "<Point><coordinates>9,9</coordinates></Point><LineString><coordinates>8,8</coordinates></LineString>{}",
            POLYGON
        );
        assert_eq!(extract(&kml(&body)).unwrap().len(), 4);
    }

    #[test]
    fn linestring_then_point_tiers() {
        let line = kml("<LineString><coordinates>1,2 3,4</coordinates></LineString><Point><coordinates>5,6</coordinates></Point>");
        assert_eq!(
            extract(&line).unwrap(),
            vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
        );

        let point = kml("<Point><coordinates>5,6,0</coordinates></Point>");
        assert_eq!(extract(&point).unwrap(), vec![Coordinate::new(6.0, 5.0)]);
    }

    #[test]
    fn empty_polygon_tier_falls_through_to_point() {
        let body = r#"<Polygon><outerBoundaryIs><LinearRing><coordinates>999,999 abc</coordinates></LinearRing></outerBoundaryIs></Polygon>
            <Point><coordinates>5,6</coordinates></Point>"#;
        assert_eq!(extract(&kml(body)).unwrap(), vec![Coordinate::new(6.0, 5.0)]);
    }

    #[test]
    fn documents_without_namespace_use_the_last_tier() {
        let doc = "<kml><Placemark><Polygon><outerBoundaryIs><LinearRing><coordinates>1,2 3,4</coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark></kml>";
        assert_eq!(
            extract(doc).unwrap(),
            vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
        );
    }

    #[test]
    fn foreign_namespace_coordinates_are_found_by_local_name() {
        let doc = r#"<root xmlns:g="urn:example"><g:coordinates>7,8</g:coordinates></root>"#;
        assert_eq!(extract(doc).unwrap(), vec![Coordinate::new(8.0, 7.0)]);
    }

    #[test]
    fn document_without_valid_points_yields_none() {
        assert!(extract(&kml("<Placemark><name>empty</name></Placemark>")).is_none());
        assert!(extract(&kml("<Point><coordinates>500,500</coordinates></Point>")).is_none());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = extract_kml_boundary(b"<kml><Polygon>", |_, _| {}).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedFile(_)));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = extract_kml_boundary(&[0x3c, 0xff, 0xfe, 0x3e], |_, _| {}).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedFile(_)));
    }

    #[test]
    fn byte_order_mark_is_tolerated() {
        let content = format!("\u{feff}{}", kml("<Point><coordinates>1,2</coordinates></Point>"));
        assert_eq!(extract(&content).unwrap(), vec![Coordinate::new(2.0, 1.0)]);
    }

    #[test]
    fn doctype_declaration_is_accepted() {
        let content = format!(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE kml>\n<kml xmlns=\"{}\"><Point><coordinates>1,2</coordinates></Point></kml>",
            KML_NAMESPACE
        );
        assert_eq!(extract(&content).unwrap(), vec![Coordinate::new(2.0, 1.0)]);
    }

    #[test]
    fn comments_inside_coordinates_are_skipped() {
        let leading = kml("<Point><coordinates><!-- c -->1,2</coordinates></Point>");
        assert_eq!(extract(&leading).unwrap(), vec![Coordinate::new(2.0, 1.0)]);

        let between = kml("<LineString><coordinates>1,2 <!-- gap --> 3,4</coordinates></LineString>");
        assert_eq!(
            extract(&between).unwrap(),
            vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
        );
    }

    #[test]
    fn rejected_tokens_are_reported() {
        let mut rejected = Vec::new();
        let content = kml("<Point><coordinates>1,2 200,2</coordinates></Point>");
        extract_kml_boundary(content.as_bytes(), |token, _| rejected.push(token.to_string())).unwrap();
        assert_eq!(rejected, vec!["200,2".to_string()]);
    }
}
