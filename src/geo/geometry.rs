//! Geometry values, serialized exactly like GeoJSON geometry objects.
use serde::{Deserialize, Serialize};

/// An x/y coordinate pair.
pub type Coord = [f64; 2];

/// A geometry value. The serde representation matches GeoJSON:
/// `{"type": "Point", "coordinates": [x, y]}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    Polygon(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
}

impl Geometry {
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_serializes_like_geojson() {
        let g = Geometry::Point([-122.65, 45.52]);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Point", "coordinates": [-122.65, 45.52]})
        );
    }

    #[test]
    fn polygon_round_trips() {
        let g = Geometry::Polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ]]);
        let json = serde_json::to_string(&g).unwrap();
        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
        assert_eq!(back.geometry_type(), "Polygon");
    }

    #[test]
    fn geojson_text_deserializes() {
        let back: Geometry =
            serde_json::from_str(r#"{"type":"LineString","coordinates":[[0.0,0.0],[2.0,3.0]]}"#)
                .unwrap();
        assert_eq!(
            back,
            Geometry::LineString(vec![[0.0, 0.0], [2.0, 3.0]])
        );
    }
}
