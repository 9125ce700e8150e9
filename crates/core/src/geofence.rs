//! Point-in-polygon evaluation for predicted spread areas.
//!
//! Coordinates are `(longitude, latitude)` pairs, matching GeoJSON position
//! order. Ring closure is implicit: the last vertex connects back to the
//! first, and a duplicated closing vertex is harmless.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum vertex count for a ring to enclose any area.
pub const MIN_POLYGON_VERTICES: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A `(longitude, latitude)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Construct a point, rejecting NaN and infinite coordinates.
    pub fn try_new(longitude: f64, latitude: f64) -> Result<Self, CoreError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoreError::Validation(format!(
                "coordinates must be finite, got ({longitude}, {latitude})"
            )));
        }
        Ok(Self::new(longitude, latitude))
    }
}

/// A single ring of vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoPolygon {
    vertices: Vec<GeoPoint>,
}

impl GeoPolygon {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the ring has enough vertices to enclose anything.
    pub fn is_well_formed(&self) -> bool {
        self.vertices.len() >= MIN_POLYGON_VERTICES
    }

    /// Whether `point` lies inside this ring. See [`point_in_polygon`].
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point_in_polygon(point, self)
    }
}

impl FromIterator<GeoPoint> for GeoPolygon {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Ray casting
// ---------------------------------------------------------------------------

/// Ray-casting containment test.
///
/// Casts a ray from `point` towards increasing longitude and toggles
/// `inside` for every edge that straddles the point's latitude and crosses
/// to the right of it. Rings with fewer than three vertices contain
/// nothing.
///
/// Points exactly on an edge are not special-cased: with the half-open
/// straddle test, points on left or bottom edges of an axis-aligned
/// rectangle report inside and points on right or top edges report
/// outside. Non-finite points report outside.
pub fn point_in_polygon(point: &GeoPoint, polygon: &GeoPolygon) -> bool {
    let vertices = polygon.vertices();
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    let (px, py) = (point.longitude, point.latitude);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for (i, vi) in vertices.iter().enumerate() {
        let vj = &vertices[j];
        let (xi, yi) = (vi.longitude, vi.latitude);
        let (xj, yj) = (vj.longitude, vj.latitude);

        // Straddling implies yi != yj, so the division is safe.
        if (yi > py) != (yj > py) {
            let crossing_x = (xj - xi) * (py - yi) / (yj - yi) + xi;
            if px < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

// ---------------------------------------------------------------------------
// GeoJSON intake
// ---------------------------------------------------------------------------

/// GeoJSON `Polygon` geometry: outer ring first, then any holes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

/// GeoJSON `Feature` wrapping a polygon geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub properties: serde_json::Value,
    pub geometry: GeoJsonPolygon,
}

impl TryFrom<&GeoJsonPolygon> for GeoPolygon {
    type Error = CoreError;

    /// Uses the outer ring only; holes are ignored.
    fn try_from(geometry: &GeoJsonPolygon) -> Result<Self, Self::Error> {
        if geometry.geometry_type != "Polygon" {
            return Err(CoreError::Validation(format!(
                "expected Polygon geometry, got '{}'",
                geometry.geometry_type
            )));
        }
        let ring = geometry
            .coordinates
            .first()
            .ok_or_else(|| CoreError::Validation("polygon has no rings".to_string()))?;

        ring.iter()
            .enumerate()
            .map(|(idx, position)| match position.as_slice() {
                [lon, lat, ..] => GeoPoint::try_new(*lon, *lat),
                _ => Err(CoreError::Validation(format!(
                    "position {idx} must have at least two coordinates"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(GeoPolygon::new)
    }
}

impl TryFrom<&GeoJsonFeature> for GeoPolygon {
    type Error = CoreError;

    fn try_from(feature: &GeoJsonFeature) -> Result<Self, Self::Error> {
        GeoPolygon::try_from(&feature.geometry)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn polygon(coords: &[(f64, f64)]) -> GeoPolygon {
        coords.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect()
    }

    fn square() -> GeoPolygon {
        polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    /// Spread area from the SO2 prediction around the refinery complex.
    fn refinery_plume() -> GeoPolygon {
        polygon(&[
            (77.2020, 28.6080),
            (77.2150, 28.6120),
            (77.2200, 28.6050),
            (77.2180, 28.5980),
            (77.2050, 28.6000),
            (77.2020, 28.6080),
        ])
    }

    #[test]
    fn square_contains_center() {
        assert!(point_in_polygon(&GeoPoint::new(5.0, 5.0), &square()));
    }

    #[test]
    fn square_excludes_outside_points() {
        assert!(!point_in_polygon(&GeoPoint::new(15.0, 15.0), &square()));
        assert!(!point_in_polygon(&GeoPoint::new(-1.0, -1.0), &square()));
        assert!(!point_in_polygon(&GeoPoint::new(5.0, 11.0), &square()));
        assert!(!point_in_polygon(&GeoPoint::new(-0.5, 5.0), &square()));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        let rings = [
            GeoPolygon::default(),
            polygon(&[(0.0, 0.0)]),
            polygon(&[(-1.0, -1.0), (1.0, 1.0)]),
            polygon(&[(-2.0, 1.0), (2.0, -1.0)]),
        ];
        // Half-degree grid over [-3, 3] x [-3, 3].
        let grid = (-6..=6).flat_map(|x| {
            (-6..=6).map(move |y| GeoPoint::new(f64::from(x) * 0.5, f64::from(y) * 0.5))
        });
        for ring in &rings {
            let candidates = grid.clone().chain(ring.vertices().iter().copied());
            for p in candidates {
                assert!(
                    !point_in_polygon(&p, ring),
                    "{} vertex ring contains ({}, {})",
                    ring.len(),
                    p.longitude,
                    p.latitude
                );
            }
        }
    }

    #[test]
    fn collinear_ring_contains_nothing() {
        let line = polygon(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        assert!(!point_in_polygon(&GeoPoint::new(5.0, 5.0), &line));
        assert!(!point_in_polygon(&GeoPoint::new(2.0, 3.0), &line));
    }

    #[test]
    fn triangle_containment() {
        let tri = polygon(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        assert!(point_in_polygon(&GeoPoint::new(5.0, 3.0), &tri));
        assert!(!point_in_polygon(&GeoPoint::new(0.0, 5.0), &tri));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening upwards; (5, 8) sits in the notch.
        let u = polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (7.0, 10.0),
            (7.0, 3.0),
            (3.0, 3.0),
            (3.0, 10.0),
            (0.0, 10.0),
        ]);
        assert!(!point_in_polygon(&GeoPoint::new(5.0, 8.0), &u));
        assert!(point_in_polygon(&GeoPoint::new(5.0, 1.0), &u));
        assert!(point_in_polygon(&GeoPoint::new(1.5, 8.0), &u));
    }

    #[test]
    fn closing_vertex_duplicate_does_not_change_result() {
        let open = square();
        let mut closed_vertices = open.vertices().to_vec();
        closed_vertices.push(closed_vertices[0]);
        let closed = GeoPolygon::new(closed_vertices);

        for x in -2..=12 {
            for y in -2..=12 {
                let p = GeoPoint::new(f64::from(x) + 0.5, f64::from(y) + 0.25);
                assert_eq!(point_in_polygon(&p, &open), point_in_polygon(&p, &closed));
            }
        }
    }

    #[test]
    fn result_is_invariant_under_rotation() {
        let base = refinery_plume();
        let points = [
            GeoPoint::new(77.2120, 28.6050),
            GeoPoint::new(77.2100, 28.6100),
            GeoPoint::new(77.2090, 28.6139),
            GeoPoint::new(77.2250, 28.6180),
            GeoPoint::new(77.2170, 28.6000),
        ];
        for shift in 0..base.len() {
            let mut rotated = base.vertices().to_vec();
            rotated.rotate_left(shift);
            let rotated = GeoPolygon::new(rotated);
            for p in &points {
                assert_eq!(
                    point_in_polygon(p, &base),
                    point_in_polygon(p, &rotated),
                    "rotation {shift} changed result for {p:?}"
                );
            }
        }
    }

    #[test]
    fn refinery_plume_containment() {
        let plume = refinery_plume();
        assert!(plume.contains(&GeoPoint::new(77.2120, 28.6050)));
        assert!(plume.contains(&GeoPoint::new(77.2100, 28.6100)));
        assert!(!plume.contains(&GeoPoint::new(77.2090, 28.6139)));
        assert!(!plume.contains(&GeoPoint::new(77.2250, 28.6180)));
    }

    #[test]
    fn boundary_behaviour_is_stable() {
        let sq = square();
        // Left and bottom edges report inside, right and top edges outside.
        assert!(point_in_polygon(&GeoPoint::new(0.0, 5.0), &sq));
        assert!(point_in_polygon(&GeoPoint::new(5.0, 0.0), &sq));
        assert!(!point_in_polygon(&GeoPoint::new(10.0, 5.0), &sq));
        assert!(!point_in_polygon(&GeoPoint::new(5.0, 10.0), &sq));
        assert!(point_in_polygon(&GeoPoint::new(0.0, 0.0), &sq));
    }

    #[test]
    fn non_finite_point_is_outside() {
        assert!(!point_in_polygon(&GeoPoint::new(f64::NAN, 5.0), &square()));
        assert!(!point_in_polygon(&GeoPoint::new(5.0, f64::NAN), &square()));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let p = GeoPoint::new(3.0, 7.0);
        let sq = square();
        assert_eq!(point_in_polygon(&p, &sq), point_in_polygon(&p, &sq));
    }

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(GeoPoint::try_new(77.2, 28.6).is_ok());
        assert_matches!(
            GeoPoint::try_new(f64::INFINITY, 28.6),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn geojson_feature_uses_outer_ring() {
        let feature: GeoJsonFeature = serde_json::from_value(serde_json::json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]],
                    [[4, 4], [4, 6], [6, 6], [6, 4], [4, 4]]
                ]
            }
        }))
        .unwrap();
        let poly = GeoPolygon::try_from(&feature).unwrap();
        assert_eq!(poly.len(), 5);
        // The hole is ignored.
        assert!(poly.contains(&GeoPoint::new(5.0, 5.0)));
    }

    #[test]
    fn geojson_rejects_short_positions() {
        let geometry = GeoJsonPolygon {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![vec![vec![0.0, 0.0], vec![1.0], vec![2.0, 2.0]]],
        };
        assert_matches!(
            GeoPolygon::try_from(&geometry),
            Err(CoreError::Validation(msg)) if msg.contains("position 1")
        );
    }

    #[test]
    fn geojson_rejects_missing_ring_and_wrong_type() {
        let empty = GeoJsonPolygon {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![],
        };
        assert!(GeoPolygon::try_from(&empty).is_err());

        let line = GeoJsonPolygon {
            geometry_type: "LineString".to_string(),
            coordinates: vec![vec![vec![0.0, 0.0], vec![1.0, 1.0]]],
        };
        assert!(GeoPolygon::try_from(&line).is_err());
    }

    #[test]
    fn serializes_as_plain_vertex_list() {
        let json = serde_json::to_value(polygon(&[(1.0, 2.0)])).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "longitude": 1.0, "latitude": 2.0 }])
        );
    }
}
