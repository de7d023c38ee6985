//! Vector overlays (coastlines, land masses) read from GeoJSON.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RenderError, RenderResult};

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point,
    MultiPoint,
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

/// Lon/lat polylines for stroking and outer rings for filling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub lines: Vec<Vec<(f64, f64)>>,
    pub polygons: Vec<Vec<(f64, f64)>>,
}

impl Overlay {
    /// Parse a `FeatureCollection`, a single `Feature` or a bare geometry.
    pub fn from_geojson(text: &str) -> RenderResult<Self> {
        let doc: Value = serde_json::from_str(text)?;
        let mut overlay = Overlay::default();
        overlay.add_object(doc)?;
        debug!(
            lines = overlay.lines.len(),
            polygons = overlay.polygons.len(),
            "Parsed GeoJSON overlay"
        );
        Ok(overlay)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.polygons.is_empty()
    }

    fn add_object(&mut self, value: Value) -> RenderResult<()> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| RenderError::style("GeoJSON object without \"type\""))?
            .to_string();

        match kind.as_str() {
            "FeatureCollection" => {
                let features = match value.get("features") {
                    Some(Value::Array(features)) => features.clone(),
                    _ => return Err(RenderError::style("FeatureCollection without \"features\"")),
                };
                for feature in features {
                    self.add_object(feature)?;
                }
            }
            "Feature" => match value.get("geometry") {
                Some(Value::Null) | None => {}
                Some(geometry) => self.add_object(geometry.clone())?,
            },
            _ => {
                let geometry: Geometry = serde_json::from_value(value)?;
                self.add_geometry(geometry);
            }
        }
        Ok(())
    }

    fn add_geometry(&mut self, geometry: Geometry) {
        match geometry {
            Geometry::Point | Geometry::MultiPoint => {}
            Geometry::LineString { coordinates } => self.lines.push(to_lonlat(&coordinates)),
            Geometry::MultiLineString { coordinates } => {
                self.lines.extend(coordinates.iter().map(|c| to_lonlat(c)))
            }
            Geometry::Polygon { coordinates } => self.add_polygon(&coordinates),
            Geometry::MultiPolygon { coordinates } => {
                for polygon in &coordinates {
                    self.add_polygon(polygon);
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    self.add_geometry(g);
                }
            }
        }
    }

    fn add_polygon(&mut self, rings: &[Vec<Position>]) {
        if let Some(outer) = rings.first() {
            self.polygons.push(to_lonlat(outer));
        }
        self.lines.extend(rings.iter().map(|r| to_lonlat(r)));
    }
}

fn to_lonlat(positions: &[Position]) -> Vec<(f64, f64)> {
    positions
        .iter()
        .filter_map(|p| match p.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect()
}

/// Read an overlay file. Errors name the offending path.
pub fn load_geojson(path: &Path) -> RenderResult<Overlay> {
    let text = std::fs::read_to_string(path)?;
    let overlay = Overlay::from_geojson(&text)
        .map_err(|e| RenderError::style(format!("{}: {}", path.display(), e)))?;
    if overlay.is_empty() {
        warn!(path = %path.display(), "GeoJSON overlay has no line or polygon geometry");
    }
    Ok(overlay)
}
