use commute_providers::lat_lng::LatLng;
use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DESTINATION_COLOR: &str = "#4285F4";
pub const DEFAULT_CENTER: LatLng = LatLng {
    latitude: 40.7128,
    longitude: -74.0060,
};
pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolylineId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Start,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub label: String,
    pub address: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePolyline {
    pub id: PolylineId,
    pub path: Vec<LatLng>,
    pub color: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
    /// Set once there is more than one marker to fit.
    pub bounds: Option<Bounds>,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            bounds: None,
        }
    }
}

/// Everything drawn on the map for one run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    markers: Vec<Marker>,
    polylines: Vec<RoutePolyline>,
    viewport: Viewport,
    #[serde(skip)]
    next_polyline_id: usize,
}

impl MapScene {
    /// Places a marker and returns the color it was drawn with. Destinations
    /// always use [`DESTINATION_COLOR`]; starting points use `color` or a
    /// random one.
    pub fn add_marker(
        &mut self,
        kind: MarkerKind,
        position: LatLng,
        label: impl Into<String>,
        address: impl Into<String>,
        color: Option<String>,
    ) -> String {
        let color = match kind {
            MarkerKind::Destination => DESTINATION_COLOR.to_string(),
            MarkerKind::Start => color.unwrap_or_else(random_hex_color),
        };

        self.markers.push(Marker {
            kind,
            position,
            label: label.into(),
            address: address.into(),
            color: color.clone(),
        });
        self.fit_bounds();

        color
    }

    pub fn draw_polyline(&mut self, path: Vec<LatLng>, color: impl Into<String>) -> PolylineId {
        let id = PolylineId(self.next_polyline_id);
        self.next_polyline_id += 1;

        self.polylines.push(RoutePolyline {
            id,
            path,
            color: color.into(),
            visible: true,
        });

        id
    }

    /// Returns false when the polyline is not part of this scene.
    pub fn set_polyline_visible(&mut self, id: PolylineId, visible: bool) -> bool {
        match self.polylines.iter_mut().find(|polyline| polyline.id == id) {
            Some(polyline) => {
                polyline.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn polylines(&self) -> &[RoutePolyline] {
        &self.polylines
    }

    pub fn polyline(&self, id: PolylineId) -> Option<&RoutePolyline> {
        self.polylines.iter().find(|polyline| polyline.id == id)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.polylines.clear();
        self.viewport = Viewport::default();
    }

    fn fit_bounds(&mut self) {
        if self.markers.len() < 2 {
            return;
        }

        let points: MultiPoint = self
            .markers
            .iter()
            .map(|marker| Point::from(marker.position))
            .collect();

        if let Some(rect) = points.bounding_rect() {
            let center = rect.center();
            self.viewport.center = LatLng::from(center);
            self.viewport.bounds = Some(Bounds {
                south_west: LatLng::from(rect.min()),
                north_east: LatLng::from(rect.max()),
            });
            debug!(bounds = ?self.viewport.bounds, "Fitted map bounds");
        }
    }

    /// Markers as points and visible routes as line strings.
    pub fn to_geojson(&self) -> GeoJson {
        let markers = self.markers.iter().map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert(
                "kind".to_string(),
                serde_json::to_value(marker.kind).unwrap_or(Value::Null),
            );
            properties.insert("label".to_string(), Value::from(marker.label.clone()));
            properties.insert("address".to_string(), Value::from(marker.address.clone()));
            properties.insert("color".to_string(), Value::from(marker.color.clone()));

            Feature {
                geometry: Some(Geometry::new(geojson::Value::Point(vec![
                    marker.position.longitude,
                    marker.position.latitude,
                ]))),
                properties: Some(properties),
                id: None,
                bbox: None,
                foreign_members: None,
            }
        });

        let polylines = self
            .polylines
            .iter()
            .filter(|polyline| polyline.visible)
            .map(|polyline| {
                let mut properties = JsonObject::new();
                properties.insert("color".to_string(), Value::from(polyline.color.clone()));

                let points = polyline
                    .path
                    .iter()
                    .map(|point| vec![point.longitude, point.latitude])
                    .collect();

                Feature {
                    geometry: Some(Geometry::new(geojson::Value::LineString(points))),
                    properties: Some(properties),
                    id: None,
                    bbox: None,
                    foreign_members: None,
                }
            });

        GeoJson::FeatureCollection(FeatureCollection {
            features: markers.chain(polylines).collect(),
            bbox: None,
            foreign_members: None,
        })
    }
}

pub fn random_hex_color() -> String {
    let value: u32 = rand::rng().random_range(0..=0xFF_FFFF);
    format!("#{:06x}", value)
}
