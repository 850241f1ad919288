use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// WGS84 coordinate, spelled the way the Routes API expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat,lng` as accepted by the Maps web services query strings.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl From<LatLng> for geo_types::Point {
    fn from(value: LatLng) -> Self {
        geo_types::Point::new(value.longitude, value.latitude)
    }
}

impl From<&LatLng> for geo_types::Point {
    fn from(value: &LatLng) -> Self {
        geo_types::Point::new(value.longitude, value.latitude)
    }
}

impl From<geo_types::Coord> for LatLng {
    fn from(value: geo_types::Coord) -> Self {
        LatLng::new(value.y, value.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value() {
        let point = LatLng::new(40.7128, -74.006);
        assert_eq!(point.to_query_value(), "40.7128,-74.006");
    }

    #[test]
    fn test_point_is_lng_lat() {
        let point: geo_types::Point = LatLng::new(40.7128, -74.006).into();
        assert_eq!(point.x(), -74.006);
        assert_eq!(point.y(), 40.7128);

        let back = LatLng::from(point.0);
        assert_eq!(back, LatLng::new(40.7128, -74.006));
    }

    #[test]
    fn test_serializes_as_routes_api_lat_lng() {
        let json = serde_json::to_value(LatLng::new(1.5, 2.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "latitude": 1.5, "longitude": 2.5 }));
    }
}
