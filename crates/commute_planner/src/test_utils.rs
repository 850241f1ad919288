use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use commute_providers::{
    directions_api::{DirectionsRequest, DirectionsRoute, DirectionsService},
    geocoding_api::Geocoder,
    google_api::GoogleApiError,
    lat_lng::LatLng,
    routes_api::{Route, RouteRequest, RouteService, RoutesApiError, RoutesResponse},
};
use parking_lot::Mutex;
use serde_json::Value;

pub const ENCODED_PATH: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

pub fn primary_route(seconds: u64, meters: u64) -> Route {
    serde_json::from_value(serde_json::json!({
        "duration": format!("{}s", seconds),
        "distanceMeters": meters,
        "polyline": { "encodedPolyline": ENCODED_PATH }
    }))
    .unwrap()
}

pub fn directions_route(duration: &str, distance: &str) -> DirectionsRoute {
    serde_json::from_value(serde_json::json!({
        "overview_polyline": { "points": ENCODED_PATH },
        "legs": [{
            "duration": { "text": duration, "value": 0.0 },
            "distance": { "text": distance, "value": 0.0 }
        }]
    }))
    .unwrap()
}

/// Geocoder backed by a fixed address book. Unknown addresses get
/// `ZERO_RESULTS`.
#[derive(Default)]
pub struct FakeGeocoder {
    locations: HashMap<String, LatLng>,
    statuses: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, location: LatLng) -> Self {
        self.locations.insert(address.to_string(), location);
        self
    }

    pub fn with_status(mut self, address: &str, status: &str) -> Self {
        self.statuses.insert(address.to_string(), status.to_string());
        self
    }

    pub fn with_delay(mut self, address: &str, delay: Duration) -> Self {
        self.delays.insert(address.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<LatLng, GoogleApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(address) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(status) = self.statuses.get(address) {
            return Err(GoogleApiError::Status(status.clone()));
        }

        self.locations
            .get(address)
            .copied()
            .ok_or_else(|| GoogleApiError::Status("ZERO_RESULTS".to_string()))
    }
}

enum RoutesScript {
    Route(Route),
    Empty,
    Api {
        status: u16,
        error: String,
        details: Option<Value>,
    },
}

pub struct FakeRoutes {
    script: RoutesScript,
    requests: Mutex<Vec<RouteRequest>>,
    calls: AtomicUsize,
}

impl FakeRoutes {
    fn scripted(script: RoutesScript) -> Self {
        FakeRoutes {
            script,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(route: Route) -> Self {
        Self::scripted(RoutesScript::Route(route))
    }

    pub fn empty() -> Self {
        Self::scripted(RoutesScript::Empty)
    }

    pub fn failing(status: u16, error: &str, details: Option<Value>) -> Self {
        Self::scripted(RoutesScript::Api {
            status,
            error: error.to_string(),
            details,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().clone()
    }
}

impl RouteService for FakeRoutes {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutesApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match &self.script {
            RoutesScript::Route(route) => Ok(RoutesResponse {
                routes: vec![route.clone()],
            }),
            RoutesScript::Empty => Ok(RoutesResponse::default()),
            RoutesScript::Api {
                status,
                error,
                details,
            } => Err(RoutesApiError::Api {
                status: *status,
                error: error.clone(),
                details: details.clone(),
            }),
        }
    }
}

pub struct FakeDirections {
    result: Result<DirectionsRoute, String>,
    requests: Mutex<Vec<DirectionsRequest>>,
    calls: AtomicUsize,
}

impl FakeDirections {
    pub fn succeeding(route: DirectionsRoute) -> Self {
        FakeDirections {
            result: Ok(route),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: &str) -> Self {
        FakeDirections {
            result: Err(status.to_string()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().clone()
    }
}

impl DirectionsService for FakeDirections {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsRoute, GoogleApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        self.result
            .clone()
            .map_err(GoogleApiError::Status)
    }
}
