use commute_planner::planner::CommutePlanner;
use commute_providers::{
    diagnostics::KeyDiagnostics, directions_api::GoogleDirectionsClient,
    geocoding_api::GoogleGeocoder, places_api::GooglePlacesClient, routes_api::GoogleRoutesClient,
};

pub type Planner = CommutePlanner<GoogleGeocoder, GoogleRoutesClient, GoogleDirectionsClient>;

pub struct AppState {
    pub planner: Planner,
    pub routes_client: GoogleRoutesClient,
    pub places_client: GooglePlacesClient,
    pub diagnostics: KeyDiagnostics,
}

impl AppState {
    pub fn new(api_key: &str) -> Self {
        let routes_client = GoogleRoutesClient::new(api_key);

        AppState {
            planner: CommutePlanner::new(
                GoogleGeocoder::new(api_key),
                routes_client.clone(),
                GoogleDirectionsClient::new(api_key),
            ),
            routes_client,
            places_client: GooglePlacesClient::new(api_key),
            diagnostics: KeyDiagnostics::new(api_key),
        }
    }
}
