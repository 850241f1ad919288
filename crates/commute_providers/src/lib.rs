pub mod config;
pub mod diagnostics;
pub mod directions_api;
pub mod geocoding_api;
pub mod google_api;
pub mod lat_lng;
pub mod places_api;
pub mod route_client;
pub mod route_proxy_client;
pub mod routes_api;
pub mod travel_mode;

#[cfg(test)]
pub(crate) mod test_utils;
