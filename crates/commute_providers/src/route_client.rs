use crate::{
    route_proxy_client::RouteProxyClient,
    routes_api::{GoogleRoutesClient, RouteRequest, RouteService, RoutesApiError, RoutesResponse},
};

/// Where primary route requests go: straight to the Routes API, or through a
/// running `/api/route` pass-through.
#[derive(Clone)]
pub enum PrimaryRouteClient {
    Direct(GoogleRoutesClient),
    Proxy(RouteProxyClient),
}

impl PrimaryRouteClient {
    pub fn new(api_key: &str, route_endpoint: Option<&str>) -> Self {
        match route_endpoint {
            Some(endpoint) => PrimaryRouteClient::Proxy(RouteProxyClient::new(endpoint)),
            None => PrimaryRouteClient::Direct(GoogleRoutesClient::new(api_key)),
        }
    }
}

impl RouteService for PrimaryRouteClient {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutesApiError> {
        match self {
            PrimaryRouteClient::Direct(client) => client.compute_route(request).await,
            PrimaryRouteClient::Proxy(client) => client.compute_route(request).await,
        }
    }
}
