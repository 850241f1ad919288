use std::sync::atomic::{AtomicU64, Ordering};

use commute_providers::{
    directions_api::DirectionsService, geocoding_api::Geocoder, google_api::GoogleApiError,
    lat_lng::LatLng, routes_api::RouteService,
};
use futures::future::join_all;
use geojson::GeoJson;
use jiff::Zoned;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    input::{CommuteForm, CommuteInput, InputError, LocationEntry},
    map_scene::MarkerKind,
    request_builder::{RouteOptions, build_request},
    results_board::SortKey,
    route_fetch::fetch_route,
    route_result::{ResultId, RouteErrorEntry, RouteResult},
    run_state::{RunSnapshot, RunState},
};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// A newer run replaced this one before it finished.
    #[error("Run {0} was superseded by a newer calculation")]
    Superseded(u64),
}

/// An address the geocoder resolved, with the color it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPoint {
    pub coordinates: LatLng,
    pub label: String,
    pub address: String,
    pub color: String,
}

pub fn beta_warning(label: &str) -> String {
    format!(
        "{} routes are in beta and might sometimes be missing clear sidewalks, pedestrian paths, or bicycling paths.",
        label
    )
}

/// Runs the geocode, route, parse, sort and render pipeline and owns the
/// state of the latest run.
pub struct CommutePlanner<G, R, D> {
    geocoder: G,
    routes: R,
    directions: D,
    generation: AtomicU64,
    state: Mutex<RunState>,
}

impl<G, R, D> CommutePlanner<G, R, D>
where
    G: Geocoder,
    R: RouteService,
    D: DirectionsService,
{
    pub fn new(geocoder: G, routes: R, directions: D) -> Self {
        CommutePlanner {
            geocoder,
            routes,
            directions,
            generation: AtomicU64::new(0),
            state: Mutex::new(RunState::default()),
        }
    }

    #[instrument(skip_all)]
    pub async fn calculate_routes(&self, form: &CommuteForm) -> Result<RunSnapshot, PlannerError> {
        let generation = {
            let mut state = self.state.lock();
            let generation = self.next_generation();
            *state = RunState::new(generation, form.sort_key);
            generation
        };

        let input = match CommuteInput::try_from(form) {
            Ok(input) => input,
            Err(err) => {
                self.with_run(generation, |run| run.alert(err.to_string()));
                return Err(err.into());
            }
        };

        info!(
            generation,
            starting_points = input.starting_points.len(),
            destinations = input.destinations.len(),
            travel_mode = %input.options.travel_mode,
            "Calculating routes"
        );

        if let Some(label) = input.options.travel_mode.beta_label() {
            self.with_run(generation, |run| run.board_mut().show_warning(beta_warning(label)));
        }

        // Every destination resolves before any starting point is looked up.
        let destinations: Vec<GeocodedPoint> = join_all(
            input
                .destinations
                .iter()
                .map(|entry| self.resolve(generation, entry, MarkerKind::Destination)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        if destinations.is_empty() {
            info!(generation, "No destination could be geocoded");
        } else {
            let now = Zoned::now();

            join_all(input.starting_points.iter().map(|entry| {
                self.route_from_start(generation, entry, &destinations, &input.options, &now)
            }))
            .await;
        }

        let state = self.state.lock();
        if state.generation() != generation {
            return Err(PlannerError::Superseded(generation));
        }

        info!(
            generation,
            results = state.board().results().len(),
            errors = state.board().errors().len(),
            "Finished calculating routes"
        );

        Ok(state.snapshot())
    }

    async fn resolve(
        &self,
        generation: u64,
        entry: &LocationEntry,
        kind: MarkerKind,
    ) -> Option<GeocodedPoint> {
        match self.geocoder.geocode(&entry.address).await {
            Ok(coordinates) => {
                let label = entry.display_label().to_string();
                let color = self.with_run(generation, |run| {
                    run.scene_mut().add_marker(
                        kind,
                        coordinates,
                        label.clone(),
                        entry.address.clone(),
                        entry.color.clone(),
                    )
                })?;

                debug!(address = %entry.address, ?coordinates, "Geocoded address");

                Some(GeocodedPoint {
                    coordinates,
                    label,
                    address: entry.address.clone(),
                    color,
                })
            }
            Err(err) => {
                let message = match err {
                    GoogleApiError::Status(status) if status == "ZERO_RESULTS" => {
                        format!("Address not found: {}", entry.address)
                    }
                    other => format!("Geocoding failed for {}: {}", entry.address, other),
                };
                self.with_run(generation, |run| run.alert(message));
                None
            }
        }
    }

    /// Resolves one starting point, then routes it to every destination.
    async fn route_from_start(
        &self,
        generation: u64,
        entry: &LocationEntry,
        destinations: &[GeocodedPoint],
        options: &RouteOptions,
        now: &Zoned,
    ) {
        let Some(start) = self.resolve(generation, entry, MarkerKind::Start).await else {
            return;
        };

        join_all(
            destinations
                .iter()
                .map(|destination| self.route_pair(generation, &start, destination, options, now)),
        )
        .await;
    }

    async fn route_pair(
        &self,
        generation: u64,
        start: &GeocodedPoint,
        destination: &GeocodedPoint,
        options: &RouteOptions,
        now: &Zoned,
    ) {
        debug!(from = %start.label, to = %destination.label, "Calculating route");

        let request = match build_request(start.coordinates, destination.coordinates, options, now) {
            Ok(request) => request,
            Err(err) => {
                self.with_run(generation, |run| {
                    run.add_error(RouteErrorEntry {
                        from_label: start.label.clone(),
                        to_label: destination.label.clone(),
                        message: err.to_string(),
                    })
                });
                return;
            }
        };

        let fetch = fetch_route(&self.routes, &self.directions, &request).await;

        self.with_run(generation, move |run| {
            if let Some(failure) = &fetch.primary_failure {
                run.alert(failure.alert_message(&start.label));
            }

            match fetch.outcome {
                Ok(parsed) => {
                    let polyline = run
                        .scene_mut()
                        .draw_polyline(parsed.path.clone(), start.color.clone());
                    run.add_route(RouteResult::new(
                        start.label.clone(),
                        destination.label.clone(),
                        start.color.clone(),
                        parsed,
                        Some(polyline),
                    ));
                }
                Err(failure) => run.add_error(RouteErrorEntry {
                    from_label: start.label.clone(),
                    to_label: destination.label.clone(),
                    message: failure.to_string(),
                }),
            }
        });
    }

    /// Only called with the state lock held, so generations are installed in order.
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies `f` only while `generation` is still the current run.
    fn with_run<T>(&self, generation: u64, f: impl FnOnce(&mut RunState) -> T) -> Option<T> {
        let mut state = self.state.lock();
        if state.generation() != generation {
            debug!(
                generation,
                current = state.generation(),
                "Dropping update from a superseded run"
            );
            return None;
        }

        Some(f(&mut state))
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.state.lock().snapshot()
    }

    pub fn sort_results(&self, sort_key: SortKey) -> RunSnapshot {
        let mut state = self.state.lock();
        state.board_mut().sort_by(sort_key);
        state.snapshot()
    }

    /// Returns `None` when the id does not belong to the current run.
    pub fn set_visibility(&self, id: ResultId, visible: bool) -> Option<RunSnapshot> {
        let mut state = self.state.lock();
        state
            .set_visibility(id, visible)
            .then(|| state.snapshot())
    }

    /// Discards the current run. A calculation still in flight is superseded.
    pub fn clear(&self) -> RunSnapshot {
        let mut state = self.state.lock();
        let generation = self.next_generation();
        state.clear(generation);
        state.snapshot()
    }

    pub fn map_geojson(&self) -> GeoJson {
        self.state.lock().scene().to_geojson()
    }
}
