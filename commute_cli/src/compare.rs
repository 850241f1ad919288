use std::{path::PathBuf, time::Duration};

use clap::Args;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use commute_planner::{
    departure::LeaveBy,
    input::{CommuteForm, LocationRow},
    planner::CommutePlanner,
    results_board::{PanelEntry, SortKey},
    run_state::RunSnapshot,
};
use commute_providers::{
    config::ProviderConfig, directions_api::GoogleDirectionsClient,
    geocoding_api::GoogleGeocoder, route_client::PrimaryRouteClient, travel_mode::TravelMode,
};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Zoned;
use tracing::{info, warn};

use crate::parsers::{self, LeaveByArg};

#[derive(Args)]
pub struct CompareArgs {
    /// JSON input document (see `generate json-schema`)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Starting point as "address|label|#color", repeatable
    #[arg(long = "from", value_parser = parsers::parse_location)]
    starting_points: Vec<LocationRow>,

    /// Destination as "address|label", repeatable
    #[arg(long = "to", value_parser = parsers::parse_location)]
    destinations: Vec<LocationRow>,

    /// DRIVE, WALK, BICYCLE, TRANSIT or TWO_WHEELER
    #[arg(short, long)]
    mode: Option<TravelMode>,

    /// "YYYY-MM-DD H:MM AM|PM", or "auto" for an hour from now
    #[arg(short, long, value_parser = parsers::parse_leave_by)]
    leave_by: Option<LeaveByArg>,

    /// fromTo, toFrom, duration or distance
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Write the map (markers and routes) as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Print the whole run as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn build_form(args: &CompareArgs, now: &Zoned) -> Result<CommuteForm, anyhow::Error> {
    let mut form = match &args.input {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CommuteForm::default(),
    };

    form.starting_points.extend(args.starting_points.iter().cloned());
    form.destinations.extend(args.destinations.iter().cloned());

    if let Some(mode) = args.mode {
        form.travel_mode = mode;
    }
    if let Some(sort) = args.sort {
        form.sort_key = sort;
    }
    match args.leave_by {
        Some(LeaveByArg::At(time)) => {
            form.leave_by = LeaveBy {
                enabled: true,
                time: Some(time),
            }
        }
        Some(LeaveByArg::Auto) => form.leave_by.enable(now)?,
        None => {}
    }

    Ok(form)
}

pub async fn run(args: CompareArgs) -> Result<(), anyhow::Error> {
    let config = ProviderConfig::from_env()?;
    let form = build_form(&args, &Zoned::now())?;

    let route_client = PrimaryRouteClient::new(&config.api_key, config.route_endpoint.as_deref());
    if let PrimaryRouteClient::Proxy(proxy) = &route_client {
        info!("Routing through {}", proxy.endpoint());
    }

    let planner = CommutePlanner::new(
        GoogleGeocoder::new(&config.api_key),
        route_client,
        GoogleDirectionsClient::new(&config.api_key),
    );

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
    bar.set_message("Calculating routes");

    let result = planner.calculate_routes(&form).await;
    bar.finish_and_clear();
    let snapshot = result?;

    for alert in &snapshot.alerts {
        warn!("{}", alert);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_table(&snapshot));
    }

    if let Some(path) = args.geojson {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, planner.map_geojson().to_string())?;
        info!("Map written to {:?}", path);
    }

    Ok(())
}

fn render_table(snapshot: &RunSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Route", "Details"]);

    for entry in &snapshot.panel {
        match entry {
            PanelEntry::Warning { message } => {
                table.add_row(vec![String::from("⚠"), message.clone()]);
            }
            PanelEntry::Route { title, lines, .. } => {
                table.add_row(vec![title.clone(), lines.join("\n")]);
            }
            PanelEntry::Error { title, message } => {
                table.add_row(vec![title.clone(), format!("Error: {}", message)]);
            }
        }
    }

    table
}
