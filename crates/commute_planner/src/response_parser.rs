use commute_providers::{
    directions_api::DirectionsRoute,
    lat_lng::LatLng,
    routes_api::{Route, TransitLine},
    travel_mode::TravelMode,
};
use geo::LineString;
use thiserror::Error;

use crate::formatting::{format_distance, format_duration, parse_seconds};

const POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Route has no duration")]
    MissingDuration,

    #[error("Route has no distance")]
    MissingDistance,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid polyline: {0}")]
    InvalidPolyline(String),
}

/// A route reduced to what the results panel and the map need.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRoute {
    pub duration_text: String,
    pub distance_text: String,
    pub additional_info: Vec<String>,
    pub path: Vec<LatLng>,
}

pub fn parse_primary(route: &Route, travel_mode: TravelMode) -> Result<ParsedRoute, ParseError> {
    let duration = route.duration.as_deref().ok_or(ParseError::MissingDuration)?;
    let seconds =
        parse_seconds(duration).ok_or_else(|| ParseError::InvalidDuration(duration.to_string()))?;
    let meters = route.distance_meters.ok_or(ParseError::MissingDistance)?;

    let mut additional_info = Vec::new();
    if let Some(note) = traffic_note(route, seconds, travel_mode)? {
        additional_info.push(note);
    }
    if travel_mode == TravelMode::Transit {
        additional_info.extend(transit_notes(route));
    }

    let path = match &route.polyline {
        Some(polyline) => decode_path(&polyline.encoded_polyline)?,
        None => Vec::new(),
    };

    Ok(ParsedRoute {
        duration_text: format_duration(seconds),
        distance_text: format_distance(meters),
        additional_info,
        path,
    })
}

fn traffic_note(
    route: &Route,
    seconds: u64,
    travel_mode: TravelMode,
) -> Result<Option<String>, ParseError> {
    if travel_mode == TravelMode::Transit {
        return Ok(None);
    }

    let Some(static_duration) = route.static_duration.as_deref() else {
        return Ok(Some("Traffic conditions applied".to_string()));
    };

    let static_seconds = parse_seconds(static_duration)
        .ok_or_else(|| ParseError::InvalidDuration(static_duration.to_string()))?;
    let delta = seconds as i64 - static_seconds as i64;
    let minutes = (delta.unsigned_abs()).div_ceil(60);

    Ok(Some(match delta {
        d if d > 0 => format!("+{} min due to traffic", minutes),
        d if d < 0 => format!("{} min faster than usual", minutes),
        _ => "Normal traffic conditions".to_string(),
    }))
}

fn transit_notes(route: &Route) -> Vec<String> {
    let lines: Vec<&TransitLine> = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .filter_map(|step| step.transit_details.as_ref())
        .filter_map(|details| details.transit_line.as_ref())
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    let mut notes = vec![format!("{} transit segment(s)", lines.len())];
    notes.extend(lines.iter().map(|line| {
        format!(
            "{} - {}",
            line.name_short.as_deref().unwrap_or(""),
            line.name.as_deref().unwrap_or("")
        )
    }));
    notes
}

/// The directions service already formats its text, so it is used as is.
pub fn parse_fallback(
    route: &DirectionsRoute,
    has_departure_time: bool,
) -> Result<ParsedRoute, ParseError> {
    let leg = route.legs.first();
    let duration_text = leg
        .and_then(|leg| leg.duration.as_ref())
        .map(|duration| duration.text.clone())
        .ok_or(ParseError::MissingDuration)?;
    let distance_text = leg
        .and_then(|leg| leg.distance.as_ref())
        .map(|distance| distance.text.clone())
        .ok_or(ParseError::MissingDistance)?;

    let path = match &route.overview_polyline {
        Some(polyline) => decode_path(&polyline.points)?,
        None => Vec::new(),
    };

    let additional_info = if has_departure_time {
        vec!["Estimated time for specified departure".to_string()]
    } else {
        Vec::new()
    };

    Ok(ParsedRoute {
        duration_text,
        distance_text,
        additional_info,
        path,
    })
}

pub fn decode_path(encoded: &str) -> Result<Vec<LatLng>, ParseError> {
    let line: LineString<f64> = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|err| ParseError::InvalidPolyline(err.to_string()))?;

    Ok(line.coords().map(|coord| LatLng::from(*coord)).collect())
}
