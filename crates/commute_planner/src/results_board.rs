use std::{cmp::Ordering, fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::route_result::{ResultId, RouteErrorEntry, RouteResult};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Start label, then destination label.
    #[default]
    FromTo,
    /// Destination label, then start label.
    ToFrom,
    Duration,
    Distance,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::FromTo => "fromTo",
            SortKey::ToFrom => "toFrom",
            SortKey::Duration => "duration",
            SortKey::Distance => "distance",
        }
    }

    pub fn compare(&self, a: &RouteResult, b: &RouteResult) -> Ordering {
        match self {
            SortKey::FromTo => a
                .from_label
                .cmp(&b.from_label)
                .then_with(|| a.to_label.cmp(&b.to_label)),
            SortKey::ToFrom => a
                .to_label
                .cmp(&b.to_label)
                .then_with(|| a.from_label.cmp(&b.from_label)),
            SortKey::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortKey::Distance => a.distance_miles.total_cmp(&b.distance_miles),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid sort key: {0}. Must be one of fromTo, toFrom, duration, distance")]
pub struct InvalidSortKey(String);

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fromTo" | "from-to" => Ok(SortKey::FromTo),
            "toFrom" | "to-from" => Ok(SortKey::ToFrom),
            "duration" => Ok(SortKey::Duration),
            "distance" => Ok(SortKey::Distance),
            other => Err(InvalidSortKey(other.to_string())),
        }
    }
}

/// One rendered row of the results panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelEntry {
    Warning {
        message: String,
    },
    Route {
        id: ResultId,
        title: String,
        lines: Vec<String>,
        color: String,
        visible: bool,
    },
    Error {
        title: String,
        message: String,
    },
}

/// Sortable results plus the panel rendered from them. Every change
/// re-sorts and rebuilds the whole panel.
#[derive(Debug, Default, Clone)]
pub struct ResultsBoard {
    sort_key: SortKey,
    warning: Option<String>,
    results: Vec<RouteResult>,
    errors: Vec<RouteErrorEntry>,
    panel: Vec<PanelEntry>,
}

impl ResultsBoard {
    pub fn new(sort_key: SortKey) -> Self {
        ResultsBoard {
            sort_key,
            ..Default::default()
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Only the first warning of a run is kept.
    pub fn show_warning(&mut self, message: impl Into<String>) {
        if self.warning.is_none() {
            self.warning = Some(message.into());
            self.render();
        }
    }

    pub fn add_result(&mut self, result: RouteResult) {
        self.results.push(result);
        self.sort();
        self.render();
    }

    pub fn add_error(&mut self, error: RouteErrorEntry) {
        self.errors.push(error);
        self.render();
    }

    pub fn sort_by(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
        self.sort();
        self.render();
    }

    /// Returns the polyline tied to the result, if the id is known.
    pub fn set_visibility(&mut self, id: ResultId, visible: bool) -> Option<&RouteResult> {
        let index = self.results.iter().position(|result| result.id == id)?;
        self.results[index].visible = visible;
        self.render();
        self.results.get(index)
    }

    pub fn result(&self, id: ResultId) -> Option<&RouteResult> {
        self.results.iter().find(|result| result.id == id)
    }

    pub fn results(&self) -> &[RouteResult] {
        &self.results
    }

    pub fn errors(&self) -> &[RouteErrorEntry] {
        &self.errors
    }

    pub fn panel(&self) -> &[PanelEntry] {
        &self.panel
    }

    pub fn clear(&mut self) {
        self.warning = None;
        self.results.clear();
        self.errors.clear();
        self.panel.clear();
    }

    fn sort(&mut self) {
        let sort_key = self.sort_key;
        self.results.sort_by(|a, b| sort_key.compare(a, b));
    }

    fn render(&mut self) {
        let warning = self.warning.iter().map(|message| PanelEntry::Warning {
            message: message.clone(),
        });

        let routes = self.results.iter().map(|result| {
            let mut lines = vec![
                format!("Duration: {}", result.duration_text),
                format!("Distance: {}", result.distance_text),
            ];
            lines.extend(result.additional_info.iter().cloned());

            PanelEntry::Route {
                id: result.id,
                title: result.title(),
                lines,
                color: result.color.clone(),
                visible: result.visible,
            }
        });

        let errors = self.errors.iter().map(|error| PanelEntry::Error {
            title: error.title(),
            message: error.message.clone(),
        });

        self.panel = warning.chain(routes).chain(errors).collect();

        debug!(
            sort_key = %self.sort_key,
            entries = self.panel.len(),
            "Rendered results panel"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::response_parser::ParsedRoute;

    use super::*;

    fn result(from: &str, to: &str, duration: &str, distance: &str) -> RouteResult {
        RouteResult::new(
            from,
            to,
            "#123456",
            ParsedRoute {
                duration_text: duration.to_string(),
                distance_text: distance.to_string(),
                additional_info: vec![],
                path: vec![],
            },
            None,
        )
    }

    fn board() -> ResultsBoard {
        let mut board = ResultsBoard::default();
        board.add_result(result("B", "Office", "1 hour 2 min", "20.1 mi (32.3 km)"));
        board.add_result(result("A", "Gym", "25 min", "3.0 mi (4.8 km)"));
        board.add_result(result("A", "Office", "45 min", "12.4 mi (20.0 km)"));
        board.add_result(result("B", "Gym", "8 min", "1.1 mi (1.8 km)"));
        board
    }

    fn pairs(board: &ResultsBoard) -> Vec<(String, String)> {
        board
            .results()
            .iter()
            .map(|result| (result.from_label.clone(), result.to_label.clone()))
            .collect()
    }

    #[test]
    fn test_default_sort_is_from_then_to() {
        let board = board();

        assert_eq!(
            pairs(&board),
            vec![
                ("A".to_string(), "Gym".to_string()),
                ("A".to_string(), "Office".to_string()),
                ("B".to_string(), "Gym".to_string()),
                ("B".to_string(), "Office".to_string()),
            ]
        );
    }

    #[test]
    fn test_to_from_sort() {
        let mut board = board();
        board.sort_by(SortKey::ToFrom);

        assert_eq!(
            pairs(&board),
            vec![
                ("A".to_string(), "Gym".to_string()),
                ("B".to_string(), "Gym".to_string()),
                ("A".to_string(), "Office".to_string()),
                ("B".to_string(), "Office".to_string()),
            ]
        );
    }

    #[test]
    fn test_duration_sort_is_non_decreasing() {
        let mut board = board();
        board.sort_by(SortKey::Duration);

        let minutes: Vec<u32> = board.results().iter().map(|r| r.duration_minutes).collect();
        assert_eq!(minutes, vec![8, 25, 45, 62]);
    }

    #[test]
    fn test_distance_sort_is_non_decreasing() {
        let mut board = board();
        board.sort_by(SortKey::Distance);

        let miles: Vec<f64> = board.results().iter().map(|r| r.distance_miles).collect();
        assert!(miles.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(miles.first(), Some(&1.1));
    }

    #[test]
    fn test_added_results_keep_current_sort() {
        let mut board = board();
        board.sort_by(SortKey::Duration);
        board.add_result(result("C", "Park", "1 min", "0.1 mi (0.2 km)"));

        assert_eq!(board.results()[0].from_label, "C");
    }

    #[test]
    fn test_panel_layout() {
        let mut board = ResultsBoard::default();
        board.add_error(RouteErrorEntry {
            from_label: "Loft".to_string(),
            to_label: "Office".to_string(),
            message: "Could not calculate route: ZERO_RESULTS".to_string(),
        });
        board.add_result(result("Loft", "Gym", "25 min", "3.0 mi (4.8 km)"));
        board.show_warning("first");
        board.show_warning("second");

        let panel = board.panel();
        assert_eq!(panel.len(), 3);
        assert_eq!(
            panel[0],
            PanelEntry::Warning {
                message: "first".to_string()
            }
        );
        assert!(matches!(
            &panel[1],
            PanelEntry::Route { title, lines, .. }
                if title == "Loft → Gym" && lines[0] == "Duration: 25 min"
        ));
        assert!(matches!(&panel[2], PanelEntry::Error { title, .. } if title == "Loft → Office"));
        assert_eq!(board.results().len(), 1);
    }

    #[test]
    fn test_set_visibility_by_id() {
        let mut board = board();
        let id = board.results()[2].id;
        board.sort_by(SortKey::Duration);

        let toggled = board.set_visibility(id, false).unwrap();
        assert_eq!(toggled.id, id);

        let hidden: Vec<ResultId> = board
            .results()
            .iter()
            .filter(|result| !result.visible)
            .map(|result| result.id)
            .collect();
        assert_eq!(hidden, vec![id]);

        assert!(board.set_visibility(ResultId::new(), false).is_none());
    }

    #[test]
    fn test_clear() {
        let mut board = board();
        board.show_warning("beta");
        board.add_error(RouteErrorEntry {
            from_label: "A".to_string(),
            to_label: "B".to_string(),
            message: "nope".to_string(),
        });

        board.clear();

        assert!(board.results().is_empty());
        assert!(board.errors().is_empty());
        assert!(board.panel().is_empty());

        board.show_warning("beta again");
        assert_eq!(
            board.panel(),
            &[PanelEntry::Warning {
                message: "beta again".to_string()
            }]
        );
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("toFrom".parse::<SortKey>(), Ok(SortKey::ToFrom));
        assert_eq!("duration".parse::<SortKey>(), Ok(SortKey::Duration));
        assert!("speed".parse::<SortKey>().is_err());
    }
}
