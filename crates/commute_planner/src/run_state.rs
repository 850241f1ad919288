use serde::Serialize;
use tracing::warn;

use crate::{
    map_scene::{MapScene, Marker, RoutePolyline, Viewport},
    results_board::{PanelEntry, ResultsBoard, SortKey},
    route_result::{ResultId, RouteErrorEntry, RouteResult},
};

/// Everything one calculation run produces. A new run gets a fresh value
/// instead of clearing this one, so late updates can be told apart by
/// `generation`.
#[derive(Debug, Default)]
pub struct RunState {
    generation: u64,
    board: ResultsBoard,
    scene: MapScene,
    alerts: Vec<String>,
}

impl RunState {
    pub fn new(generation: u64, sort_key: SortKey) -> Self {
        RunState {
            generation,
            board: ResultsBoard::new(sort_key),
            scene: MapScene::default(),
            alerts: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn board(&self) -> &ResultsBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut ResultsBoard {
        &mut self.board
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut MapScene {
        &mut self.scene
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(generation = self.generation, "{}", message);
        self.alerts.push(message);
    }

    pub fn add_route(&mut self, result: RouteResult) {
        self.board.add_result(result);
    }

    pub fn add_error(&mut self, error: RouteErrorEntry) {
        self.board.add_error(error);
    }

    /// Flips a result and its polyline together. Returns false for an
    /// unknown id.
    pub fn set_visibility(&mut self, id: ResultId, visible: bool) -> bool {
        let Some(result) = self.board.set_visibility(id, visible) else {
            return false;
        };

        if let Some(polyline) = result.polyline {
            self.scene.set_polyline_visible(polyline, visible);
        }
        true
    }

    /// Empties the run and hands it to `generation`.
    pub fn clear(&mut self, generation: u64) {
        self.generation = generation;
        self.board.clear();
        self.scene.clear();
        self.alerts.clear();
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            generation: self.generation,
            sort_key: self.board.sort_key(),
            results: self.board.results().to_vec(),
            errors: self.board.errors().to_vec(),
            panel: self.board.panel().to_vec(),
            alerts: self.alerts.clone(),
            markers: self.scene.markers().to_vec(),
            polylines: self.scene.polylines().to_vec(),
            viewport: self.scene.viewport(),
        }
    }
}

/// Owned copy of a run, detached from the lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub generation: u64,
    pub sort_key: SortKey,
    pub results: Vec<RouteResult>,
    pub errors: Vec<RouteErrorEntry>,
    pub panel: Vec<PanelEntry>,
    pub alerts: Vec<String>,
    pub markers: Vec<Marker>,
    pub polylines: Vec<RoutePolyline>,
    pub viewport: Viewport,
}
