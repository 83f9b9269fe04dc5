// Messages between the app orchestrator, background fetch tasks, and the UI.

use dreamteam_core::player::{PlayerDetail, PlayerId};
use dreamteam_core::season::SeasonCode;
use dreamteam_core::selection::TeamGroups;
use dreamteam_core::wire::TeamsResponse;

use crate::client::ApiError;

/// Commands sent from the UI to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Resolve the player's detail and, on success, add them to the team.
    AddPlayer(PlayerId),
    RemovePlayer(PlayerId),
    SetSearchQuery(String),
    Quit,
}

/// Completions reported by spawned fetch tasks.
#[derive(Debug)]
pub enum FetchEvent {
    Season {
        season: SeasonCode,
        result: Result<TeamsResponse, ApiError>,
    },
    Detail {
        id: PlayerId,
        result: Result<PlayerDetail, ApiError>,
    },
}

/// Updates pushed from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Season loading progressed; sent while the index is still being built.
    Progress(LoadStatus),
    /// Full recomputed view of the application state.
    Snapshot(Box<AppSnapshot>),
}

/// Season loading state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub settled: usize,
    pub total: usize,
    pub failed: usize,
    /// True once every season has settled and the index is built.
    pub ready: bool,
    pub players: usize,
}

/// A player as the UI displays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    /// Names of every team the player appeared on.
    pub teams: Vec<String>,
    /// "nationality - type (code)" once detail has been resolved.
    pub detail: Option<String>,
}

impl PlayerRow {
    pub fn teams_label(&self) -> String {
        self.teams.join(", ")
    }
}

/// Everything the UI renders, derived from one consistent state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSnapshot {
    pub load: LoadStatus,
    pub query: String,
    pub results: Vec<PlayerRow>,
    pub team: TeamGroups<PlayerRow>,
    /// Selected players whose position fits none of the team groups.
    pub other: Vec<PlayerRow>,
    /// Number of selected players, grouped or not.
    pub selected: usize,
    /// Validation messages, in display order.
    pub errors: Vec<String>,
    /// Players whose detail lookup is still in flight.
    pub pending: Vec<PlayerId>,
}
