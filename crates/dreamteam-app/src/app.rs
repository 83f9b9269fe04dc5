// Application state and orchestration logic.
//
// The central event loop owns every piece of mutable state: the roster
// aggregator, the player index, the selection and the search query. Season
// and detail fetches run as spawned tasks that report back over a channel;
// the loop applies each completion, recomputes the derived views and pushes
// them to the UI.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use dreamteam_core::config::Config;
use dreamteam_core::index::{PlayerIndex, TeamDirectory};
use dreamteam_core::player::{PlayerDetail, PlayerId, PlayerIndexEntry};
use dreamteam_core::roster::RosterAggregator;
use dreamteam_core::search::search_players;
use dreamteam_core::season::SeasonCode;
use dreamteam_core::selection::{group_selection, ungrouped_selection, Selection};
use dreamteam_core::validate::{validate_team, TeamError};
use dreamteam_core::wire::TeamsResponse;

use crate::client::{ApiError, StatsSource};
use crate::protocol::{AppSnapshot, FetchEvent, LoadStatus, PlayerRow, UiUpdate, UserCommand};

/// Capacity of the channel spawned fetch tasks report on. Large enough for
/// every season of the default range to complete without back-pressure.
pub const FETCH_CHANNEL_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Detail resolution
// ---------------------------------------------------------------------------

/// First phase of adding a player: look up their detail. No state changes.
pub async fn resolve_detail(
    source: &dyn StatsSource,
    id: PlayerId,
) -> Result<PlayerDetail, ApiError> {
    source.fetch_person(id).await
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// What happened to an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A detail lookup was spawned.
    Started,
    AlreadySelected,
    /// A lookup for this player is already in flight.
    InFlight,
    UnknownPlayer,
}

/// Season counts kept once the aggregator has been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadTotals {
    seasons: usize,
    failed: usize,
}

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Collects season rosters; spent once the index is built.
    pub aggregator: RosterAggregator,
    totals: LoadTotals,
    /// Empty until every season has settled.
    pub index: PlayerIndex,
    pub teams: TeamDirectory,
    pub index_ready: bool,
    pub selection: Selection,
    pub query: String,
    /// Players with a detail lookup in flight.
    pub pending_details: BTreeSet<PlayerId>,
    source: Arc<dyn StatsSource>,
    fetch_tx: mpsc::Sender<FetchEvent>,
}

impl AppState {
    /// Create the state. Nothing is fetched until `start_loading`.
    pub fn new(
        config: Config,
        source: Arc<dyn StatsSource>,
        fetch_tx: mpsc::Sender<FetchEvent>,
    ) -> Self {
        let aggregator = RosterAggregator::new(config.seasons.windows());
        AppState {
            config,
            aggregator,
            totals: LoadTotals::default(),
            index: PlayerIndex::new(),
            teams: TeamDirectory::new(),
            index_ready: false,
            selection: Selection::new(),
            query: String::new(),
            pending_details: BTreeSet::new(),
            source,
            fetch_tx,
        }
    }

    /// Spawn one fetch task per season window. They run concurrently and
    /// report in whatever order they finish.
    pub fn start_loading(&mut self) {
        let seasons = self.config.seasons.windows();
        info!(
            "Fetching {} seasons ({}..{}) from {}",
            seasons.len(),
            self.config.seasons.oldest,
            self.config.seasons.newest,
            self.config.api.base_url
        );

        if seasons.is_empty() {
            self.finish_loading();
            return;
        }

        for season in seasons {
            let source = Arc::clone(&self.source);
            let tx = self.fetch_tx.clone();
            tokio::spawn(async move {
                let result = source.fetch_season(season).await;
                let _ = tx.send(FetchEvent::Season { season, result }).await;
            });
        }
    }

    /// Apply a season completion. Returns `true` if it finished loading.
    pub fn apply_season(
        &mut self,
        season: SeasonCode,
        result: Result<TeamsResponse, ApiError>,
    ) -> bool {
        if self.index_ready {
            warn!(%season, "season arrived after the index was built, ignoring");
            return false;
        }

        match result {
            Ok(response) => {
                self.aggregator.ingest(season, &response);
            }
            Err(e) => {
                self.aggregator.record_failure(season, &e.to_string());
            }
        }

        if self.aggregator.is_complete() {
            self.finish_loading();
            return true;
        }
        false
    }

    /// Build the index and drop the per-season entries with the aggregator.
    fn finish_loading(&mut self) {
        let aggregator = std::mem::replace(&mut self.aggregator, RosterAggregator::new(Vec::new()));
        self.totals = LoadTotals {
            seasons: aggregator.progress().1,
            failed: aggregator.failed_seasons().len(),
        };
        (self.index, self.teams) = aggregator.finish();
        self.index_ready = true;
        info!(
            "Player index ready: {} players across {} teams ({} seasons failed)",
            self.index.len(),
            self.teams.len(),
            self.totals.failed
        );
    }

    pub fn load_status(&self) -> LoadStatus {
        let (settled, total, failed) = if self.index_ready {
            (self.totals.seasons, self.totals.seasons, self.totals.failed)
        } else {
            let (settled, total) = self.aggregator.progress();
            (settled, total, self.aggregator.failed_seasons().len())
        };
        LoadStatus {
            settled,
            total,
            failed,
            ready: self.index_ready,
            players: self.index.len(),
        }
    }

    /// Start adding a player: spawn the detail lookup unless the request is
    /// redundant. The player joins the selection only once the lookup
    /// succeeds (see `apply_detail`).
    pub fn request_add(&mut self, id: PlayerId) -> AddOutcome {
        if !self.index.contains(id) {
            warn!(player_id = %id, "add requested for unknown player");
            return AddOutcome::UnknownPlayer;
        }
        if self.selection.contains(id) {
            debug!(player_id = %id, "player already selected");
            return AddOutcome::AlreadySelected;
        }
        if !self.pending_details.insert(id) {
            debug!(player_id = %id, "detail lookup already in flight");
            return AddOutcome::InFlight;
        }

        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = resolve_detail(source.as_ref(), id).await;
            let _ = tx.send(FetchEvent::Detail { id, result }).await;
        });
        AddOutcome::Started
    }

    /// Apply a detail completion: commit on success, log on failure.
    /// Returns `true` if the selection changed.
    pub fn apply_detail(&mut self, id: PlayerId, result: Result<PlayerDetail, ApiError>) -> bool {
        self.pending_details.remove(&id);
        match result {
            Ok(detail) => self.commit_selection(id, detail),
            Err(e) => {
                warn!(player_id = %id, "player detail lookup failed, not adding: {e}");
                false
            }
        }
    }

    /// Second phase of adding a player: attach the detail and select them.
    /// Returns `false` if the player is unknown or was already selected.
    pub fn commit_selection(&mut self, id: PlayerId, detail: PlayerDetail) -> bool {
        if !self.index.attach_detail(id, detail) {
            warn!(player_id = %id, "resolved detail for a player missing from the index");
            return false;
        }
        let added = self.selection.push(id);
        if added {
            info!(player_id = %id, selected = self.selection.len(), "player added");
        }
        added
    }

    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let removed = self.selection.remove(id);
        if removed {
            info!(player_id = %id, selected = self.selection.len(), "player removed");
        } else {
            debug!(player_id = %id, "remove requested for unselected player");
        }
        removed
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn search_results(&self) -> Vec<PlayerId> {
        search_players(&self.index, &self.query, &self.selection)
    }

    pub fn errors(&self) -> Vec<TeamError> {
        validate_team(&self.index, &self.selection)
    }

    fn row(&self, player: &PlayerIndexEntry) -> PlayerRow {
        PlayerRow {
            id: player.id,
            name: player.name.clone(),
            teams: self.teams.names_for(&player.teams),
            detail: player.detail.as_ref().map(PlayerDetail::summary),
        }
    }

    /// Build an `AppSnapshot` from the current application state.
    ///
    /// Search results, grouping and validation are all recomputed from
    /// scratch so the snapshot is internally consistent.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let results = self
            .search_results()
            .into_iter()
            .filter_map(|id| self.index.get(id))
            .map(|p| self.row(p))
            .collect();

        let team = group_selection(&self.index, &self.selection).map(|p| self.row(p));
        let other = ungrouped_selection(&self.index, &self.selection)
            .into_iter()
            .map(|p| self.row(p))
            .collect();

        AppSnapshot {
            load: self.load_status(),
            query: self.query.clone(),
            results,
            team,
            other,
            selected: self.selection.len(),
            errors: self.errors().iter().map(TeamError::to_string).collect(),
            pending: self.pending_details.iter().copied().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Kicks off season loading, then listens on two channels using
/// `tokio::select!`: user commands from the UI and completions from fetch
/// tasks. After every state change a fresh snapshot goes to `ui_tx`.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    state.start_loading();
    push_snapshot(&state, &ui_tx).await;

    // State keeps a sender alive, so this only closes if a task panics while
    // holding the last clone; stop polling rather than spin.
    let mut fetch_open = true;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        if handle_user_command(&mut state, cmd) {
                            push_snapshot(&state, &ui_tx).await;
                        }
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            event = fetch_rx.recv(), if fetch_open => {
                match event {
                    Some(event) => handle_fetch_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("Fetch channel closed");
                        fetch_open = false;
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Apply a user command. Returns `true` if the UI needs a new snapshot.
fn handle_user_command(state: &mut AppState, cmd: UserCommand) -> bool {
    match cmd {
        UserCommand::AddPlayer(id) => {
            // The pending list is part of the snapshot.
            state.request_add(id) == AddOutcome::Started
        }
        UserCommand::RemovePlayer(id) => state.remove_player(id),
        UserCommand::SetSearchQuery(query) => {
            if query == state.query {
                return false;
            }
            state.set_query(query);
            true
        }
        UserCommand::Quit => false,
    }
}

async fn handle_fetch_event(state: &mut AppState, event: FetchEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
    match event {
        FetchEvent::Season { season, result } => {
            if state.apply_season(season, result) {
                push_snapshot(state, ui_tx).await;
            } else {
                let _ = ui_tx.send(UiUpdate::Progress(state.load_status())).await;
            }
        }
        FetchEvent::Detail { id, result } => {
            // Snapshot either way: the pending marker has to clear.
            state.apply_detail(id, result);
            push_snapshot(state, ui_tx).await;
        }
    }
}

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    if ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await.is_err() {
        debug!("UI channel closed, dropping snapshot");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
