// Player index and team directory: the aggregated, process-lifetime views
// built from every season roster.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use crate::player::{PlayerDetail, PlayerId, PlayerIndexEntry, TeamId, TeamRecord};

/// One player's appearance on one team in one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRosterEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
}

// ---------------------------------------------------------------------------
// PlayerIndex
// ---------------------------------------------------------------------------

/// Every known player keyed by id. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerIndex {
    players: BTreeMap<PlayerId, PlayerIndexEntry>,
}

impl PlayerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold roster entries into an index.
    ///
    /// A new player id creates an entry holding just that team; a known id
    /// gains the team in its set. Set semantics make the fold insensitive to
    /// entry order and to repeated appearances on the same team.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a SeasonRosterEntry>,
    {
        let mut index = PlayerIndex::new();
        for entry in entries {
            index.merge_entry(entry);
        }
        index
    }

    /// Merge a single roster entry. The most recently merged name wins.
    pub fn merge_entry(&mut self, entry: &SeasonRosterEntry) {
        let player = self
            .players
            .entry(entry.player_id)
            .or_insert_with(|| PlayerIndexEntry::new(entry.player_id, entry.player_name.clone()));
        player.name.clone_from(&entry.player_name);
        player.teams.insert(entry.team_id);
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerIndexEntry> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Attach resolved detail to a player. Returns `false` if the id is unknown.
    pub fn attach_detail(&mut self, id: PlayerId, detail: PlayerDetail) -> bool {
        match self.players.get_mut(&id) {
            Some(player) => {
                player.detail = Some(detail);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> btree_map::Values<'_, PlayerId, PlayerIndexEntry> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TeamDirectory
// ---------------------------------------------------------------------------

/// Team names discovered while processing rosters. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    teams: BTreeMap<TeamId, TeamRecord>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a team, replacing any previous name (franchises get renamed).
    pub fn upsert(&mut self, id: TeamId, name: &str) {
        self.teams
            .entry(id)
            .and_modify(|t| t.name = name.to_string())
            .or_insert_with(|| TeamRecord {
                id,
                name: name.to_string(),
            });
    }

    pub fn get(&self, id: TeamId) -> Option<&TeamRecord> {
        self.teams.get(&id)
    }

    /// Display names for a set of team ids. Unknown ids render as "#<id>".
    pub fn names_for(&self, ids: &BTreeSet<TeamId>) -> Vec<String> {
        ids.iter()
            .map(|id| match self.teams.get(id) {
                Some(team) => team.name.clone(),
                None => format!("#{id}"),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
