// Roster aggregation: collects per-season team rosters and folds them into
// the player index once every season window has settled.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::index::{PlayerIndex, SeasonRosterEntry, TeamDirectory};
use crate::season::SeasonCode;
use crate::wire::TeamsResponse;

/// Extract roster entries from one season response, recording each team
/// that carries a non-empty roster in `teams`.
///
/// Teams without a roster contribute nothing.
pub fn extract_entries(
    response: &TeamsResponse,
    teams: &mut TeamDirectory,
) -> Vec<SeasonRosterEntry> {
    let mut entries = Vec::new();

    for team in &response.teams {
        let roster = match &team.roster {
            Some(r) if !r.roster.is_empty() => r,
            _ => {
                debug!(team_id = %team.id, team = %team.name, "team has no roster, skipping");
                continue;
            }
        };

        teams.upsert(team.id, &team.name);

        entries.extend(roster.roster.iter().map(|spot| SeasonRosterEntry {
            player_id: spot.person.id,
            player_name: spot.person.full_name.clone(),
            team_id: team.id,
        }));
    }

    entries
}

// ---------------------------------------------------------------------------
// RosterAggregator
// ---------------------------------------------------------------------------

/// Tracks which season windows have settled and accumulates their entries.
///
/// A season settles when its response arrives or its fetch fails. The
/// aggregator is complete once every expected season has settled, whatever
/// order they arrived in.
#[derive(Debug, Clone)]
pub struct RosterAggregator {
    expected: BTreeSet<SeasonCode>,
    settled: BTreeSet<SeasonCode>,
    failed: BTreeSet<SeasonCode>,
    entries: Vec<SeasonRosterEntry>,
    teams: TeamDirectory,
}

impl RosterAggregator {
    pub fn new(seasons: impl IntoIterator<Item = SeasonCode>) -> Self {
        RosterAggregator {
            expected: seasons.into_iter().collect(),
            settled: BTreeSet::new(),
            failed: BTreeSet::new(),
            entries: Vec::new(),
            teams: TeamDirectory::new(),
        }
    }

    /// Accept a season response. Returns `false` (and changes nothing) when
    /// the season was not expected or has already settled.
    pub fn ingest(&mut self, season: SeasonCode, response: &TeamsResponse) -> bool {
        if !self.begin_settle(season) {
            return false;
        }

        let entries = extract_entries(response, &mut self.teams);
        debug!(%season, entries = entries.len(), "season roster ingested");
        self.entries.extend(entries);
        self.settled.insert(season);
        self.log_if_complete();
        true
    }

    /// Mark a season as failed. The season still counts towards completion;
    /// the aggregate simply lacks its players.
    pub fn record_failure(&mut self, season: SeasonCode, reason: &str) -> bool {
        if !self.begin_settle(season) {
            return false;
        }

        warn!(%season, "season roster fetch failed, continuing without it: {reason}");
        self.failed.insert(season);
        self.settled.insert(season);
        self.log_if_complete();
        true
    }

    fn begin_settle(&self, season: SeasonCode) -> bool {
        if !self.expected.contains(&season) {
            warn!(%season, "ignoring roster for unexpected season");
            return false;
        }
        if self.settled.contains(&season) {
            warn!(%season, "ignoring repeated roster for settled season");
            return false;
        }
        true
    }

    fn log_if_complete(&self) {
        if self.is_complete() {
            info!(
                seasons = self.expected.len(),
                failed = self.failed.len(),
                entries = self.entries.len(),
                "all season rosters settled"
            );
        }
    }

    pub fn is_complete(&self) -> bool {
        self.settled.len() == self.expected.len()
    }

    /// `(settled, expected)` season counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.settled.len(), self.expected.len())
    }

    pub fn failed_seasons(&self) -> &BTreeSet<SeasonCode> {
        &self.failed
    }

    pub fn entries(&self) -> &[SeasonRosterEntry] {
        &self.entries
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.teams
    }

    /// Consume the aggregator, producing the merged index and team directory.
    pub fn finish(self) -> (PlayerIndex, TeamDirectory) {
        let index = PlayerIndex::from_entries(&self.entries);
        (index, self.teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerId, TeamId};
    use crate::season::season_windows;
    use crate::wire::{PersonRef, RosterPayload, RosterSpot, TeamPayload};

    fn team(id: u64, name: &str, players: &[(u64, &str)]) -> TeamPayload {
        TeamPayload {
            id: TeamId(id),
            name: name.to_string(),
            roster: Some(RosterPayload {
                roster: players
                    .iter()
                    .map(|(pid, pname)| RosterSpot {
                        person: PersonRef {
                            id: PlayerId(*pid),
                            full_name: pname.to_string(),
                        },
                    })
                    .collect(),
            }),
        }
    }

    fn rosterless(id: u64, name: &str) -> TeamPayload {
        TeamPayload {
            id: TeamId(id),
            name: name.to_string(),
            roster: None,
        }
    }

    #[test]
    fn extract_skips_missing_and_empty_rosters() {
        let response = TeamsResponse {
            teams: vec![
                rosterless(1, "New Jersey Devils"),
                team(2, "New York Islanders", &[]),
                team(3, "New York Rangers", &[(100, "Mark Messier")]),
            ],
        };
        let mut teams = TeamDirectory::new();
        let entries = extract_entries(&response, &mut teams);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].team_id, TeamId(3));
        assert_eq!(teams.len(), 1);
        assert!(teams.get(TeamId(1)).is_none());
        assert!(teams.get(TeamId(2)).is_none());
    }

    #[test]
    fn same_team_across_two_seasons_is_deduplicated() {
        let seasons = season_windows(1987, 1989);
        let mut agg = RosterAggregator::new(seasons.clone());
        let response = TeamsResponse {
            teams: vec![team(1, "T1", &[(1, "P1")])],
        };

        assert!(agg.ingest(seasons[0], &response));
        assert!(agg.ingest(seasons[1], &response));
        assert!(agg.is_complete());

        assert_eq!(agg.entries().len(), 2);
        let (index, _) = agg.finish();
        let p1 = index.get(PlayerId(1)).unwrap();
        assert_eq!(p1.teams, BTreeSet::from([TeamId(1)]));
    }

    #[test]
    fn completes_only_after_every_season_settles() {
        let seasons = season_windows(2000, 2003);
        let mut agg = RosterAggregator::new(seasons.clone());
        let empty = TeamsResponse::default();

        // Out of order, with one failure.
        assert!(agg.ingest(seasons[2], &empty));
        assert!(!agg.is_complete());
        assert!(agg.record_failure(seasons[0], "connection reset"));
        assert!(!agg.is_complete());
        assert_eq!(agg.progress(), (2, 3));
        assert!(agg.ingest(seasons[1], &empty));
        assert!(agg.is_complete());
        assert_eq!(agg.failed_seasons().len(), 1);
        assert!(agg.failed_seasons().contains(&seasons[0]));
    }

    #[test]
    fn repeated_and_unexpected_seasons_are_ignored() {
        let seasons = season_windows(2000, 2001);
        let mut agg = RosterAggregator::new(seasons.clone());
        let response = TeamsResponse {
            teams: vec![team(1, "T1", &[(1, "P1")])],
        };

        assert!(!agg.ingest(SeasonCode::new(1990), &response));
        assert!(agg.ingest(seasons[0], &response));
        assert!(!agg.ingest(seasons[0], &response));
        assert!(!agg.record_failure(seasons[0], "late failure"));
        assert_eq!(agg.entries().len(), 1);
        assert!(agg.failed_seasons().is_empty());
    }

    #[test]
    fn empty_range_is_immediately_complete() {
        let agg = RosterAggregator::new(Vec::new());
        assert!(agg.is_complete());
        assert_eq!(agg.progress(), (0, 0));
    }

    #[test]
    fn player_traded_mid_career_collects_both_teams() {
        let seasons = season_windows(1987, 1989);
        let mut agg = RosterAggregator::new(seasons.clone());
        agg.ingest(
            seasons[0],
            &TeamsResponse {
                teams: vec![team(22, "Edmonton Oilers", &[(8447400, "Wayne Gretzky")])],
            },
        );
        agg.ingest(
            seasons[1],
            &TeamsResponse {
                teams: vec![team(26, "Los Angeles Kings", &[(8447400, "Wayne Gretzky")])],
            },
        );

        let (index, teams) = agg.finish();
        let gretzky = index.get(PlayerId(8447400)).unwrap();
        assert_eq!(gretzky.teams, BTreeSet::from([TeamId(22), TeamId(26)]));
        assert_eq!(
            teams.names_for(&gretzky.teams),
            vec!["Edmonton Oilers".to_string(), "Los Angeles Kings".to_string()]
        );
    }
}
