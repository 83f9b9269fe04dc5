// Integration tests for roster aggregation, search and validation working
// together through the public API.

use std::collections::{BTreeMap, BTreeSet};

use dreamteam_core::index::{PlayerIndex, SeasonRosterEntry};
use dreamteam_core::player::{PlayerDetail, PlayerId, Position, PositionType, TeamId};
use dreamteam_core::roster::RosterAggregator;
use dreamteam_core::search::search_players;
use dreamteam_core::season::season_windows;
use dreamteam_core::selection::{group_selection, Selection};
use dreamteam_core::validate::{validate_team, TeamError};
use dreamteam_core::wire::TeamsResponse;

use proptest::prelude::*;

fn season_json(teams: &[(u64, &str, &[(u64, &str)])]) -> TeamsResponse {
    let teams: Vec<serde_json::Value> = teams
        .iter()
        .map(|(id, name, players)| {
            let roster: Vec<serde_json::Value> = players
                .iter()
                .map(|(pid, pname)| serde_json::json!({ "person": { "id": pid, "fullName": pname } }))
                .collect();
            serde_json::json!({ "id": id, "name": name, "roster": { "roster": roster } })
        })
        .collect();
    serde_json::from_value(serde_json::json!({ "teams": teams })).unwrap()
}

fn detail(nationality: &str, kind: PositionType, code: &str) -> PlayerDetail {
    PlayerDetail {
        nationality: nationality.to_string(),
        position: Position {
            kind,
            code: code.to_string(),
        },
    }
}

#[test]
fn two_seasons_same_team_yield_single_team() {
    let seasons = season_windows(1987, 1989);
    assert_eq!(seasons[0].to_string(), "19871988");
    assert_eq!(seasons[1].to_string(), "19881989");

    let mut agg = RosterAggregator::new(seasons.clone());
    let response = season_json(&[(1, "T1", &[(1, "P1")])]);
    agg.ingest(seasons[1], &response);
    agg.ingest(seasons[0], &response);
    assert!(agg.is_complete());

    let (index, _teams) = agg.finish();
    assert_eq!(index.get(PlayerId(1)).unwrap().teams, BTreeSet::from([TeamId(1)]));
}

#[test]
fn select_validate_remove_scenario() {
    let seasons = season_windows(2000, 2001);
    let mut agg = RosterAggregator::new(seasons.clone());
    agg.ingest(
        seasons[0],
        &season_json(&[(1, "T1", &[(10, "Player Alpha"), (20, "Player Bravo")])]),
    );
    let (mut index, _teams) = agg.finish();

    let mut selection = Selection::new();

    index.attach_detail(PlayerId(10), detail("CA", PositionType::Forward, "C"));
    selection.push(PlayerId(10));
    assert!(validate_team(&index, &selection).is_empty());

    index.attach_detail(PlayerId(20), detail("US", PositionType::Defenseman, "D"));
    selection.push(PlayerId(20));
    assert_eq!(validate_team(&index, &selection), vec![TeamError::SharedTeam]);

    let groups = group_selection(&index, &selection);
    assert_eq!(groups.forwards.len(), 1);
    assert_eq!(groups.defensemen.len(), 1);

    selection.remove(PlayerId(20));
    assert!(validate_team(&index, &selection).is_empty());

    // The removed player is searchable again; the selected one is not.
    let hits = search_players(&index, "player", &selection);
    assert_eq!(hits, vec![PlayerId(20)]);
}

fn arb_entries() -> impl Strategy<Value = Vec<SeasonRosterEntry>> {
    prop::collection::vec((0u64..15, 0u64..8), 0..60).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(player, team)| SeasonRosterEntry {
                player_id: PlayerId(player),
                player_name: format!("Player {player}"),
                team_id: TeamId(team),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn merged_teams_equal_distinct_teams_per_player(
        (entries, shuffled) in arb_entries().prop_flat_map(|entries| {
            let shuffled = Just(entries.clone()).prop_shuffle();
            (Just(entries), shuffled)
        })
    ) {
        let mut expected: BTreeMap<PlayerId, BTreeSet<TeamId>> = BTreeMap::new();
        for e in &entries {
            expected.entry(e.player_id).or_default().insert(e.team_id);
        }

        let forward = PlayerIndex::from_entries(&entries);
        let reordered = PlayerIndex::from_entries(&shuffled);

        prop_assert_eq!(forward.len(), expected.len());
        for (id, teams) in &expected {
            prop_assert_eq!(&forward.get(*id).unwrap().teams, teams);
            prop_assert_eq!(&reordered.get(*id).unwrap().teams, teams);
        }
    }
}
