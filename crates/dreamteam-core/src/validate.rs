// Team validation: no two selected players may share a team or a nationality.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::index::PlayerIndex;
use crate::selection::Selection;

/// An advisory rule violation. Violations never block adding or removing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum TeamError {
    #[error("Two or more players have played on the same team.")]
    SharedTeam,
    #[error("Two or more players have the same nationality.")]
    SharedNationality,
}

/// Check the selection against both uniqueness rules.
///
/// The team check flattens every selected player's team set; the nationality
/// check compares resolved nationalities. Either check fires when the distinct
/// count is smaller than the flattened count. A shared-team error, if any,
/// comes first.
pub fn validate_team(index: &PlayerIndex, selection: &Selection) -> Vec<TeamError> {
    if selection.is_empty() {
        return Vec::new();
    }

    let mut team_count = 0usize;
    let mut distinct_teams = HashSet::new();
    let mut nationality_count = 0usize;
    let mut distinct_nationalities = HashSet::new();

    for id in selection.iter() {
        let Some(player) = index.get(id) else {
            debug!(player_id = %id, "selected player missing from index, skipping validation");
            continue;
        };

        team_count += player.teams.len();
        distinct_teams.extend(player.teams.iter().copied());

        match &player.detail {
            Some(detail) => {
                nationality_count += 1;
                distinct_nationalities.insert(detail.nationality.as_str());
            }
            None => {
                debug!(player_id = %id, "selected player has no detail, skipping nationality check");
            }
        }
    }

    let mut errors = Vec::new();
    if distinct_teams.len() < team_count {
        errors.push(TeamError::SharedTeam);
    }
    if distinct_nationalities.len() < nationality_count {
        errors.push(TeamError::SharedNationality);
    }
    errors
}
