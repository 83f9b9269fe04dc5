// Response shapes for the upstream stats API.
//
// Only the fields the aggregator and detail resolver read are modelled;
// serde ignores everything else.

use serde::Deserialize;

use crate::player::{PlayerDetail, PlayerId, Position, PositionType, TeamId};

// ---------------------------------------------------------------------------
// GET /teams?expand=team.roster&season=YYYYYYYY
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamPayload {
    pub id: TeamId,
    pub name: String,
    /// Absent for at least one historical team-season (2004-05 New Jersey).
    #[serde(default)]
    pub roster: Option<RosterPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterPayload {
    #[serde(default)]
    pub roster: Vec<RosterSpot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSpot {
    pub person: PersonRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub id: PlayerId,
    pub full_name: String,
}

// ---------------------------------------------------------------------------
// GET /people/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<PersonRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub nationality: String,
    pub primary_position: PrimaryPosition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryPosition {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
}

impl PeopleResponse {
    /// Detail from the first person record, if the response carried one.
    pub fn into_detail(self) -> Option<PlayerDetail> {
        self.people.into_iter().next().map(PersonRecord::into_detail)
    }
}

impl PersonRecord {
    pub fn into_detail(self) -> PlayerDetail {
        PlayerDetail {
            nationality: self.nationality,
            position: Position {
                kind: PositionType::from_api(&self.primary_position.kind),
                code: self.primary_position.code,
            },
        }
    }
}
