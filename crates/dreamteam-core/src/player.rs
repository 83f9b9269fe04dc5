// Player and team identities, biographical detail, and the aggregated index entry.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream numeric player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream numeric team identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Broad position category reported by the person endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    Forward,
    Defenseman,
    Goalie,
    /// Any value the team view does not group (e.g. "Unknown").
    Other(String),
}

impl PositionType {
    /// Parse the upstream `primaryPosition.type` string.
    ///
    /// Both "Goalie" (what the API sends) and "Goalies" map to `Goalie`.
    pub fn from_api(s: &str) -> Self {
        match s {
            "Forward" => PositionType::Forward,
            "Defenseman" => PositionType::Defenseman,
            "Goalie" | "Goalies" => PositionType::Goalie,
            other => PositionType::Other(other.to_string()),
        }
    }

    /// Display label, matching the upstream spelling for known types.
    pub fn label(&self) -> &str {
        match self {
            PositionType::Forward => "Forward",
            PositionType::Defenseman => "Defenseman",
            PositionType::Goalie => "Goalie",
            PositionType::Other(raw) => raw.as_str(),
        }
    }
}

/// A player's primary position: broad type plus the short code (C, LW, D, G...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub kind: PositionType,
    pub code: String,
}

/// Biographical data fetched on demand when a player is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub nationality: String,
    pub position: Position,
}

impl PlayerDetail {
    /// One-line summary, e.g. "CAN - Forward (C)".
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ({})",
            self.nationality,
            self.position.kind.label(),
            self.position.code
        )
    }
}

// ---------------------------------------------------------------------------
// Index entries
// ---------------------------------------------------------------------------

/// A team discovered while processing season rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
}

/// Aggregated view of one player across every fetched season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIndexEntry {
    pub id: PlayerId,
    pub name: String,
    /// Every team the player appeared on. Only ever grows.
    pub teams: BTreeSet<TeamId>,
    /// Populated once the player has been successfully added.
    pub detail: Option<PlayerDetail>,
}

impl PlayerIndexEntry {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        PlayerIndexEntry {
            id,
            name: name.into(),
            teams: BTreeSet::new(),
            detail: None,
        }
    }

    /// The position type, if detail has been resolved.
    pub fn position_type(&self) -> Option<&PositionType> {
        self.detail.as_ref().map(|d| &d.position.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_type_parses_known_values() {
        assert_eq!(PositionType::from_api("Forward"), PositionType::Forward);
        assert_eq!(PositionType::from_api("Defenseman"), PositionType::Defenseman);
        assert_eq!(PositionType::from_api("Goalie"), PositionType::Goalie);
        assert_eq!(PositionType::from_api("Goalies"), PositionType::Goalie);
    }

    #[test]
    fn position_type_keeps_unknown_values() {
        let kind = PositionType::from_api("Unknown");
        assert_eq!(kind, PositionType::Other("Unknown".into()));
        assert_eq!(kind.label(), "Unknown");
    }

    #[test]
    fn detail_summary_format() {
        let detail = PlayerDetail {
            nationality: "SWE".into(),
            position: Position {
                kind: PositionType::Defenseman,
                code: "D".into(),
            },
        };
        assert_eq!(detail.summary(), "SWE - Defenseman (D)");
    }

    #[test]
    fn new_entry_has_no_teams_or_detail() {
        let entry = PlayerIndexEntry::new(PlayerId(8471214), "Alex Ovechkin");
        assert!(entry.teams.is_empty());
        assert!(entry.detail.is_none());
        assert!(entry.position_type().is_none());
    }
}
