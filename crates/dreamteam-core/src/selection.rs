// Selection store and the per-position team grouping derived from it.

use serde::{Deserialize, Serialize};

use crate::index::PlayerIndex;
use crate::player::{PlayerId, PlayerIndexEntry, PositionType};

/// Ordered, duplicate-free list of the players the user has picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<PlayerId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    /// Append a player. Returns `false` if already selected.
    pub fn push(&mut self, id: PlayerId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a player. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: PlayerId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&p| p != id);
        self.ids.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<PlayerId> for Selection {
    fn from_iter<T: IntoIterator<Item = PlayerId>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for id in iter {
            selection.push(id);
        }
        selection
    }
}

// ---------------------------------------------------------------------------
// Team grouping
// ---------------------------------------------------------------------------

/// Selected players split by position type, each group in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamGroups<T> {
    pub forwards: Vec<T>,
    pub defensemen: Vec<T>,
    pub goalies: Vec<T>,
}

impl<T> Default for TeamGroups<T> {
    fn default() -> Self {
        TeamGroups {
            forwards: Vec::new(),
            defensemen: Vec::new(),
            goalies: Vec::new(),
        }
    }
}

impl<T> TeamGroups<T> {
    pub fn len(&self) -> usize {
        self.forwards.len() + self.defensemen.len() + self.goalies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `f` to every member, keeping the grouping.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TeamGroups<U> {
        TeamGroups {
            forwards: self.forwards.into_iter().map(&mut f).collect(),
            defensemen: self.defensemen.into_iter().map(&mut f).collect(),
            goalies: self.goalies.into_iter().map(&mut f).collect(),
        }
    }
}

/// Partition players by position type.
///
/// Players whose detail is missing or whose type is not one of the three
/// groups are left out.
pub fn group_by_position<'a, I>(players: I) -> TeamGroups<&'a PlayerIndexEntry>
where
    I: IntoIterator<Item = &'a PlayerIndexEntry>,
{
    let mut groups = TeamGroups::default();

    for player in players {
        match player.position_type() {
            Some(PositionType::Forward) => groups.forwards.push(player),
            Some(PositionType::Defenseman) => groups.defensemen.push(player),
            Some(PositionType::Goalie) => groups.goalies.push(player),
            Some(PositionType::Other(_)) | None => {}
        }
    }

    groups
}

/// Group the current selection, looking each id up in the index.
pub fn group_selection<'a>(
    index: &'a PlayerIndex,
    selection: &Selection,
) -> TeamGroups<&'a PlayerIndexEntry> {
    group_by_position(selection.iter().filter_map(|id| index.get(id)))
}

/// Selected players that `group_selection` leaves out, in selection order.
/// They still count towards validation, so the UI lists them separately.
pub fn ungrouped_selection<'a>(
    index: &'a PlayerIndex,
    selection: &Selection,
) -> Vec<&'a PlayerIndexEntry> {
    selection
        .iter()
        .filter_map(|id| index.get(id))
        .filter(|p| {
            !matches!(
                p.position_type(),
                Some(PositionType::Forward | PositionType::Defenseman | PositionType::Goalie)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SeasonRosterEntry;
    use crate::player::{PlayerDetail, Position, TeamId};

    fn player(id: u64, kind: Option<PositionType>) -> PlayerIndexEntry {
        let mut entry = PlayerIndexEntry::new(PlayerId(id), format!("Player {id}"));
        entry.detail = kind.map(|kind| PlayerDetail {
            nationality: "CAN".into(),
            position: Position {
                kind,
                code: "X".into(),
            },
        });
        entry
    }

    #[test]
    fn push_is_idempotent() {
        let mut sel = Selection::new();
        assert!(sel.push(PlayerId(1)));
        assert!(!sel.push(PlayerId(1)));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut sel: Selection = [PlayerId(3), PlayerId(1), PlayerId(2)].into_iter().collect();
        assert!(sel.remove(PlayerId(1)));
        assert!(!sel.remove(PlayerId(1)));
        assert_eq!(sel.as_slice(), &[PlayerId(3), PlayerId(2)]);
    }

    #[test]
    fn from_iter_drops_duplicates() {
        let sel: Selection = [PlayerId(1), PlayerId(2), PlayerId(1)].into_iter().collect();
        assert_eq!(sel.as_slice(), &[PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn grouping_places_each_known_type_once() {
        let players = vec![
            player(1, Some(PositionType::Forward)),
            player(2, Some(PositionType::Defenseman)),
            player(3, Some(PositionType::Goalie)),
            player(4, Some(PositionType::Forward)),
        ];
        let groups = group_by_position(&players);
        let ids = |g: &Vec<&PlayerIndexEntry>| g.iter().map(|p| p.id.0).collect::<Vec<_>>();

        assert_eq!(ids(&groups.forwards), vec![1, 4]);
        assert_eq!(ids(&groups.defensemen), vec![2]);
        assert_eq!(ids(&groups.goalies), vec![3]);
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn grouping_excludes_unknown_types_and_missing_detail() {
        let players = vec![
            player(1, Some(PositionType::Other("Unknown".into()))),
            player(2, None),
            player(3, Some(PositionType::Goalie)),
        ];
        let groups = group_by_position(&players);
        assert!(groups.forwards.is_empty());
        assert!(groups.defensemen.is_empty());
        assert_eq!(groups.goalies.len(), 1);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn ungrouped_selection_lists_what_grouping_drops() {
        let mut index = PlayerIndex::new();
        for p in [
            player(1, Some(PositionType::Forward)),
            player(2, Some(PositionType::Other("Unknown".into()))),
            player(3, None),
        ] {
            index.merge_entry(&SeasonRosterEntry {
                player_id: p.id,
                player_name: p.name.clone(),
                team_id: TeamId(1),
            });
            if let Some(detail) = p.detail {
                index.attach_detail(p.id, detail);
            }
        }
        let sel: Selection = [PlayerId(3), PlayerId(1), PlayerId(2)].into_iter().collect();

        let grouped = group_selection(&index, &sel);
        let rest: Vec<u64> = ungrouped_selection(&index, &sel).iter().map(|p| p.id.0).collect();
        assert_eq!(rest, vec![3, 2]);
        assert_eq!(grouped.len() + rest.len(), sel.len());
    }

    #[test]
    fn map_keeps_grouping() {
        let players = vec![
            player(1, Some(PositionType::Forward)),
            player(2, Some(PositionType::Goalie)),
        ];
        let names = group_by_position(&players).map(|p| p.name.clone());
        assert_eq!(names.forwards, vec!["Player 1".to_string()]);
        assert_eq!(names.goalies, vec!["Player 2".to_string()]);
        assert!(names.defensemen.is_empty());
    }
}
