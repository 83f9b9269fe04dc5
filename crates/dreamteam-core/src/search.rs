// Player search: case-insensitive name substring match over the index.

use crate::index::PlayerIndex;
use crate::player::PlayerId;
use crate::selection::Selection;

/// Queries shorter than this match nothing.
pub const MIN_QUERY_CHARS: usize = 3;

/// Ids of players whose name contains `query` (ignoring case), in ascending
/// id order, leaving out anyone already selected.
///
/// Returns nothing for queries shorter than [`MIN_QUERY_CHARS`] characters.
pub fn search_players(index: &PlayerIndex, query: &str, selection: &Selection) -> Vec<PlayerId> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    index
        .iter()
        .filter(|p| !selection.contains(p.id))
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .map(|p| p.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SeasonRosterEntry;
    use crate::player::TeamId;
    use proptest::prelude::*;

    fn index_of(names: &[(u64, &str)]) -> PlayerIndex {
        let entries: Vec<SeasonRosterEntry> = names
            .iter()
            .map(|(id, name)| SeasonRosterEntry {
                player_id: PlayerId(*id),
                player_name: name.to_string(),
                team_id: TeamId(1),
            })
            .collect();
        PlayerIndex::from_entries(&entries)
    }

    fn sample_index() -> PlayerIndex {
        index_of(&[
            (8448208, "Jaromir Jagr"),
            (8447400, "Wayne Gretzky"),
            (8471214, "Alex Ovechkin"),
            (8458951, "Brent Gretzky"),
        ])
    }

    #[test]
    fn short_queries_match_nothing() {
        let index = sample_index();
        let sel = Selection::new();
        assert!(search_players(&index, "", &sel).is_empty());
        assert!(search_players(&index, "g", &sel).is_empty());
        assert!(search_players(&index, "gr", &sel).is_empty());
    }

    #[test]
    fn min_query_chars_is_the_shortest_accepted_length() {
        let index = index_of(&[(1, "Ann Abc")]);
        let sel = Selection::new();
        let query: String = "abc".chars().take(MIN_QUERY_CHARS).collect();
        assert_eq!(MIN_QUERY_CHARS, 3);
        assert_eq!(search_players(&index, &query, &sel), vec![PlayerId(1)]);
        assert!(search_players(&index, &query[..MIN_QUERY_CHARS - 1], &sel).is_empty());
    }

    #[test]
    fn match_is_case_insensitive_and_ordered_by_id() {
        let index = sample_index();
        let result = search_players(&index, "GRETZ", &Selection::new());
        assert_eq!(result, vec![PlayerId(8447400), PlayerId(8458951)]);
    }

    #[test]
    fn substring_matches_anywhere_in_name() {
        let index = sample_index();
        let result = search_players(&index, "vech", &Selection::new());
        assert_eq!(result, vec![PlayerId(8471214)]);
    }

    #[test]
    fn selected_players_are_excluded() {
        let index = sample_index();
        let sel: Selection = [PlayerId(8447400)].into_iter().collect();
        let result = search_players(&index, "gretzky", &sel);
        assert_eq!(result, vec![PlayerId(8458951)]);
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let index = index_of(&[(1, "Teemu Selänne"), (2, "Ä Äö")]);
        assert!(search_players(&index, "än", &Selection::new()).is_empty());
        assert_eq!(
            search_players(&index, "LÄN", &Selection::new()),
            vec![PlayerId(1)]
        );
    }

    proptest! {
        #[test]
        fn queries_of_two_chars_or_less_are_always_empty(
            query in "\\PC{0,2}",
            names in prop::collection::vec("[a-zA-Z ]{0,12}", 0..20),
            selected in prop::collection::vec(0u64..20, 0..5),
        ) {
            let pairs: Vec<(u64, &str)> = names
                .iter()
                .enumerate()
                .map(|(i, n)| (i as u64, n.as_str()))
                .collect();
            let index = index_of(&pairs);
            let sel: Selection = selected.into_iter().map(PlayerId).collect();
            prop_assert!(search_players(&index, &query, &sel).is_empty());
        }

        #[test]
        fn results_never_contain_selected_players(
            query in "[a-c]{3,4}",
            names in prop::collection::vec("[a-c]{3,10}", 1..30),
            selected in prop::collection::vec(0u64..30, 0..10),
        ) {
            let pairs: Vec<(u64, &str)> = names
                .iter()
                .enumerate()
                .map(|(i, n)| (i as u64, n.as_str()))
                .collect();
            let index = index_of(&pairs);
            let sel: Selection = selected.into_iter().map(PlayerId).collect();
            for id in search_players(&index, &query, &sel) {
                prop_assert!(!sel.contains(id));
            }
        }
    }
}
