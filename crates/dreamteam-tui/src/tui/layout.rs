// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Search Input (3 rows)                             |
// +-------------------------+------------------------+
// | Results (55%)            | Team (45%)             |
// |                          | +- Roster (fill) -----+|
// |                          | +- Errors (4) --------+|
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Loading progress, index size, selection count.
    pub status_bar: Rect,
    pub search: Rect,
    /// Left side: players matching the query.
    pub results: Rect,
    /// Right side top: the selection grouped by position.
    pub team: Rect,
    /// Right side bottom: validation messages.
    pub errors: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | search(3) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let status_bar = vertical[0];
    let search = vertical[1];
    let middle = vertical[2];
    let help_bar = vertical[3];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(middle);

    let results = horizontal[0];

    let team_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(horizontal[1]);

    AppLayout {
        status_bar,
        search,
        results,
        team: team_column[0],
        errors: team_column[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 6] {
        [
            ("status_bar", layout.status_bar),
            ("search", layout.search),
            ("results", layout.results),
            ("team", layout.team),
            ("errors", layout.errors),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn fixed_rows_have_fixed_heights() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.errors.height, 4);
    }

    #[test]
    fn results_left_of_team() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        assert!(layout.results.x < layout.team.x);
        assert!(layout.results.width > layout.team.width);
        assert_eq!(layout.team.width, layout.errors.width);
        assert!(layout.team.y < layout.errors.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = build_layout(area);
        for (name, rect) in all_rects(&layout) {
            assert!(rect.x + rect.width <= area.width, "{name} exceeds width");
            assert!(rect.y + rect.height <= area.height, "{name} exceeds height");
        }
    }
}
