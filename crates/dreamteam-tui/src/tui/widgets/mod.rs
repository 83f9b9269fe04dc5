// TUI widget modules for each panel.

pub mod results;
pub mod search_bar;
pub mod status_bar;
pub mod team;
