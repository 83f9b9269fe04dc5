// Library root: the orchestrator, the stats API client and the messages
// exchanged between them and the UI.

pub mod app;
pub mod client;
pub mod protocol;
