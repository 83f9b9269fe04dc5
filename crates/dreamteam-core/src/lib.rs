// Library root: the data model and pure logic behind the dream team builder.
//
// Everything here is synchronous and I/O free apart from config loading, so
// the app crate can call it from its event loop and tests can drive it
// directly.

pub mod config;
pub mod index;
pub mod player;
pub mod roster;
pub mod search;
pub mod season;
pub mod selection;
pub mod validate;
pub mod wire;
