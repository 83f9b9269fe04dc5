// Library root: exposes the terminal UI so its state handling and widgets
// can be tested apart from the binary.

pub mod tui;
