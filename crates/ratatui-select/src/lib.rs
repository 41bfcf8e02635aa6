//! `ratatui-select` is the batteries-included facade over `ratatui-select-core`: the dropdown
//! control and its primitives, a help bar for the key bindings, and a host page that shows a
//! single-select and a multi-select control together.
pub use ratatui_select_core::input;
pub use ratatui_select_core::keymap;
pub use ratatui_select_core::listener;
pub use ratatui_select_core::mode;
pub use ratatui_select_core::option;
pub use ratatui_select_core::render;
pub use ratatui_select_core::select;
pub use ratatui_select_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_select_core::crossterm_input;

pub mod help;
pub mod host;
