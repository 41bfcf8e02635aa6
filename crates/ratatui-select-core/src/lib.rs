//! `ratatui-select-core` provides a dropdown selection control for terminal UIs, plus the small
//! primitives it is built from.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs on the main thread, one event at a time.
//! - The selection is app-owned: handlers take the current value and return
//!   [`select::SelectAction::Changed`] with the next one. The widget never keeps a copy.
//! - Single vs. multiple selection is a type parameter ([`mode::Single`], [`mode::Multiple`]), so
//!   a view can only be paired with the value shape of its mode.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-select`. Use this crate directly if you
//! only need the widget.
//!
//! Useful entry points:
//! - [`select::SelectView`]: the control itself.
//! - [`option::SelectOption`]: identity-compared option handles.
//! - [`listener::KeyListeners`]: which controls may receive key events.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;

pub mod input;
pub mod keymap;
pub mod listener;
pub mod mode;
pub mod option;
pub mod select;
