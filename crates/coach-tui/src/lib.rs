//! coach-tui: Terminal UI components
//!
//! Widgets and input handling for the coach chat client, built on ratatui
//! and crossterm.

pub mod input;
pub mod theme;
pub mod widgets;

pub use theme::Theme;
