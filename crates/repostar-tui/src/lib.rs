// Terminal UI implementation using ratatui

pub mod app;
pub mod item;
pub mod nav;
pub mod runner;
pub mod ui;

pub use app::{Action, App, InputMode};
pub use nav::Tab;
pub use runner::run_tui;
