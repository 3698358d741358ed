//! TUI module for the interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`, `update`: pure navigation types and transitions
//! - `viewport`, `dialog`, `line_input`: self-contained components
//! - `layout`, `view`, `theme`: pure rendering
//! - `run`: effects (terminal, event loop, backend calls)

pub mod dialog;
pub mod layout;
pub mod line_input;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
pub mod viewport;
