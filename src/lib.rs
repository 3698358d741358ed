//! gitnav: menu-driven terminal front end for git.

pub mod backend;
pub mod commands;
pub mod config;
pub mod help;
pub mod menu;
pub mod repo;
pub mod tui;
pub mod types;
