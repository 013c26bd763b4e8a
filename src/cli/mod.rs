pub mod commands;
pub mod core;
pub mod help;
pub mod menus;
pub mod output;
pub mod registry;
mod shell;
pub mod ui;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
