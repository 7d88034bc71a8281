//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod barbacoa;
pub mod export;
pub mod roster;
pub mod serve;
pub mod settle;

pub use audit::handle_audit_command;
pub use barbacoa::{handle_delete_command, handle_list_command, handle_show_command};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use roster::{handle_roster_command, RosterCommands};
pub use serve::handle_serve_command;
pub use settle::{handle_save_command, handle_settle_command, ExpenseInput, SaveArgs, SettleArgs};
