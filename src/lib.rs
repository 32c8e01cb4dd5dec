//! swagrec - Swagger Records
//!
//! Keeps track of which developer was last assigned to which API service.
//!
//! ## Key Concepts
//!
//! - **Ledger**: service name to assignment history, newest first
//! - **Working copy**: data and log files in the workspace directory
//! - **Permanent backup**: copies elsewhere, reconciled by `sync_backups`
//! - **Activity log**: append-only, newest-first record of every assignment

pub mod cli;
pub mod config;
pub mod core;

pub use crate::config::{Config, Workspace};
pub use crate::core::error::{RecordsError, Result};
pub use crate::core::ledger::Ledger;
pub use crate::core::sync::{sync_backups, SyncOutcome, SyncPaths, SyncReport};
