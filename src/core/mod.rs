//! Core module - Business logic
//!
//! Stores, the sync engine and relocation. Nothing in here prints;
//! results and errors go back to the CLI layer.

pub mod activity;
pub mod data;
pub mod entry;
pub mod error;
pub mod files;
pub mod ledger;
pub mod prompt;
pub mod relocate;
pub mod sync;
