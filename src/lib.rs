//! Library crate for userdesk.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, drawer state and update loop (`app`)
//! - Command-line options and logging setup (`cli`)
//! - Store error type (`error`)
//! - Email filtering (`search`) and page arithmetic (`paging`)
//! - The user store and its backends (`store`)
//! - UI rendering (`ui`)
//!
//! It is used by the `userdesk` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod paging;
pub mod search;
pub mod store;
pub mod ui;

/// Store error and result types shared across the crate.
pub use error::{Result, StoreError};
