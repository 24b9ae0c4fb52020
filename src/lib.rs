//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - Directory records (`model`) and the HTTP source they come from (`api`)
//! - One-shot background loading (`loader`)
//! - Filtering and sorting of the loaded list (`search`)
//! - Application state, reducer and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - Command-line configuration (`config`), logging setup (`logging`)
//!   and the load error type (`error`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{LOAD_FAILURE_MESSAGE, LoadFailure};
pub use model::User;
pub use search::SortKey;
