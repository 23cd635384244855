//! achtrack - offline-first achievement tracker
//!
//! Mirrors a remote achievement catalog (groups → categories → achievements)
//! into local JSON documents and tracks tiered progress on top of it.
//!
//! ## Layers
//!
//! - [`cache`]: one JSON document per kind under the data directory
//! - [`api`]: the remote catalog and account endpoints
//! - [`catalog`]: the in-memory catalog, hydrated from cache or API
//! - [`progress`]: the tier state machine and the persisted user overlay
//! - [`view`]: tree, search and filter projections
//! - [`tracker`]: the single owner tying them together
//!
//! The local record wins on conflicts: account data can only set the
//! coarse completion flag, never tier or progress.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod progress;
pub mod selection;
pub mod timers;
pub mod tracker;
pub mod view;

pub use domain::*;
pub use error::ErrorKind;
