//! # hudori-common
//!
//! Configuration and the typed request envelopes the UI sends to the bridge.
//! No I/O beyond reading configuration sources lives here.

pub mod config;
pub mod models;
