//! Filtering and aggregation core for press production spreadsheets.
//!
//! [`data`] holds the pure pipeline (decode → normalize → facets / filter /
//! statistics / suggestions → export). [`worker`] runs ingestion off the UI
//! thread and [`config`] holds the startup options.

pub mod config;
pub mod data;
pub mod worker;
