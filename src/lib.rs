//! OdontoChart library
//!
//! Dental charting engine: a per-surface treatment chart for a patient's
//! mouth, the tool-driven rules that mutate it, and the two read-only
//! projections (per-surface and whole-tooth) that renderers draw from.
//! The terminal editor and the web API are thin surfaces over this core.

// Module declarations
pub mod charting;
pub mod config;
pub mod constants;
pub mod models;
pub mod projection;
pub mod services;
#[cfg(feature = "ratatui")]
pub mod shortcuts;
#[cfg(feature = "ratatui")]
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
