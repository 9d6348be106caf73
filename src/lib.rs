//! # Green Ledger
//!
//! Terminal front-end for a personal carbon-footprint tracker backed by a
//! remote REST service.
//!
//! ## Overview
//!
//! Every screen fetches its own data from the service and renders it as
//! colored text or JSON:
//! - Home: total footprint, per-category totals and the 5 most recent entries,
//!   plus the add/update/delete entry flows
//! - Analytics: monthly bars with emission tiers, category shares, insights
//! - Map: static placeholder with the emission legend
//!
//! The service owns all state and all aggregation. This crate only derives
//! presentation values (bar widths, percentages, averages, largest category).
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Command-line argument parsing
pub mod cli;

/// REST client for the carbon entry service
pub mod client;

/// Base URL and timeout resolution
pub mod config;

/// Text and JSON rendering of the screens
pub mod display;

/// Add/update form state and validation
pub mod form;

/// Presentation-time derivations over a summary
pub mod insights;

/// Entry and summary records
pub mod models;

/// Per-screen controllers
pub mod screens;

/// Formatting, environment and logging helpers
pub mod utils;
