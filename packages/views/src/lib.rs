#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Table and bar-chart view builders.
//!
//! Turns filtered records and per-country totals into the serializable
//! shapes the dashboard surfaces render, carrying the fixed Spanish
//! display labels. Rendering itself stays outside this workspace.

pub mod chart;
pub mod table;
