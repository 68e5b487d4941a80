#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth color scales and map layer assembly.
//!
//! Derives a sequential color scale from joined per-country totals and
//! assembles the serializable layer an external map renderer consumes:
//! styled `GeoJSON` features, tooltip spec, legend, and viewport.

pub mod color;
pub mod layer;

use thiserror::Error;

/// Error returned when a color scale is built over no values at all.
///
/// Reached only when the boundary set itself is empty; zero-filled
/// totals still form a valid (degenerate) domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no boundary data available")]
pub struct EmptyDomainError;
