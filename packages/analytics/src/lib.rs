#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytical core over loaded occurrence and boundary data.
//!
//! Pure functions, run in sequence per dashboard frame: filter records
//! to a year selection, sum the survivors per country, then left-join
//! the totals onto the boundary set. Each stage is total over
//! well-typed input; the join reports dropped aggregates instead of
//! erroring.

pub mod aggregate;
pub mod filter;
pub mod join;
