//! # Strata
//!
//! Facade over [`strata_core`] plus the smoke-test scenario used by the
//! `strata_demo` binary.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;

pub use strata_core as core;
pub use strata_core::{Arena, ArenaConfig, ArenaError, ArenaResult, ArenaView};
