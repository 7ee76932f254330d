//! # Arena Error Types
//!
//! All errors that can occur while allocating from or reading an arena.

use thiserror::Error;

/// Errors that can occur in the arena.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// The region allocator could not provide memory for a new region.
    ///
    /// The arena is left exactly as it was before the call.
    #[error("out of memory: could not acquire a {region_capacity}-byte region for a {requested}-byte allocation")]
    OutOfMemory {
        /// Bytes requested by the caller.
        requested: usize,
        /// Capacity of the region that could not be acquired.
        region_capacity: usize,
    },

    /// A view was used after the arena was reset or freed.
    #[error("stale view: issued at generation {view_generation}, arena is at generation {arena_generation}")]
    StaleView {
        /// Generation the view was issued at.
        view_generation: u64,
        /// Current generation of the arena.
        arena_generation: u64,
    },

    /// A view was used on an arena that did not issue it.
    #[error("view belongs to a different arena")]
    ForeignView,

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
