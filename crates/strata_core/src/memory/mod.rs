//! # Memory Management
//!
//! Region-chain arenas for buffers that share one lifetime.
//!
//! ## Design Philosophy
//!
//! Memory is released in bulk, never per object:
//! - `alloc` bumps an offset, no bookkeeping per buffer
//! - `reset` empties every region and keeps it for reuse
//! - `free` hands every region back to the region allocator

mod allocator;
mod arena;
mod region;

pub use allocator::{BudgetAllocator, RegionAllocator, SystemAllocator};
pub use arena::{Arena, ArenaView, RegionInfo};
