//! # Strata Core
//!
//! Region-chain bump allocation for buffers with a shared lifetime:
//! everything allocated for one parse pass, one frame, one request.
//!
//! ## Architecture Rules
//!
//! 1. **No per-object free** - an arena is reset or freed as a whole
//! 2. **Regions are reused** - reset keeps memory, only free releases it
//! 3. **Checked views** - `alloc` hands out index handles tagged with the
//!    arena generation, so use after reset is an error, not a dangling read
//!
//! ## Example
//!
//! ```rust
//! use strata_core::{Arena, ArenaConfig};
//!
//! let mut arena = Arena::with_config(ArenaConfig::with_region_capacity(400));
//!
//! for _ in 0..4 {
//!     arena.alloc(100)?;
//! }
//! assert_eq!(arena.region_count(), 1);
//!
//! arena.alloc(100)?;
//! assert_eq!(arena.region_count(), 2);
//!
//! arena.reset();
//! let view = arena.alloc(300)?;
//! assert_eq!(view.region(), 0);
//! # Ok::<(), strata_core::ArenaError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod handle;
pub mod memory;

pub use config::{AllocFailurePolicy, ArenaConfig, DEFAULT_REGION_CAPACITY};
pub use error::{ArenaError, ArenaResult};
pub use memory::{Arena, ArenaView, BudgetAllocator, RegionAllocator, RegionInfo, SystemAllocator};
