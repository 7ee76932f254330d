//! # Handle Operations
//!
//! The four arena operations over an optional handle. A missing handle is
//! never an error: every operation on `None` does nothing, and `alloc`
//! returns `Ok(None)`.
//!
//! ```rust
//! use strata_core::handle;
//!
//! let mut arena = handle::create(400);
//! let view = handle::alloc(Some(&mut arena), 100)?;
//! assert_eq!(view.map(|v| v.len()), Some(100));
//!
//! assert_eq!(handle::alloc::<strata_core::SystemAllocator>(None, 100)?, None);
//! handle::reset(Some(&mut arena));
//! handle::free(Some(&mut arena));
//! # Ok::<(), strata_core::ArenaError>(())
//! ```

use crate::error::ArenaResult;
use crate::memory::{Arena, ArenaView, RegionAllocator};

/// Creates an empty arena with the given minimum region capacity
/// (0 for the default).
#[must_use]
pub fn create(region_capacity: usize) -> Arena {
    Arena::create(region_capacity)
}

/// Allocates `size` bytes from `arena`, if there is one.
///
/// # Errors
///
/// Same as [`Arena::alloc`].
pub fn alloc<A: RegionAllocator>(
    arena: Option<&mut Arena<A>>,
    size: usize,
) -> ArenaResult<Option<ArenaView>> {
    arena.map(|arena| arena.alloc(size)).transpose()
}

/// Resets `arena`, if there is one.
pub fn reset<A: RegionAllocator>(arena: Option<&mut Arena<A>>) {
    if let Some(arena) = arena {
        arena.reset();
    }
}

/// Frees `arena`, if there is one.
pub fn free<A: RegionAllocator>(arena: Option<&mut Arena<A>>) {
    if let Some(arena) = arena {
        arena.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SystemAllocator;

    #[test]
    fn test_none_is_noop() {
        assert_eq!(alloc::<SystemAllocator>(None, 10), Ok(None));
        reset::<SystemAllocator>(None);
        free::<SystemAllocator>(None);
    }

    #[test]
    fn test_some_forwards() {
        let mut arena = create(400);

        let view = alloc(Some(&mut arena), 100).unwrap().unwrap();
        assert_eq!(view.len(), 100);
        assert_eq!(arena.used_bytes(), 100);

        reset(Some(&mut arena));
        assert_eq!(arena.used_bytes(), 0);
        assert_eq!(arena.region_count(), 1);

        free(Some(&mut arena));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_create_matches_default() {
        let mut created = create(0);
        let mut default = Arena::default();
        created.alloc(10).unwrap();
        default.alloc(10).unwrap();
        assert_eq!(created.capacity_bytes(), default.capacity_bytes());
        assert_eq!(created.config(), default.config());
    }
}
