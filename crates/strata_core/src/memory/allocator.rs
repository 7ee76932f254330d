//! # Region Allocators
//!
//! Where an arena's regions come from and where they go on release.

/// Source of region memory for an arena.
///
/// An arena asks for a block each time it grows its region chain and hands
/// every block back through [`release`](RegionAllocator::release) on free or
/// drop. Nothing else is allocated through this trait.
pub trait RegionAllocator {
    /// Allocates a block of at least `capacity` bytes.
    ///
    /// Returns `None` when the memory is not available. A block shorter than
    /// `capacity` is treated by the arena as a failure and released again.
    fn allocate(&mut self, capacity: usize) -> Option<Box<[u8]>>;

    /// Takes back a block previously returned by `allocate`.
    fn release(&mut self, block: Box<[u8]>) {
        drop(block);
    }
}

/// Allocates regions from the global heap.
///
/// Uses fallible reservation, so heap exhaustion is reported as `None`
/// instead of aborting the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemAllocator;

impl RegionAllocator for SystemAllocator {
    fn allocate(&mut self, capacity: usize) -> Option<Box<[u8]>> {
        let mut block = Vec::new();
        block.try_reserve_exact(capacity).ok()?;
        block.resize(capacity, 0);
        Some(block.into_boxed_slice())
    }
}

/// Allocates regions from the global heap up to a fixed byte budget.
///
/// Useful to bound the memory one arena may hold. Released blocks return
/// their bytes to the budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BudgetAllocator {
    /// Maximum number of bytes held at once.
    limit: usize,
    /// Bytes currently handed out.
    in_use: usize,
    /// Number of blocks handed out over the allocator's lifetime.
    allocations: usize,
    /// Number of blocks taken back over the allocator's lifetime.
    releases: usize,
}

impl BudgetAllocator {
    /// Creates an allocator that never holds more than `limit` bytes.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: 0,
            allocations: 0,
            releases: 0,
        }
    }

    /// Returns the byte budget.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the bytes currently handed out.
    #[inline]
    #[must_use]
    pub const fn in_use(&self) -> usize {
        self.in_use
    }

    /// Returns the bytes still available.
    #[inline]
    #[must_use]
    pub const fn available(&self) -> usize {
        self.limit - self.in_use
    }

    /// Returns how many blocks were allocated so far.
    #[inline]
    #[must_use]
    pub const fn allocations(&self) -> usize {
        self.allocations
    }

    /// Returns how many blocks were released so far.
    #[inline]
    #[must_use]
    pub const fn releases(&self) -> usize {
        self.releases
    }
}

impl RegionAllocator for BudgetAllocator {
    fn allocate(&mut self, capacity: usize) -> Option<Box<[u8]>> {
        if capacity > self.available() {
            return None;
        }
        let block = SystemAllocator.allocate(capacity)?;
        self.in_use += block.len();
        self.allocations += 1;
        Some(block)
    }

    fn release(&mut self, block: Box<[u8]>) {
        self.in_use = self.in_use.saturating_sub(block.len());
        self.releases += 1;
    }
}
