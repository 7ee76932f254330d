//! # Arena Allocator
//!
//! A region-chain bump allocator for buffers that are released all at once.
//!
//! The arena owns an insertion-ordered chain of regions. Allocation bumps the
//! offset of the current (tail) region; when it is full the arena moves the
//! tail forward along the chain and, past the end, appends a new region of at
//! least the configured minimum capacity.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use super::allocator::{RegionAllocator, SystemAllocator};
use super::region::Region;
use crate::config::{AllocFailurePolicy, ArenaConfig};
use crate::error::{ArenaError, ArenaResult};

/// Source of arena identities, so views can be matched to their arena.
static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

/// A buffer handed out by [`Arena::alloc`].
///
/// A view carries no ownership. It names `len` bytes inside one region of the
/// arena that issued it and stays valid until that arena is next reset or
/// freed. Read and write it through [`Arena::get`] and [`Arena::get_mut`],
/// which reject views from an older generation or another arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArenaView {
    arena: u64,
    generation: u64,
    region: usize,
    offset: usize,
    len: usize,
}

impl ArenaView {
    /// Returns the length of the buffer in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-length buffer.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the index of the region holding the buffer (0 is the head).
    #[inline]
    #[must_use]
    pub const fn region(&self) -> usize {
        self.region
    }

    /// Returns the offset of the buffer inside its region.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the arena generation the view was issued at.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Byte range of the buffer inside its region.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Snapshot of one region in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionInfo {
    /// Position in the chain (0 is the head).
    pub index: usize,
    /// Bytes in use.
    pub count: usize,
    /// Total bytes.
    pub capacity: usize,
}

impl RegionInfo {
    /// Returns the free bytes at the end of the region.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.count
    }
}

/// A region-chain bump allocator.
///
/// Allocations are fast (bump an offset in the tail region). Memory is given
/// back all at once, logically by [`reset`](Arena::reset) (regions are kept
/// for reuse) or physically by [`free`](Arena::free) and on drop.
///
/// # Thread Safety
///
/// Every operation takes `&mut self`; share an arena between threads only
/// behind external synchronization. Distinct arenas are independent.
///
/// # Example
///
/// ```rust
/// use strata_core::Arena;
///
/// let mut arena = Arena::create(400);
///
/// let greeting = arena.alloc_copy(b"hello")?;
/// assert_eq!(arena.get(greeting)?, b"hello");
///
/// // Invalidate everything, keep the memory
/// arena.reset();
/// assert!(arena.get(greeting).is_err());
/// # Ok::<(), strata_core::ArenaError>(())
/// ```
#[derive(Debug)]
pub struct Arena<A: RegionAllocator = SystemAllocator> {
    /// The region chain in creation order. Index 0 is the head.
    regions: Vec<Region>,
    /// Region most recently used to satisfy an allocation. `None` iff the
    /// chain is empty.
    tail: Option<usize>,
    config: ArenaConfig,
    allocator: A,
    /// Bumped on every reset and free.
    generation: u64,
    id: u64,
}

impl Arena {
    /// Creates an empty arena with the default configuration.
    ///
    /// Equivalent to `Arena::create(0)` and `Arena::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Creates an empty arena whose new regions hold at least
    /// `region_capacity` bytes.
    ///
    /// # Arguments
    ///
    /// * `region_capacity` - Minimum region size in bytes, 0 for the default
    #[must_use]
    pub fn create(region_capacity: usize) -> Self {
        Self::with_config(ArenaConfig::with_region_capacity(region_capacity))
    }

    /// Creates an empty arena from a full configuration.
    #[must_use]
    pub fn with_config(config: ArenaConfig) -> Self {
        Self::with_allocator(config, SystemAllocator)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RegionAllocator> Arena<A> {
    /// Creates an empty arena that takes its regions from `allocator`.
    ///
    /// No memory is allocated until the first [`alloc`](Arena::alloc).
    #[must_use]
    pub fn with_allocator(config: ArenaConfig, allocator: A) -> Self {
        Self {
            regions: Vec::new(),
            tail: None,
            config,
            allocator,
            generation: 0,
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Allocates a buffer of exactly `size` bytes.
    ///
    /// The buffer comes from the tail region if it has room, otherwise from
    /// the first region after it that does, otherwise from a new region of
    /// `max(size, minimum capacity)` bytes appended to the chain. The tail
    /// only moves forward until the next reset.
    ///
    /// Contents are unspecified: after a reset they hold whatever was written
    /// before. Use [`alloc_zeroed`](Arena::alloc_zeroed) for cleared memory.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of bytes, zero allowed
    ///
    /// # Returns
    ///
    /// A view valid until the next reset or free of this arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfMemory`] if a new region is needed and the
    /// region allocator cannot provide it. The arena is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics instead of returning the error when the arena is configured
    /// with [`AllocFailurePolicy::Panic`].
    pub fn alloc(&mut self, size: usize) -> ArenaResult<ArenaView> {
        let Some(mut cursor) = self.tail else {
            let region = self.grow(size)?;
            return Ok(self.view(region, 0, size));
        };

        if !self.regions[cursor].fits(size) {
            while cursor + 1 < self.regions.len() && !self.regions[cursor].fits(size) {
                cursor += 1;
            }

            if !self.regions[cursor].fits(size) {
                let region = self.grow(size)?;
                return Ok(self.view(region, 0, size));
            }

            self.tail = Some(cursor);
        }

        let offset = self.regions[cursor].bump(size);
        Ok(self.view(cursor, offset, size))
    }

    /// Allocates a buffer and copies `bytes` into it.
    ///
    /// # Errors
    ///
    /// Same as [`alloc`](Arena::alloc).
    pub fn alloc_copy(&mut self, bytes: &[u8]) -> ArenaResult<ArenaView> {
        let view = self.alloc(bytes.len())?;
        self.get_mut(view)?.copy_from_slice(bytes);
        Ok(view)
    }

    /// Allocates a buffer of `size` zero bytes.
    ///
    /// # Errors
    ///
    /// Same as [`alloc`](Arena::alloc).
    pub fn alloc_zeroed(&mut self, size: usize) -> ArenaResult<ArenaView> {
        let view = self.alloc(size)?;
        self.get_mut(view)?.fill(0);
        Ok(view)
    }

    /// Marks every region empty and rewinds the tail to the head.
    ///
    /// No memory is released. Every view issued so far becomes stale. Does
    /// nothing on an empty arena.
    pub fn reset(&mut self) {
        if self.regions.is_empty() {
            return;
        }

        for region in &mut self.regions {
            region.clear();
        }
        self.tail = Some(0);
        self.generation += 1;

        tracing::debug!(
            regions = self.regions.len(),
            generation = self.generation,
            "arena reset"
        );
    }

    /// Releases every region and returns the arena to its empty state.
    ///
    /// The configuration goes back to the default as well, so the arena
    /// behaves exactly like a freshly created `Arena::default()` afterwards.
    /// Every view issued so far becomes stale.
    pub fn free(&mut self) {
        let released = self.release_regions();
        self.config = ArenaConfig::default();
        self.generation += 1;

        tracing::debug!(
            regions = released,
            generation = self.generation,
            "arena freed"
        );
    }

    /// Reads the bytes behind a view.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ForeignView`] for a view issued by another arena
    /// and [`ArenaError::StaleView`] for a view issued before the last reset
    /// or free.
    pub fn get(&self, view: ArenaView) -> ArenaResult<&[u8]> {
        self.check(view)?;
        self.regions
            .get(view.region)
            .and_then(|region| region.bytes(view.range()))
            .ok_or_else(|| self.stale(view))
    }

    /// Writes through a view.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Arena::get).
    pub fn get_mut(&mut self, view: ArenaView) -> ArenaResult<&mut [u8]> {
        self.check(view)?;
        let stale = self.stale(view);
        self.regions
            .get_mut(view.region)
            .and_then(|region| region.bytes_mut(view.range()))
            .ok_or(stale)
    }

    /// Returns `true` if the arena holds no regions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the number of regions in the chain.
    #[inline]
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Returns the index of the tail region, `None` on an empty arena.
    #[inline]
    #[must_use]
    pub const fn tail_index(&self) -> Option<usize> {
        self.tail
    }

    /// Iterates over the regions from head to end of chain.
    pub fn regions(&self) -> impl Iterator<Item = RegionInfo> + '_ {
        self.regions
            .iter()
            .enumerate()
            .map(|(index, region)| RegionInfo {
                index,
                count: region.count(),
                capacity: region.capacity(),
            })
    }

    /// Returns the bytes in use across all regions.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.regions.iter().map(Region::count).sum()
    }

    /// Returns the bytes held across all regions.
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        self.regions.iter().map(Region::capacity).sum()
    }

    /// Returns the current generation.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the configuration in effect.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Returns the region allocator.
    #[inline]
    #[must_use]
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Appends a region holding `size` claimed bytes and makes it the tail.
    ///
    /// Leaves the arena untouched on failure.
    fn grow(&mut self, size: usize) -> ArenaResult<usize> {
        let capacity = size.max(self.config.min_region_capacity());

        if self.regions.try_reserve(1).is_err() {
            return Err(self.alloc_failed(size, capacity));
        }

        let block = match self.allocator.allocate(capacity) {
            Some(block) if block.len() >= capacity => block,
            Some(short) => {
                self.allocator.release(short);
                return Err(self.alloc_failed(size, capacity));
            }
            None => return Err(self.alloc_failed(size, capacity)),
        };

        let index = self.regions.len();
        tracing::trace!(index, capacity = block.len(), requested = size, "arena region created");

        self.regions.push(Region::new(block, size));
        self.tail = Some(index);
        Ok(index)
    }

    fn alloc_failed(&self, requested: usize, region_capacity: usize) -> ArenaError {
        match self.config.on_alloc_failure {
            AllocFailurePolicy::Panic => panic!(
                "arena: could not acquire a {region_capacity}-byte region for a {requested}-byte allocation"
            ),
            AllocFailurePolicy::ReturnError => {
                tracing::debug!(requested, region_capacity, "arena region allocation failed");
                ArenaError::OutOfMemory {
                    requested,
                    region_capacity,
                }
            }
        }
    }

    /// Hands every region back to the allocator. Returns how many there were.
    fn release_regions(&mut self) -> usize {
        let regions = std::mem::take(&mut self.regions);
        let released = regions.len();
        for region in regions {
            self.allocator.release(region.into_block());
        }
        self.tail = None;
        released
    }

    #[inline]
    const fn view(&self, region: usize, offset: usize, len: usize) -> ArenaView {
        ArenaView {
            arena: self.id,
            generation: self.generation,
            region,
            offset,
            len,
        }
    }

    fn check(&self, view: ArenaView) -> ArenaResult<()> {
        if view.arena != self.id {
            return Err(ArenaError::ForeignView);
        }
        if view.generation != self.generation {
            return Err(self.stale(view));
        }
        Ok(())
    }

    const fn stale(&self, view: ArenaView) -> ArenaError {
        ArenaError::StaleView {
            view_generation: view.generation,
            arena_generation: self.generation,
        }
    }
}

impl<A: RegionAllocator> Drop for Arena<A> {
    fn drop(&mut self) {
        self.release_regions();
    }
}

impl<A: RegionAllocator> fmt::Display for Arena<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Arena: generation {}, {} region(s), {}/{} bytes in use",
            self.generation,
            self.regions.len(),
            self.used_bytes(),
            self.capacity_bytes()
        )?;
        for info in self.regions() {
            let marker = if self.tail == Some(info.index) { "  <- tail" } else { "" };
            writeln!(f, "Region #{}:{marker}", info.index + 1)?;
            writeln!(f, "    count    = {}", info.count)?;
            writeln!(f, "    capacity = {}", info.capacity)?;
        }
        Ok(())
    }
}
