//! # Region
//!
//! One contiguous block in an arena's chain, handed out front to back.

use std::ops::Range;

/// A contiguous byte block with a bump offset.
///
/// `count` is the high-water mark: bytes `[0, count)` are handed out,
/// `[count, capacity)` are free. It only moves forward until the owning
/// arena is reset.
#[derive(Debug)]
pub(crate) struct Region {
    /// The backing block, obtained from the region allocator.
    data: Box<[u8]>,
    /// Bytes currently in use.
    count: usize,
}

impl Region {
    /// Wraps a freshly allocated block with `count` bytes already claimed.
    pub(crate) fn new(data: Box<[u8]>, count: usize) -> Self {
        debug_assert!(count <= data.len());
        Self { data, count }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) const fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.capacity() - self.count
    }

    #[inline]
    pub(crate) fn fits(&self, size: usize) -> bool {
        size <= self.remaining()
    }

    /// Claims `size` bytes and returns the offset of the first one.
    ///
    /// The offset is read before the bump pointer moves.
    #[inline]
    pub(crate) fn bump(&mut self, size: usize) -> usize {
        debug_assert!(self.fits(size));
        let offset = self.count;
        self.count += size;
        offset
    }

    /// Marks the whole region free again. Contents are left as they are.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub(crate) fn bytes(&self, range: Range<usize>) -> Option<&[u8]> {
        self.data.get(range)
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self, range: Range<usize>) -> Option<&mut [u8]> {
        self.data.get_mut(range)
    }

    /// Gives the backing block back, for release to the region allocator.
    pub(crate) fn into_block(self) -> Box<[u8]> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(capacity: usize) -> Region {
        Region::new(vec![0u8; capacity].into_boxed_slice(), 0)
    }

    #[test]
    fn test_bump_returns_previous_offset() {
        let mut r = region(400);
        assert_eq!(r.bump(100), 0);
        assert_eq!(r.bump(100), 100);
        assert_eq!(r.bump(50), 200);
        assert_eq!(r.count(), 250);
        assert_eq!(r.remaining(), 150);
    }

    #[test]
    fn test_fits_boundary() {
        let mut r = region(400);
        r.bump(300);
        assert!(r.fits(100));
        assert!(!r.fits(101));
        assert!(r.fits(0));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut r = region(400);
        r.bump(400);
        assert_eq!(r.remaining(), 0);

        r.clear();
        assert_eq!(r.count(), 0);
        assert_eq!(r.capacity(), 400);
    }

    #[test]
    fn test_bytes_out_of_range() {
        let r = region(16);
        assert!(r.bytes(0..16).is_some());
        assert!(r.bytes(8..17).is_none());
    }
}
