//! Bookkeeping for frames in flight which does not touch the GPU.

/// The number of frames the CPU may record ahead of the GPU.
pub const MAX_INFLIGHT_FRAMES: usize = 2;

/// The index of the current slot in a ring of frame slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RingCursor {
    current: usize,
    slot_count: usize,
}

impl RingCursor {
    /// A cursor at slot 0 of a ring with `slot_count` slots. An empty ring is
    /// treated as a single slot.
    pub fn new(slot_count: usize) -> Self {
        Self {
            current: 0,
            slot_count: slot_count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Move to the next slot, wrapping back to 0 after the last one.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.slot_count;
    }
}

impl Default for RingCursor {
    fn default() -> Self {
        Self::new(MAX_INFLIGHT_FRAMES)
    }
}

/// Tracks, for every swapchain image, which frame slot last submitted work
/// that renders into it.
///
/// A slot index stands in for that slot's fence.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InFlightImageMap {
    owners: Vec<Option<usize>>,
}

impl InFlightImageMap {
    /// A map for `image_count` images, none of which have been used.
    pub fn new(image_count: usize) -> Self {
        Self {
            owners: vec![None; image_count],
        }
    }

    /// Forget every owner and resize for a rebuilt swapchain.
    pub fn reset(&mut self, image_count: usize) {
        self.owners.clear();
        self.owners.resize(image_count, None);
    }

    /// The number of swapchain images tracked.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// The slot which last used the image, if any.
    ///
    /// Out of range indices have no owner.
    pub fn owner(&self, image_index: usize) -> Option<usize> {
        self.owners.get(image_index).copied().flatten()
    }

    /// Record `slot` as the new owner of the image and return the previous
    /// owner.
    ///
    /// The map grows when the presentation engine hands back an index beyond
    /// the number of images it reported.
    pub fn claim(&mut self, image_index: usize, slot: usize) -> Option<usize> {
        if image_index >= self.owners.len() {
            self.owners.resize(image_index + 1, None);
        }
        self.owners[image_index].replace(slot)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_wraps_after_the_last_slot() {
        let mut cursor = RingCursor::default();
        assert_eq!(cursor.slot_count(), MAX_INFLIGHT_FRAMES);
        let visited: Vec<usize> = (0..5)
            .map(|_| {
                let current = cursor.current();
                cursor.advance();
                current
            })
            .collect();
        assert_eq!(visited, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn cursor_of_empty_ring_stays_at_zero() {
        let mut cursor = RingCursor::new(0);
        cursor.advance();
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn new_map_has_no_owners() {
        let map = InFlightImageMap::new(3);
        assert_eq!(map.len(), 3);
        assert!((0..3).all(|index| map.owner(index).is_none()));
    }

    #[test]
    fn claim_returns_previous_owner() {
        let mut map = InFlightImageMap::new(3);
        assert_eq!(map.claim(1, 0), None);
        assert_eq!(map.owner(1), Some(0));
        assert_eq!(map.claim(1, 1), Some(0));
        assert_eq!(map.owner(1), Some(1));
    }

    #[test]
    fn reset_clears_and_resizes() {
        let mut map = InFlightImageMap::new(3);
        map.claim(0, 1);
        map.claim(2, 0);
        map.reset(4);
        assert_eq!(map, InFlightImageMap::new(4));
    }

    #[test]
    fn claim_grows_for_unexpected_index() {
        let mut map = InFlightImageMap::new(2);
        assert_eq!(map.claim(3, 1), None);
        assert_eq!(map.len(), 4);
        assert_eq!(map.owner(3), Some(1));
        assert_eq!(map.owner(7), None);
    }
}
