//! Frame-aligned write batch.
//!
//! One slot per tracked element. Staging into an occupied slot overwrites it,
//! so any number of signals between two redraws collapse into one write per
//! element. The batch also remembers whether a frame has already been
//! requested so the synchronizer asks the scheduler at most once per frame.

#[derive(Clone, Debug)]
pub struct FrameBatch<T> {
    slots: Vec<Option<T>>,
    frame_requested: bool,
}

impl<T> FrameBatch<T> {
    pub fn with_slots(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            frame_requested: false,
        }
    }

    /// Stage the latest value for `slot`. Out-of-range slots are ignored.
    #[inline]
    pub fn stage(&mut self, slot: usize, value: T) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = Some(value);
        }
    }

    /// Forget whatever is staged for `slot`.
    #[inline]
    pub fn unstage(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = None;
        }
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True exactly once per frame when there is something to flush: the
    /// caller must then request a frame. Later calls return false until
    /// [`FrameBatch::take_pending`] releases the frame.
    pub fn claim_frame(&mut self) -> bool {
        if self.frame_requested || self.is_empty() {
            return false;
        }
        self.frame_requested = true;
        true
    }

    #[inline]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Give up the frame claim without draining, for a frame request the
    /// scheduler refused. Staged values stay for the next claim.
    #[inline]
    pub fn release_frame(&mut self) {
        self.frame_requested = false;
    }

    /// Drain staged values in slot order and release the frame claim.
    pub fn take_pending(&mut self) -> Vec<(usize, T)> {
        self.frame_requested = false;
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.take().map(|v| (i, v)))
            .collect()
    }

    /// Drop everything staged. The frame claim is kept: a frame already
    /// requested will still fire and must find nothing to do.
    pub fn clear(&mut self) {
        for s in &mut self.slots {
            *s = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaging_collapses_to_latest() {
        let mut batch = FrameBatch::with_slots(2);
        batch.stage(0, 1.0);
        batch.stage(0, 2.0);
        batch.stage(0, 3.0);
        assert_eq!(batch.pending_len(), 1);
        assert_eq!(batch.take_pending(), vec![(0, 3.0)]);
        assert!(batch.is_empty());
    }

    #[test]
    fn frame_is_claimed_once_until_drained() {
        let mut batch = FrameBatch::with_slots(3);
        assert!(!batch.claim_frame(), "nothing staged");
        batch.stage(2, 'a');
        assert!(batch.claim_frame());
        batch.stage(1, 'b');
        assert!(!batch.claim_frame());
        assert!(batch.frame_requested());
        assert_eq!(batch.take_pending(), vec![(1, 'b'), (2, 'a')]);
        assert!(!batch.frame_requested());
        batch.stage(0, 'c');
        assert!(batch.claim_frame());
    }

    #[test]
    fn unstage_drops_a_single_slot() {
        let mut batch = FrameBatch::with_slots(2);
        batch.stage(0, 1.0);
        batch.stage(1, 2.0);
        batch.unstage(0);
        batch.unstage(9);
        assert_eq!(batch.take_pending(), vec![(1, 2.0)]);
    }

    #[test]
    fn released_claim_can_be_taken_again() {
        let mut batch = FrameBatch::with_slots(1);
        batch.stage(0, 4u8);
        assert!(batch.claim_frame());
        batch.release_frame();
        assert_eq!(batch.pending_len(), 1);
        assert!(batch.claim_frame());
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let mut batch = FrameBatch::with_slots(1);
        batch.stage(5, 1u8);
        assert!(batch.is_empty());
    }

    #[test]
    fn clear_keeps_outstanding_claim() {
        let mut batch = FrameBatch::with_slots(1);
        batch.stage(0, 1u8);
        assert!(batch.claim_frame());
        batch.clear();
        assert!(batch.frame_requested());
        assert!(batch.take_pending().is_empty());
    }
}
