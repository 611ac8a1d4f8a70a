use serde::{Deserialize, Serialize};

/// Counters kept by a live synchronizer. Cheap to copy out of a handle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Scroll or slide-change signals handled while attached.
    pub signals: u64,
    pub frames_requested: u64,
    pub frames_flushed: u64,
    /// Visual writes applied to hosts (rotations or style variables).
    pub writes_applied: u64,
    /// Per-element samples dropped because the element was still off screen.
    pub skipped_offscreen: u64,
}
