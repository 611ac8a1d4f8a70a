//! scrollfx core (host-agnostic)
//!
//! Two synchronizers that keep visual state in step with external signals:
//!
//! - [`attach_parallax`]: scroll position → per-element rotation, written once
//!   per element per frame through a [`FrameScheduler`].
//! - [`bind_color`]: carousel active slide → container style variable, kept in
//!   sync on every slide change.
//!
//! Hosts provide the signals and sinks through the traits in [`ports`]; the
//! DOM adapter lives in `scrollfx-wasm`, in-memory fakes in
//! `scrollfx-test-fixtures`.

pub mod batch;
pub mod color;
pub mod config;
pub mod derive;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod ids;
pub mod parallax;
pub mod ports;

// Re-exports for consumers (adapters)
pub use batch::FrameBatch;
pub use color::bind_color;
pub use config::{ColorSyncConfig, MaxRotation, ParallaxConfig};
pub use derive::{derive_rotation, rotation_degrees, Parity, RotationState, ScrollSample};
pub use diagnostics::SyncStats;
pub use error::{Result, SyncError};
pub use handle::DetachHandle;
pub use ids::{IdAllocator, ListenerId};
pub use parallax::attach_parallax;
pub use ports::{
    Carousel, ElementProvider, FrameScheduler, FrameTask, ListenOptions, Listener, ScrollSource,
    StyleSource, StyleTarget, TrackedTarget,
};
