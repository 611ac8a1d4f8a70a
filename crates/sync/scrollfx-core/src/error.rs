//! Error types for the synchronizers.
//!
//! Most degraded inputs are recovered locally (missing elements, bad numeric
//! config). Only slider bindings fail fast, since a binding that cannot read
//! its active slide would leave the container color silently out of sync.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    /// The carousel reported no active slide when the binding was created.
    #[error("carousel has no active slide to read `{variable}` from")]
    MissingActiveSlide { variable: String },

    /// The host handed over something that is not a carousel object at all.
    #[error("carousel handle is not an object")]
    NotAnObject,

    /// A host object lacks a capability the binding needs.
    #[error("carousel handle is missing capability `{0}`")]
    MissingCapability(&'static str),
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
