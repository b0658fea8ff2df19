//! Utility code that doesn't touch board specifics, usable (and testable)
//! on the host as well as the target.

pub mod measurement;
pub mod spin_lock;
