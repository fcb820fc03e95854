//! Compile tests
//!
//! Filesystem scenarios for the save hook and the regeneration sweep.

mod regenerate;
mod save;
