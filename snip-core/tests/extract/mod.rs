//! Extraction tests
//!
//! Snapshots of templates extracted from realistic buffers, plus the escaping
//! guarantees checked against an insertion-engine rendering.

mod escaping;
mod snapshots;
