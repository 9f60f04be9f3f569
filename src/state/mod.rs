//! State module for tracking walk progress
//!
//! - `WalkState`: where a catalog walk is in its fetch/extract cycle

mod walk_state;

pub use walk_state::WalkState;
