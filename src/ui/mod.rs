//! Rendering of the current [`crate::state::AppState`]; no data logic lives here.

pub mod charts;
pub mod map;
pub mod panels;
pub mod table;
