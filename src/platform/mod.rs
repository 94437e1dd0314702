//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard input
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;

pub use input::{InputState, KeyAction};
