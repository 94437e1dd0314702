//! Audio
//!
//! `cues` maps simulation events to tone descriptions and is plain data, so
//! it builds everywhere. The Web Audio player is wasm only.

pub mod cues;
#[cfg(target_arch = "wasm32")]
mod manager;

pub use cues::{Tone, Waveform, cue_for};
#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;
