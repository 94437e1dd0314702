//! Cue tone table

use crate::sim::GameEvent;

const C5: f32 = 523.25;
const E5: f32 = 659.25;
const G5: f32 = 783.99;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
}

/// One synthesized note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f64,
    /// Seconds after the cue fires
    pub delay: f64,
    pub waveform: Waveform,
    /// Exponential pitch glide target over the tone's duration
    pub sweep_to: Option<f32>,
    /// Multiplier on the sfx volume
    pub gain: f32,
}

impl Tone {
    const fn beep(freq: f32, duration: f64, delay: f64) -> Self {
        Self {
            freq,
            duration,
            delay,
            waveform: Waveform::Square,
            sweep_to: None,
            gain: 1.0,
        }
    }
}

/// Tones to play for an event; empty for music events
pub fn cue_for(event: &GameEvent) -> Vec<Tone> {
    match *event {
        GameEvent::Started => vec![Tone::beep(C5, 0.1, 0.0)],
        GameEvent::MuteToggled { .. } => vec![Tone::beep(440.0, 0.05, 0.0)],
        GameEvent::InvulnerabilityToggled { enabled } => {
            vec![Tone::beep(if enabled { 880.0 } else { 440.0 }, 0.1, 0.0)]
        }
        // Rising C major triad
        GameEvent::PhaseChanged { .. } => [C5, E5, G5]
            .iter()
            .enumerate()
            .map(|(i, &freq)| Tone::beep(freq, 0.15, i as f64 * 0.1))
            .collect(),
        GameEvent::Died { .. } => vec![Tone {
            freq: 400.0,
            duration: 0.5,
            delay: 0.0,
            waveform: Waveform::Sawtooth,
            sweep_to: Some(50.0),
            gain: 2.0,
        }],
        GameEvent::MusicTrack { .. } | GameEvent::MusicStop => Vec::new(),
    }
}
