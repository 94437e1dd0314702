//! Audio system using Web Audio API
//!
//! Cue tones are synthesized on the fly; background music streams from
//! looping `<audio>` elements. Every failure here is logged and ignored,
//! the game runs silently without audio.

use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::cues::{Tone, Waveform, cue_for};
use crate::settings::Settings;
use crate::sim::{GameEvent, Phase};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    music: Option<(Phase, HtmlAudioElement)>,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - cue tones disabled");
        }
        Self {
            ctx,
            settings,
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::MusicTrack { phase } => self.play_music(phase),
            GameEvent::MusicStop => self.stop_music(),
            _ => {
                let Some(ctx) = &self.ctx else { return };
                for tone in cue_for(event) {
                    self.play_tone(ctx, &tone);
                }
            }
        }
    }

    // === Music ===

    fn play_music(&mut self, phase: Phase) {
        let same_track = matches!(&self.music, Some((current, _)) if *current == phase);
        if !same_track {
            self.stop_music();
            let url = self.settings.track_for(phase);
            match HtmlAudioElement::new_with_src(url) {
                Ok(el) => {
                    el.set_loop(true);
                    el.set_volume(self.settings.music_volume as f64);
                    self.music = Some((phase, el));
                }
                Err(e) => {
                    log::warn!("Could not create audio element for {url}: {e:?}");
                    return;
                }
            }
        }

        let Some((_, el)) = &self.music else { return };
        let Ok(promise) = el.play() else { return };
        let url = self.settings.track_for(phase).to_owned();
        wasm_bindgen_futures::spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                log::info!("Music unavailable: {url}");
            }
        });
    }

    pub fn stop_music(&mut self) {
        if let Some((_, el)) = self.music.take() {
            let _ = el.pause();
        }
    }

    // === Cue tones ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
        let osc_type = match tone.waveform {
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        };
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;
        let end = t + tone.duration;

        if let Some(target) = tone.sweep_to {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(target, end).ok();
        }
        gain.gain()
            .set_value_at_time(self.settings.sfx_volume * tone.gain, t)
            .ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(end).ok();
    }
}
