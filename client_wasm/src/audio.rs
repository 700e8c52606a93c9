//! Audio cues
//!
//! Short synthesized sine beeps, fire-and-forget. Any WebAudio failure is
//! swallowed; sound never blocks gameplay.

use game_core::Cue;

/// (frequency Hz, duration s) for each cue
pub fn cue_tone(cue: Cue) -> (f32, f64) {
    match cue {
        Cue::Success => (800.0, 0.3),
        Cue::Error => (200.0, 0.2),
        Cue::Click => (400.0, 0.1),
        Cue::PowerUp => (600.0, 0.4),
    }
}

#[cfg(target_arch = "wasm32")]
pub use player::AudioPlayer;

#[cfg(target_arch = "wasm32")]
mod player {
    use super::cue_tone;
    use game_core::Cue;
    use wasm_bindgen::JsValue;
    use web_sys::{AudioContext, OscillatorType};

    /// Lazy AudioContext wrapper. Browsers refuse to create the context
    /// before a user gesture, so the first `play` after input creates it.
    #[derive(Default)]
    pub struct AudioPlayer {
        ctx: Option<AudioContext>,
    }

    impl AudioPlayer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn play(&mut self, cue: Cue) {
            if self.ctx.is_none() {
                self.ctx = AudioContext::new().ok();
            }
            if let Some(ctx) = &self.ctx {
                let _ = beep(ctx, cue);
            }
        }
    }

    fn beep(ctx: &AudioContext, cue: Cue) -> Result<(), JsValue> {
        let (freq, dur) = cue_tone(cue);
        let now = ctx.current_time();

        let osc = ctx.create_oscillator()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);

        let gain = ctx.create_gain()?;
        gain.gain().set_value(0.08);
        gain.gain().linear_ramp_to_value_at_time(0.0001, now + dur)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        osc.start()?;
        osc.stop_with_when(now + dur)?;
        Ok(())
    }
}
