//! Web Audio implementation of the engine's [`SoundBoard`] port.
//!
//! Everything here is best effort: autoplay blocks, missing files and
//! unsupported APIs are logged at debug level and otherwise ignored.
use std::cell::RefCell;

use trickortreat_game::constants::{BACKGROUND_MUSIC_PATH, BACKGROUND_MUSIC_VOLUME};
use trickortreat_game::{MusicCommand, SoundBoard, SoundCue, Tone};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AudioContext, AudioContextState, AudioScheduledSourceNode, HtmlAudioElement, OscillatorType,
};

use crate::dom::{js_error_message, set_timeout};

/// Lazily creates its audio context and music element on first use, so
/// constructing one is free during server rendering and tests.
#[derive(Default)]
pub struct WebSoundBoard {
    context: RefCell<Option<AudioContext>>,
    music: RefCell<Option<HtmlAudioElement>>,
}

impl WebSoundBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<AudioContext, JsValue> {
        let mut slot = self.context.borrow_mut();
        let ctx = match slot.as_ref() {
            Some(ctx) => ctx.clone(),
            None => {
                let ctx = AudioContext::new()?;
                *slot = Some(ctx.clone());
                ctx
            }
        };
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }
        Ok(ctx)
    }

    fn music_element(&self) -> Result<HtmlAudioElement, JsValue> {
        let mut slot = self.music.borrow_mut();
        if let Some(audio) = slot.as_ref() {
            return Ok(audio.clone());
        }
        let audio = HtmlAudioElement::new_with_src(BACKGROUND_MUSIC_PATH)?;
        audio.set_loop(true);
        audio.set_volume(BACKGROUND_MUSIC_VOLUME);
        *slot = Some(audio.clone());
        Ok(audio)
    }

    fn start_music(&self) -> Result<(), JsValue> {
        let promise = self.music_element()?.play()?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::debug!("background music blocked: {}", js_error_message(&err));
            }
        });
        Ok(())
    }

    fn stop_music(&self) -> Result<(), JsValue> {
        match self.music.borrow().as_ref() {
            Some(audio) => audio.pause(),
            None => Ok(()),
        }
    }
}

/// Play one square-wave beep with an exponential fade.
fn beep(ctx: &AudioContext, tone: Tone) -> Result<(), JsValue> {
    let now = ctx.current_time();
    let stop_at = now + tone.stop_after_secs();
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(OscillatorType::Square);
    osc.frequency().set_value_at_time(tone.frequency_hz, now)?;
    gain.gain().set_value_at_time(tone.volume, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(tone.floor_gain(), stop_at)?;
    osc.connect_with_audio_node(&gain)?
        .connect_with_audio_node(&ctx.destination())?;
    let source: &AudioScheduledSourceNode = &osc;
    source.start()?;
    source.stop_with_when(stop_at)?;
    Ok(())
}

impl SoundBoard for WebSoundBoard {
    fn play(&self, cue: SoundCue) {
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(err) => {
                log::debug!("audio unavailable: {}", js_error_message(&err));
                return;
            }
        };
        for &tone in cue.tones() {
            if tone.delay_ms == 0 {
                if let Err(err) = beep(&ctx, tone) {
                    log::debug!("tone failed: {}", js_error_message(&err));
                }
                continue;
            }
            let ctx = ctx.clone();
            let scheduled = set_timeout(tone.delay_ms, move || {
                if let Err(err) = beep(&ctx, tone) {
                    log::debug!("tone failed: {}", js_error_message(&err));
                }
            });
            if let Err(err) = scheduled {
                log::debug!("tone not scheduled: {}", js_error_message(&err));
            }
        }
    }

    fn music(&self, command: MusicCommand) {
        let result = match command {
            MusicCommand::Start => self.start_music(),
            MusicCommand::Stop => self.stop_music(),
        };
        if let Err(err) = result {
            log::debug!("music {command:?} failed: {}", js_error_message(&err));
        }
    }
}
