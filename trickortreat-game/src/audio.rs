//! Sound cues as data, plus the port the presentation layer plays them through.
use serde::{Deserialize, Serialize};

use crate::constants::{TONE_FLOOR_GAIN, TONE_RELEASE_SECS};

/// Short effects triggered by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Click,
    Coin,
    Success,
}

/// A single square-wave beep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f64,
    pub volume: f32,
    /// Offset from the moment the cue fires.
    pub delay_ms: u32,
}

impl Tone {
    const fn new(frequency_hz: f32, duration_secs: f64, volume: f32, delay_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_secs,
            volume,
            delay_ms,
        }
    }

    /// Total oscillator lifetime, including the release tail.
    #[must_use]
    pub fn stop_after_secs(&self) -> f64 {
        self.duration_secs + TONE_RELEASE_SECS
    }

    /// Gain the exponential ramp ends on.
    #[must_use]
    pub const fn floor_gain(&self) -> f32 {
        TONE_FLOOR_GAIN
    }
}

const CLICK: [Tone; 1] = [Tone::new(440.0, 0.08, 0.08, 0)];
const COIN: [Tone; 2] = [
    Tone::new(880.0, 0.12, 0.12, 0),
    Tone::new(1320.0, 0.1, 0.1, 90),
];
const SUCCESS: [Tone; 3] = [
    Tone::new(990.0, 0.1, 0.1, 0),
    Tone::new(1480.0, 0.12, 0.09, 80),
    Tone::new(1760.0, 0.14, 0.08, 160),
];

impl SoundCue {
    #[must_use]
    pub const fn tones(self) -> &'static [Tone] {
        match self {
            Self::Click => &CLICK,
            Self::Coin => &COIN,
            Self::Success => &SUCCESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCommand {
    Start,
    Stop,
}

/// Player toggles for sound effects and background music.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPrefs {
    pub sfx_enabled: bool,
    pub music_enabled: bool,
}

impl Default for AudioPrefs {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            music_enabled: true,
        }
    }
}

impl AudioPrefs {
    /// Music plays only while both toggles are on.
    #[must_use]
    pub const fn music_audible(&self) -> bool {
        self.sfx_enabled && self.music_enabled
    }
}

/// Output device for cues and music. Implementations swallow their own
/// playback failures.
pub trait SoundBoard {
    fn play(&self, cue: SoundCue);
    fn music(&self, command: MusicCommand);
}

/// Board that plays nothing. Used headless and before the user interacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBoard;

impl SoundBoard for SilentBoard {
    fn play(&self, cue: SoundCue) {
        log::trace!("silent cue {cue:?}");
    }

    fn music(&self, command: MusicCommand) {
        log::trace!("silent music {command:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_recipes_match_their_beeps() {
        assert_eq!(SoundCue::Click.tones().len(), 1);
        let coin = SoundCue::Coin.tones();
        assert_eq!(coin[1].delay_ms, 90);
        assert!((coin[1].frequency_hz - 1320.0).abs() < f32::EPSILON);
        let success = SoundCue::Success.tones();
        let delays: Vec<u32> = success.iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, vec![0, 80, 160]);
    }

    #[test]
    fn release_tail_is_added() {
        let click = SoundCue::Click.tones()[0];
        assert!((click.stop_after_secs() - 0.13).abs() < 1e-9);
    }

    #[test]
    fn music_requires_both_toggles() {
        let mut prefs = AudioPrefs::default();
        assert!(prefs.music_audible());
        prefs.sfx_enabled = false;
        assert!(!prefs.music_audible());
        prefs = AudioPrefs {
            sfx_enabled: true,
            music_enabled: false,
        };
        assert!(!prefs.music_audible());
    }
}
