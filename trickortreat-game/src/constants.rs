//! Centralized tuning constants for the door engine.
//!
//! Turn limits, draw weights and timing beats live here so the feel of a
//! session can only change through reviewed code, not through assets.

// Session shape ------------------------------------------------------------
pub const MAX_TURNS: u8 = 8;
pub const HISTORY_CAPACITY: usize = 6;
pub const MAX_LIKES: usize = 3;
/// Entries listed on the final screen.
pub const SUMMARY_HIGHLIGHTS: usize = 5;

// Draw weights -------------------------------------------------------------
pub const TREAT_WEIGHT: f64 = 0.7;
pub const CUSTOM_TREAT_CHANCE: f64 = 0.4;
pub const MINI_GAME_CHANCE: f64 = 0.4;

// LCG parameters -----------------------------------------------------------
pub(crate) const LCG_MULTIPLIER: u32 = 1_664_525;
pub(crate) const LCG_INCREMENT: u32 = 1_013_904_223;
pub(crate) const LCG_MODULUS: f64 = 4_294_967_296.0;
pub(crate) const TURN_ID_SEGMENT_SPAN: f64 = 1_048_575.0; // 0xfffff

// Presentation beats (milliseconds) ----------------------------------------
pub const DOOR_SETTLE_MS: u32 = 520;
pub const DOOR_CLOSE_MS: u32 = 260;
pub const GHOST_MOVE_MS: u32 = 280;
pub const GHOST_COUNTDOWN_TICK_MS: u32 = 1_000;
pub const GHOST_COUNTDOWN_START: u8 = 6;

// Ghost arena bounds, in percent of the play area --------------------------
pub(crate) const GHOST_TOP_MIN: f64 = 10.0;
pub(crate) const GHOST_TOP_SPAN: f64 = 80.0;
pub(crate) const GHOST_LEFT_MIN: f64 = 8.0;
pub(crate) const GHOST_LEFT_SPAN: f64 = 84.0;

// Text fallbacks -----------------------------------------------------------
pub const NAME_FALLBACK: &str = "bạn";
pub const OWNER_FALLBACK: &str = "Bạn";
pub const LIKE_FALLBACK: &str = "niềm vui pixel";
pub const NAME_TOKEN: &str = "[Tên]";
pub const LIKE_TOKEN: &str = "[LIKE]";

// Voucher export -----------------------------------------------------------
pub const VOUCHER_WIDTH: u32 = 900;
pub const VOUCHER_HEIGHT: u32 = 540;
pub const VOUCHER_FILE_PREFIX: &str = "voucher-om-";
pub const VOUCHER_SLUG_FALLBACK: &str = "ban";

// Audio --------------------------------------------------------------------
pub const BACKGROUND_MUSIC_PATH: &str = "/background-music.mp3";
pub const BACKGROUND_MUSIC_VOLUME: f64 = 0.5;
pub const TONE_RELEASE_SECS: f64 = 0.05;
pub const TONE_FLOOR_GAIN: f32 = 0.001;
