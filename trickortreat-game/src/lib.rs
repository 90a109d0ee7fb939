//! Trick-or-Treat Door Engine
//!
//! Platform-agnostic core of the trick-or-treat greeting card: a seeded
//! generator, the message tables, the outcome builder, the session reducer and
//! the final-screen data. Nothing here touches the browser; hosts feed actions
//! in and carry out the returned effects.

pub mod audio;
pub mod constants;
pub mod content;
pub mod context;
pub mod history;
pub mod minigame;
pub mod outcome;
pub mod rng;
pub mod session;
pub mod summary;
pub mod voucher;

pub use audio::{AudioPrefs, MusicCommand, SilentBoard, SoundBoard, SoundCue, Tone};
pub use context::{PlayContext, extract_likes, format_name};
pub use history::History;
pub use minigame::{ChaseResult, GhostChase, GhostPosition};
pub use outcome::{
    Choice, MiniGameKind, MiniGameSlot, Outcome, OutcomeId, OutcomeKind, TurnRequest,
    build_outcome, has_placeholder, render_template,
};
pub use rng::{Lcg, RngError, seed_from_millis, side_stream};
pub use session::{Action, Effect, Phase, Rejection, Session, Timer, TurnTicket};
pub use summary::{FinalSummary, Highlight};
pub use voucher::{DrawOp, TextAlign, VoucherLayout, download_filename};
