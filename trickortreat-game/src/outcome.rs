//! Outcome construction: weighted treat/trick roll, template choice and
//! placeholder substitution.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    CUSTOM_TREAT_CHANCE, LIKE_TOKEN, MINI_GAME_CHANCE, NAME_TOKEN, TREAT_WEIGHT,
    TURN_ID_SEGMENT_SPAN,
};
use crate::content::{TRICK_MINI_GAME, TRICK_PROMPTS, TREAT_CUSTOM, TREAT_GENERIC, treat_label};
use crate::context::PlayContext;
use crate::rng::{Lcg, RngError};

/// Door the player knocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Treat,
    Trick,
}

/// What actually came out of the door. Independent from [`Choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Treat,
    Trick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiniGameKind {
    Ghost,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treat => write!(f, "treat"),
            Self::Trick => write!(f, "trick"),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treat => write!(f, "Treat"),
            Self::Trick => write!(f, "Trick"),
        }
    }
}

/// Session-unique turn identifier (`turn-<base36 millis>-<hex><hex>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeId(String);

impl OutcomeId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutcomeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Progress of the mini-game attached to a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameSlot {
    pub kind: MiniGameKind,
    pub complete: bool,
    pub success: bool,
}

impl MiniGameSlot {
    const fn pending(kind: MiniGameKind) -> Self {
        Self {
            kind,
            complete: false,
            success: false,
        }
    }
}

/// One resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: OutcomeId,
    pub choice: Choice,
    pub kind: OutcomeKind,
    pub label: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_game: Option<MiniGameSlot>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Outcome {
    /// A mini-game that is still waiting for its result.
    #[must_use]
    pub fn open_mini_game(&self) -> Option<MiniGameKind> {
        self.mini_game
            .filter(|slot| !slot.complete)
            .map(|slot| slot.kind)
    }

    /// Record the mini-game result. Returns `false` when there is nothing to settle.
    pub fn settle_mini_game(&mut self, success: bool) -> bool {
        match self.mini_game.as_mut() {
            Some(slot) if !slot.complete => {
                slot.complete = true;
                slot.success = success;
                true
            }
            _ => false,
        }
    }
}

/// Everything the builder needs for one turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    pub context: &'a PlayContext,
    pub choice: Choice,
    /// False on the last turn of a session.
    pub mini_game_eligible: bool,
    pub now_ms: u64,
}

/// Resolve one turn, consuming draws from `rng` in a fixed order.
///
/// # Errors
///
/// Returns [`RngError::EmptyPool`] if a content pool is empty, which the
/// built-in tables rule out.
pub fn build_outcome(request: &TurnRequest<'_>, rng: &mut Lcg) -> Result<Outcome, RngError> {
    let roll = rng.next_f64();
    if roll < TREAT_WEIGHT {
        build_treat(request, rng)
    } else {
        build_trick(request, rng)
    }
}

fn build_treat(request: &TurnRequest<'_>, rng: &mut Lcg) -> Result<Outcome, RngError> {
    let ctx = request.context;
    let use_custom = ctx.has_likes() && rng.next_f64() < CUSTOM_TREAT_CHANCE;
    let template = if use_custom {
        *rng.pick(&TREAT_CUSTOM)?
    } else {
        *rng.pick(&TREAT_GENERIC)?
    };
    let like = if ctx.has_likes() {
        rng.pick(&ctx.likes)?.as_str()
    } else {
        ctx.like_fallback.as_str()
    };
    let message = render_template(template, &ctx.display_name(), like);
    let id = generate_turn_id(request.now_ms, rng);
    Ok(Outcome {
        id,
        choice: request.choice,
        kind: OutcomeKind::Treat,
        label: treat_label(template).to_string(),
        message,
        prompt: None,
        mini_game: None,
        timestamp: request.now_ms,
    })
}

fn build_trick(request: &TurnRequest<'_>, rng: &mut Lcg) -> Result<Outcome, RngError> {
    let ctx = request.context;
    let use_mini_game = request.mini_game_eligible && rng.next_f64() < MINI_GAME_CHANCE;
    let template = if use_mini_game {
        TRICK_MINI_GAME
    } else {
        *rng.pick(&TRICK_PROMPTS)?
    };
    let message = render_template(template.message, &ctx.display_name(), &ctx.like_fallback);
    let id = generate_turn_id(request.now_ms, rng);
    Ok(Outcome {
        id,
        choice: request.choice,
        kind: OutcomeKind::Trick,
        label: template.label().to_string(),
        message,
        prompt: Some(template.prompt.to_string()),
        mini_game: template
            .mini_game
            .then_some(MiniGameSlot::pending(MiniGameKind::Ghost)),
        timestamp: request.now_ms,
    })
}

/// Replace every `[Tên]` and `[LIKE]` token.
#[must_use]
pub fn render_template(template: &str, display_name: &str, like: &str) -> String {
    template
        .replace(NAME_TOKEN, display_name)
        .replace(LIKE_TOKEN, like)
}

/// True when a rendered string still carries a raw placeholder.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    text.contains(NAME_TOKEN) || text.contains(LIKE_TOKEN)
}

/// Build an identifier from the clock and two draws.
pub fn generate_turn_id(now_ms: u64, rng: &mut Lcg) -> OutcomeId {
    let first = id_segment(rng);
    let second = id_segment(rng);
    OutcomeId(format!("turn-{}-{first:05x}{second:05x}", to_base36(now_ms)))
}

fn id_segment(rng: &mut Lcg) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = (rng.next_f64() * TURN_ID_SEGMENT_SPAN).floor() as u32;
    value
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
