//! Ghost-catch mini-game: a roaming target, a countdown and a one-shot result.
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    GHOST_COUNTDOWN_START, GHOST_LEFT_MIN, GHOST_LEFT_SPAN, GHOST_TOP_MIN, GHOST_TOP_SPAN,
};
use crate::outcome::OutcomeId;
use crate::rng::side_stream;

/// Ghost position as percentages of the play area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostPosition {
    pub top: f64,
    pub left: f64,
}

impl GhostPosition {
    fn roll(rng: &mut SmallRng) -> Self {
        Self {
            top: GHOST_TOP_MIN + rng.gen_range(0.0..GHOST_TOP_SPAN),
            left: GHOST_LEFT_MIN + rng.gen_range(0.0..GHOST_LEFT_SPAN),
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaseResult {
    Caught,
    Escaped,
}

impl ChaseResult {
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self, Self::Caught)
    }
}

/// One mini-game round. Reports its result at most once.
#[derive(Debug, Clone)]
pub struct GhostChase {
    outcome_id: OutcomeId,
    rng: SmallRng,
    position: GhostPosition,
    time_left: u8,
    result: Option<ChaseResult>,
}

impl GhostChase {
    /// Start a round for `outcome_id`, with positions drawn from a side
    /// stream so the shared outcome generator is never touched.
    #[must_use]
    pub fn new(session_seed: u32, outcome_id: OutcomeId) -> Self {
        let mut tag = b"ghost:".to_vec();
        tag.extend_from_slice(outcome_id.as_str().as_bytes());
        let mut rng = side_stream(session_seed, &tag);
        let position = GhostPosition::roll(&mut rng);
        Self {
            outcome_id,
            rng,
            position,
            time_left: GHOST_COUNTDOWN_START,
            result: None,
        }
    }

    #[must_use]
    pub const fn position(&self) -> GhostPosition {
        self.position
    }

    #[must_use]
    pub const fn time_left(&self) -> u8 {
        self.time_left
    }

    #[must_use]
    pub const fn result(&self) -> Option<ChaseResult> {
        self.result
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.result.is_none()
    }

    /// Move the ghost. No-op once the round is over.
    pub fn tick_movement(&mut self) {
        if self.is_running() {
            self.position = GhostPosition::roll(&mut self.rng);
        }
    }

    /// One countdown second. Returns the result the moment time runs out.
    pub fn tick_countdown(&mut self) -> Option<ChaseResult> {
        if !self.is_running() {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.finish(ChaseResult::Escaped)
        } else {
            None
        }
    }

    /// Player clicked the ghost. Returns the result unless the round already ended.
    pub fn catch(&mut self) -> Option<ChaseResult> {
        if self.is_running() {
            self.finish(ChaseResult::Caught)
        } else {
            None
        }
    }

    fn finish(&mut self, result: ChaseResult) -> Option<ChaseResult> {
        self.result = Some(result);
        log::debug!("ghost chase {} ended: {result:?}", self.outcome_id);
        Some(result)
    }
}
