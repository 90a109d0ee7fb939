//! Drive a [`Session`] to the final screen with a fake clock.
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use thiserror::Error;
use trickortreat_game::constants::{GHOST_COUNTDOWN_TICK_MS, GHOST_MOVE_MS, MAX_TURNS};
use trickortreat_game::voucher::download_filename;
use trickortreat_game::{
    Action, ChaseResult, Choice, Effect, FinalSummary, GhostChase, Outcome, Rejection, Session,
    SoundCue, Timer,
};

use super::policy::Policy;

/// Mixed into the start clock so policy coin flips do not mirror the engine's draws.
const POLICY_STREAM_SALT: u64 = 0x7472_6963_6b79_0031;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{action} was rejected: {source}")]
    Rejected {
        action: &'static str,
        #[source]
        source: Rejection,
    },
    #[error("turn {0} settled without an outcome")]
    MissingOutcome(u8),
}

/// Who is playing and how.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub name: String,
    pub likes: String,
    pub policy: Policy,
}

/// One resolved door, as it stood after its mini-game.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub turn: u8,
    pub choice: Choice,
    pub outcome: Outcome,
    pub history_len: usize,
    /// Whether the engine refused a second result for the same chase.
    pub duplicate_result_rejected: Option<bool>,
}

/// Everything observed while playing one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRun {
    pub start_ms: u64,
    pub session_seed: u32,
    pub turns: Vec<TurnRecord>,
    /// `Some` once all turns were used: did an extra knock get refused?
    pub overflow_rejected: Option<bool>,
    pub stale_timer_rejected: bool,
    pub coin_cues: usize,
    pub success_cues: usize,
    pub voucher_filename: String,
    pub summary: FinalSummary,
    pub elapsed_ms: u64,
}

/// Monotonic stand-in for the browser clock.
#[derive(Debug, Clone, Copy)]
struct FakeClock {
    now_ms: u64,
}

impl FakeClock {
    fn advance(&mut self, ms: u32) -> u64 {
        self.now_ms = self.now_ms.saturating_add(u64::from(ms));
        self.now_ms
    }
}

/// Plays sessions headlessly; timers fire in due order on the fake clock.
pub struct Simulator {
    verbose: bool,
}

impl Simulator {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Play one session that starts at `start_ms`.
    ///
    /// # Errors
    /// Fails when the engine rejects an action the policy is allowed to take.
    pub fn run(&self, plan: &SimulationPlan, start_ms: u64) -> Result<SessionRun, SimulationError> {
        let mut driver = Driver {
            session: Session::new(),
            clock: FakeClock { now_ms: start_ms },
            coin_cues: 0,
            success_cues: 0,
        };
        let mut policy_rng = SmallRng::seed_from_u64(start_ms ^ POLICY_STREAM_SALT);

        driver.apply("edit name", Action::EditName(plan.name.clone()))?;
        driver.apply("edit likes", Action::EditLikes(plan.likes.clone()))?;
        driver.apply("start", Action::Start { now_ms: start_ms })?;

        let limit = plan.policy.stop_after.map_or(MAX_TURNS, |n| n.min(MAX_TURNS));
        let mut turns = Vec::with_capacity(usize::from(limit));
        for turn in 0..limit {
            let choice = plan.policy.door.choose(turn, &mut policy_rng);
            driver.apply("choose door", Action::ChooseDoor(choice))?;

            let current = driver
                .session
                .current()
                .cloned()
                .ok_or(SimulationError::MissingOutcome(turn + 1))?;
            let duplicate_result_rejected = if current.open_mini_game().is_some() {
                let catch = plan.policy.catch.will_catch(&mut policy_rng);
                Some(driver.play_chase(&current, catch)?)
            } else {
                None
            };

            let settled = driver
                .session
                .current()
                .cloned()
                .ok_or(SimulationError::MissingOutcome(turn + 1))?;
            if self.verbose {
                println!(
                    "  turn {} [{choice}] -> {} {}",
                    turn + 1,
                    settled.kind,
                    settled.label
                );
            }
            turns.push(TurnRecord {
                turn: turn + 1,
                choice,
                outcome: settled,
                history_len: driver.session.history().len(),
                duplicate_result_rejected,
            });
            driver.apply("dismiss", Action::Dismiss)?;
        }

        let overflow_rejected = (driver.session.turn_count() >= MAX_TURNS).then(|| {
            matches!(
                driver.session.dispatch(Action::ChooseDoor(Choice::Treat)),
                Err(Rejection::TurnLimitReached)
            )
        });
        let stale_timer_rejected = previous_session_timer_refused(start_ms);

        driver.apply("go to final", Action::GoToFinal)?;
        let summary = FinalSummary::from_session(&driver.session);

        Ok(SessionRun {
            start_ms,
            session_seed: driver.session.seed(),
            turns,
            overflow_rejected,
            stale_timer_rejected,
            coin_cues: driver.coin_cues,
            success_cues: driver.success_cues,
            voucher_filename: download_filename(driver.session.name_input()),
            summary,
            elapsed_ms: driver.clock.now_ms - start_ms,
        })
    }
}

struct Driver {
    session: Session,
    clock: FakeClock,
    coin_cues: usize,
    success_cues: usize,
}

impl Driver {
    /// Dispatch and run every timer the action schedules, in due order.
    fn apply(&mut self, label: &'static str, action: Action) -> Result<(), SimulationError> {
        let effects = self
            .session
            .dispatch(action)
            .map_err(|source| SimulationError::Rejected {
                action: label,
                source,
            })?;
        let mut pending: Vec<(u64, Timer)> = Vec::new();
        self.absorb(effects, &mut pending);

        while let Some(next) = pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, _))| *due)
            .map(|(index, _)| index)
        {
            let (due, timer) = pending.swap_remove(next);
            self.clock.now_ms = self.clock.now_ms.max(due);
            let effects = self
                .session
                .dispatch(timer.fire(self.clock.now_ms))
                .map_err(|source| SimulationError::Rejected {
                    action: "timer",
                    source,
                })?;
            self.absorb(effects, &mut pending);
        }
        Ok(())
    }

    fn absorb(&mut self, effects: Vec<Effect>, pending: &mut Vec<(u64, Timer)>) {
        for effect in effects {
            match effect {
                Effect::Schedule { delay_ms, timer } => {
                    pending.push((self.clock.now_ms + u64::from(delay_ms), timer));
                }
                Effect::Cue(SoundCue::Coin) => self.coin_cues += 1,
                Effect::Cue(SoundCue::Success) => self.success_cues += 1,
                Effect::Cue(SoundCue::Click) | Effect::Music(_) => {}
            }
        }
    }

    /// Run a ghost chase to its end and report it. Returns whether a second
    /// report was refused.
    fn play_chase(&mut self, outcome: &Outcome, catch: bool) -> Result<bool, SimulationError> {
        let mut chase = GhostChase::new(self.session.seed(), outcome.id.clone());
        let result = if catch {
            for _ in 0..3 {
                self.clock.advance(GHOST_MOVE_MS);
                chase.tick_movement();
            }
            chase.catch()
        } else {
            let mut result = None;
            while result.is_none() {
                self.clock.advance(GHOST_COUNTDOWN_TICK_MS);
                result = chase.tick_countdown();
            }
            result
        };
        let success = result.is_some_and(ChaseResult::success);
        self.apply(
            "finish mini-game",
            Action::MiniGameFinished {
                id: outcome.id.clone(),
                success,
            },
        )?;

        Ok(chase.catch().is_none()
            && matches!(
                self.session.dispatch(Action::MiniGameFinished {
                    id: outcome.id.clone(),
                    success: !success,
                }),
                Err(Rejection::MiniGameSettled)
            ))
    }
}

fn settle_timer(effects: &[Effect]) -> Option<Timer> {
    effects.iter().find_map(|effect| match effect {
        Effect::Schedule {
            timer: timer @ Timer::DoorSettle(_),
            ..
        } => Some(*timer),
        _ => None,
    })
}

fn restart_and_knock(session: &mut Session, now_ms: u64) -> Option<Timer> {
    session.dispatch(Action::Start { now_ms }).ok()?;
    let effects = session.dispatch(Action::ChooseDoor(Choice::Treat)).ok()?;
    settle_timer(&effects)
}

/// Restart while a door is still settling: the old settle timer must bounce
/// off the new turn, which then resolves on its own timer.
fn previous_session_timer_refused(start_ms: u64) -> bool {
    let mut session = Session::new();
    let Some(old) = restart_and_knock(&mut session, start_ms) else {
        return false;
    };
    let Some(new) = restart_and_knock(&mut session, start_ms + 1) else {
        return false;
    };
    let refused = matches!(
        session.dispatch(old.fire(start_ms + 2)),
        Err(Rejection::StaleTimer(_))
    ) && session.turn_count() == 0
        && session.is_animating();
    refused && session.dispatch(new.fire(start_ms + 3)).is_ok() && session.turn_count() == 1
}
