//! Turn and phase state machine.
//!
//! Every user gesture and every timer callback is an [`Action`]. The session
//! either applies it and returns host [`Effect`]s, or rejects it and stays
//! exactly as it was.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::audio::{AudioPrefs, MusicCommand, SoundCue};
use crate::constants::{DOOR_CLOSE_MS, DOOR_SETTLE_MS, MAX_TURNS};
use crate::context::{PlayContext, extract_likes};
use crate::history::History;
use crate::outcome::{Choice, Outcome, OutcomeId, OutcomeKind, TurnRequest, build_outcome};
use crate::rng::{Lcg, RngError, seed_from_millis};

/// Coarse session stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Intro,
    Play,
    Final,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => write!(f, "intro"),
            Self::Play => write!(f, "play"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// Identifies the turn a scheduled timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTicket {
    pub epoch: u32,
    pub turn: u8,
}

/// Deferred work the host runs after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timer {
    DoorSettle(TurnTicket),
    DoorClose(TurnTicket),
}

impl Timer {
    /// Action to dispatch when the timer elapses.
    #[must_use]
    pub const fn fire(self, now_ms: u64) -> Action {
        match self {
            Self::DoorSettle(ticket) => Action::DoorSettled { ticket, now_ms },
            Self::DoorClose(ticket) => Action::DoorClosed { ticket },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    EditName(String),
    EditLikes(String),
    Start { now_ms: u64 },
    ChooseDoor(Choice),
    DoorSettled { ticket: TurnTicket, now_ms: u64 },
    DoorClosed { ticket: TurnTicket },
    Dismiss,
    MiniGameFinished { id: OutcomeId, success: bool },
    GoToFinal,
    Reset,
    ToggleSound,
    ToggleMusic,
}

/// Instruction for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Schedule { delay_ms: u32, timer: Timer },
    Cue(SoundCue),
    Music(MusicCommand),
}

/// Why an action was refused. The session is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("action needs the {expected} phase, session is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("a door is still opening")]
    Resolving,
    #[error("every turn has been played")]
    TurnLimitReached,
    #[error("timer ticket {0:?} is stale")]
    StaleTimer(TurnTicket),
    #[error("no outcome is showing")]
    NoOutcome,
    #[error("outcome {0} is not the current one")]
    UnknownOutcome(OutcomeId),
    #[error("outcome has no mini-game")]
    NoMiniGame,
    #[error("mini-game already settled")]
    MiniGameSettled,
    #[error("content error: {0}")]
    Content(#[from] RngError),
}

/// Door press waiting for its settle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PendingTurn {
    ticket: TurnTicket,
    choice: Choice,
}

/// Whole-page state of one card session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    phase: Phase,
    name_input: String,
    likes_input: String,
    context: PlayContext,
    rng: Lcg,
    seed: u32,
    turn_count: u8,
    current: Option<Outcome>,
    history: History,
    animating: bool,
    door_open: bool,
    pending: Option<PendingTurn>,
    epoch: u32,
    prefs: AudioPrefs,
    treats: u8,
    tricks: u8,
    mini_games_played: u8,
    mini_games_won: u8,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            name_input: String::new(),
            likes_input: String::new(),
            context: PlayContext::new("", &[]),
            rng: Lcg::default(),
            seed: 1,
            turn_count: 0,
            current: None,
            history: History::new(),
            animating: false,
            door_open: false,
            pending: None,
            epoch: 0,
            prefs: AudioPrefs::default(),
            treats: 0,
            tricks: 0,
            mini_games_played: 0,
            mini_games_won: 0,
        }
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the action is not valid in the current
    /// state. The session is left unchanged in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>, Rejection> {
        let result = match action {
            Action::EditName(text) => self.edit(|s| s.name_input = text),
            Action::EditLikes(text) => self.edit(|s| s.likes_input = text),
            Action::Start { now_ms } => Ok(self.start(now_ms)),
            Action::ChooseDoor(choice) => self.choose_door(choice),
            Action::DoorSettled { ticket, now_ms } => self.settle_door(ticket, now_ms),
            Action::DoorClosed { ticket } => self.close_door(ticket),
            Action::Dismiss => self.dismiss(),
            Action::MiniGameFinished { id, success } => self.finish_mini_game(&id, success),
            Action::GoToFinal => self.go_to_final(),
            Action::Reset => Ok(self.reset()),
            Action::ToggleSound => Ok(self.toggle(|p| p.sfx_enabled = !p.sfx_enabled)),
            Action::ToggleMusic => Ok(self.toggle(|p| p.music_enabled = !p.music_enabled)),
        };
        if let Err(rejection) = &result {
            log::debug!("rejected action in {} phase: {rejection}", self.phase);
        }
        result
    }

    fn require_phase(&self, expected: Phase) -> Result<(), Rejection> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Rejection::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn cue(&self, effects: &mut Vec<Effect>, cue: SoundCue) {
        if self.prefs.sfx_enabled {
            effects.push(Effect::Cue(cue));
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Self)) -> Result<Vec<Effect>, Rejection> {
        self.require_phase(Phase::Intro)?;
        apply(self);
        Ok(Vec::new())
    }

    fn start(&mut self, now_ms: u64) -> Vec<Effect> {
        let likes = extract_likes(&self.likes_input);
        self.context = PlayContext::new(&self.name_input, &likes);
        self.seed = seed_from_millis(now_ms);
        self.rng.seed(self.seed);
        self.clear_turns();
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = Phase::Play;
        log::info!(
            "session {} started with seed {} and {} like(s)",
            self.epoch,
            self.seed,
            self.context.likes.len()
        );

        let mut effects = Vec::new();
        self.cue(&mut effects, SoundCue::Click);
        if self.prefs.music_audible() {
            effects.push(Effect::Music(MusicCommand::Start));
        }
        effects
    }

    fn clear_turns(&mut self) {
        self.turn_count = 0;
        self.current = None;
        self.history.clear();
        self.animating = false;
        self.door_open = false;
        self.pending = None;
        self.treats = 0;
        self.tricks = 0;
        self.mini_games_played = 0;
        self.mini_games_won = 0;
    }

    fn choose_door(&mut self, choice: Choice) -> Result<Vec<Effect>, Rejection> {
        self.require_phase(Phase::Play)?;
        if self.animating {
            return Err(Rejection::Resolving);
        }
        if self.turn_count >= MAX_TURNS {
            return Err(Rejection::TurnLimitReached);
        }
        let ticket = TurnTicket {
            epoch: self.epoch,
            turn: self.turn_count,
        };
        self.animating = true;
        self.door_open = true;
        self.current = None;
        self.pending = Some(PendingTurn { ticket, choice });

        let mut effects = Vec::new();
        self.cue(&mut effects, SoundCue::Click);
        effects.push(Effect::Schedule {
            delay_ms: DOOR_SETTLE_MS,
            timer: Timer::DoorSettle(ticket),
        });
        Ok(effects)
    }

    fn settle_door(
        &mut self,
        ticket: TurnTicket,
        now_ms: u64,
    ) -> Result<Vec<Effect>, Rejection> {
        let pending = self
            .pending
            .filter(|pending| pending.ticket == ticket)
            .ok_or(Rejection::StaleTimer(ticket))?;

        // Draw on a copy so a content error leaves the stream untouched.
        let mut rng = self.rng;
        let outcome = build_outcome(
            &TurnRequest {
                context: &self.context,
                choice: pending.choice,
                mini_game_eligible: self.turn_count < MAX_TURNS - 1,
                now_ms,
            },
            &mut rng,
        )?;
        self.rng = rng;

        log::debug!(
            "turn {} resolved to {} ({})",
            self.turn_count + 1,
            outcome.kind,
            outcome.label
        );
        let is_treat = outcome.kind == OutcomeKind::Treat;
        if is_treat {
            self.treats += 1;
        } else {
            self.tricks += 1;
        }
        self.history.record(outcome.clone());
        self.current = Some(outcome);
        self.turn_count += 1;
        self.animating = false;
        self.pending = None;

        let mut effects = Vec::new();
        if is_treat {
            self.cue(&mut effects, SoundCue::Coin);
        }
        effects.push(Effect::Schedule {
            delay_ms: DOOR_CLOSE_MS,
            timer: Timer::DoorClose(ticket),
        });
        Ok(effects)
    }

    fn close_door(&mut self, ticket: TurnTicket) -> Result<Vec<Effect>, Rejection> {
        if ticket.epoch != self.epoch {
            return Err(Rejection::StaleTimer(ticket));
        }
        self.door_open = false;
        Ok(Vec::new())
    }

    fn dismiss(&mut self) -> Result<Vec<Effect>, Rejection> {
        self.require_phase(Phase::Play)?;
        if self.current.take().is_none() {
            return Err(Rejection::NoOutcome);
        }
        Ok(Vec::new())
    }

    fn finish_mini_game(
        &mut self,
        id: &OutcomeId,
        success: bool,
    ) -> Result<Vec<Effect>, Rejection> {
        let current = self.current.as_mut().ok_or(Rejection::NoOutcome)?;
        if &current.id != id {
            return Err(Rejection::UnknownOutcome(id.clone()));
        }
        let Some(slot) = current.mini_game else {
            return Err(Rejection::NoMiniGame);
        };
        if slot.complete {
            return Err(Rejection::MiniGameSettled);
        }
        current.settle_mini_game(success);
        self.history.patch(id, |entry| {
            entry.settle_mini_game(success);
        });
        self.mini_games_played += 1;
        if success {
            self.mini_games_won += 1;
        }
        log::debug!("mini-game {id} settled, success={success}");

        let mut effects = Vec::new();
        if success {
            self.cue(&mut effects, SoundCue::Coin);
        }
        Ok(effects)
    }

    fn go_to_final(&mut self) -> Result<Vec<Effect>, Rejection> {
        self.require_phase(Phase::Play)?;
        if self.animating {
            return Err(Rejection::Resolving);
        }
        self.phase = Phase::Final;
        log::info!(
            "session {} finished after {} turn(s)",
            self.epoch,
            self.turn_count
        );

        let mut effects = Vec::new();
        self.cue(&mut effects, SoundCue::Click);
        if self.turn_count >= MAX_TURNS {
            self.cue(&mut effects, SoundCue::Success);
        }
        Ok(effects)
    }

    fn reset(&mut self) -> Vec<Effect> {
        self.phase = Phase::Intro;
        self.clear_turns();
        self.context = PlayContext::new(&self.name_input, &[]);
        self.epoch = self.epoch.wrapping_add(1);
        log::debug!("session reset, epoch now {}", self.epoch);
        Vec::new()
    }

    fn toggle(&mut self, flip: impl FnOnce(&mut AudioPrefs)) -> Vec<Effect> {
        let was_audible = self.prefs.music_audible();
        flip(&mut self.prefs);
        match (was_audible, self.prefs.music_audible()) {
            (false, true) => vec![Effect::Music(MusicCommand::Start)],
            (true, false) => vec![Effect::Music(MusicCommand::Stop)],
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw name field, kept across resets as form pre-fill.
    #[must_use]
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    #[must_use]
    pub fn likes_input(&self) -> &str {
        &self.likes_input
    }

    /// Context the current session was started with.
    #[must_use]
    pub const fn context(&self) -> &PlayContext {
        &self.context
    }

    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    #[must_use]
    pub const fn turn_count(&self) -> u8 {
        self.turn_count
    }

    #[must_use]
    pub const fn turns_left(&self) -> u8 {
        MAX_TURNS.saturating_sub(self.turn_count)
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Outcome> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    #[must_use]
    pub const fn door_open(&self) -> bool {
        self.door_open
    }

    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    #[must_use]
    pub const fn prefs(&self) -> AudioPrefs {
        self.prefs
    }

    /// Door buttons are live.
    #[must_use]
    pub const fn can_choose(&self) -> bool {
        matches!(self.phase, Phase::Play) && !self.animating && self.turn_count < MAX_TURNS
    }

    /// All turns used; the UI switches to the final call-to-action.
    #[must_use]
    pub const fn final_offered(&self) -> bool {
        self.turn_count >= MAX_TURNS
    }

    #[must_use]
    pub const fn treats(&self) -> u8 {
        self.treats
    }

    #[must_use]
    pub const fn tricks(&self) -> u8 {
        self.tricks
    }

    #[must_use]
    pub const fn mini_games_played(&self) -> u8 {
        self.mini_games_played
    }

    #[must_use]
    pub const fn mini_games_won(&self) -> u8 {
        self.mini_games_won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(likes: &str) -> Session {
        let mut session = Session::new();
        session.dispatch(Action::EditName("Linh".into())).unwrap();
        session.dispatch(Action::EditLikes(likes.into())).unwrap();
        session.dispatch(Action::Start { now_ms: 1_000 }).unwrap();
        session
    }

    fn settle_ticket(effects: &[Effect]) -> TurnTicket {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Schedule {
                    timer: Timer::DoorSettle(ticket),
                    ..
                } => Some(*ticket),
                _ => None,
            })
            .expect("settle timer scheduled")
    }

    #[test]
    fn edits_only_in_intro() {
        let mut session = playing("");
        let err = session.dispatch(Action::EditName("x".into())).unwrap_err();
        assert_eq!(
            err,
            Rejection::WrongPhase {
                expected: Phase::Intro,
                actual: Phase::Play,
            }
        );
        assert_eq!(session.name_input(), "Linh");
    }

    #[test]
    fn start_parses_likes_and_seeds() {
        let session = playing("mèo, , cà phê ,sách,extra");
        assert_eq!(session.phase(), Phase::Play);
        assert_eq!(session.context().likes, vec!["mèo", "cà phê", "sách"]);
        assert_eq!(session.seed(), 1_000);
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn start_emits_click_and_music() {
        let mut session = Session::new();
        let effects = session.dispatch(Action::Start { now_ms: 5 }).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::Cue(SoundCue::Click),
                Effect::Music(MusicCommand::Start)
            ]
        );
    }

    #[test]
    fn door_press_schedules_settle() {
        let mut session = playing("");
        let effects = session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap();
        assert_eq!(effects[0], Effect::Cue(SoundCue::Click));
        assert_eq!(
            effects[1],
            Effect::Schedule {
                delay_ms: 520,
                timer: Timer::DoorSettle(TurnTicket { epoch: 1, turn: 0 }),
            }
        );
        assert!(session.is_animating());
        assert!(session.door_open());
    }

    #[test]
    fn second_press_while_resolving_changes_nothing() {
        let mut session = playing("");
        session.dispatch(Action::ChooseDoor(Choice::Trick)).unwrap();
        let before = serde_json::to_string(&session).unwrap();
        assert_eq!(
            session.dispatch(Action::ChooseDoor(Choice::Treat)),
            Err(Rejection::Resolving)
        );
        assert_eq!(serde_json::to_string(&session).unwrap(), before);
    }

    #[test]
    fn settle_resolves_one_turn() {
        let mut session = playing("mèo");
        let effects = session.dispatch(Action::ChooseDoor(Choice::Trick)).unwrap();
        let ticket = settle_ticket(&effects);
        let effects = session.dispatch(Timer::DoorSettle(ticket).fire(2_000)).unwrap();
        assert_eq!(session.turn_count(), 1);
        assert!(!session.is_animating());
        let current = session.current().unwrap();
        assert_eq!(current.choice, Choice::Trick);
        assert_eq!(current.timestamp, 2_000);
        assert_eq!(session.history().len(), 1);
        assert!(effects.contains(&Effect::Schedule {
            delay_ms: 260,
            timer: Timer::DoorClose(ticket),
        }));
        assert_eq!(
            effects.contains(&Effect::Cue(SoundCue::Coin)),
            current.kind == OutcomeKind::Treat
        );

        session.dispatch(Action::DoorClosed { ticket }).unwrap();
        assert!(!session.door_open());
    }

    #[test]
    fn settle_twice_is_stale() {
        let mut session = playing("");
        let ticket = settle_ticket(&session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap());
        session.dispatch(Timer::DoorSettle(ticket).fire(1)).unwrap();
        assert_eq!(
            session.dispatch(Timer::DoorSettle(ticket).fire(2)),
            Err(Rejection::StaleTimer(ticket))
        );
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn kind_counters_cover_every_turn() {
        let mut session = playing("mèo");
        let mut treats = 0_u8;
        for (n, choice) in [Choice::Treat, Choice::Trick].into_iter().cycle().take(8).enumerate() {
            let ticket = settle_ticket(&session.dispatch(Action::ChooseDoor(choice)).unwrap());
            session.dispatch(Timer::DoorSettle(ticket).fire(2_000 + n as u64)).unwrap();
            if session.current().unwrap().kind == OutcomeKind::Treat {
                treats += 1;
            }
        }
        assert_eq!(session.history().len(), crate::constants::HISTORY_CAPACITY);
        assert_eq!(session.treats(), treats);
        assert_eq!(session.treats() + session.tricks(), MAX_TURNS);

        session.dispatch(Action::Reset).unwrap();
        assert_eq!((session.treats(), session.tricks()), (0, 0));
    }

    #[test]
    fn dismiss_needs_an_outcome() {
        let mut session = playing("");
        assert_eq!(session.dispatch(Action::Dismiss), Err(Rejection::NoOutcome));
        let ticket = settle_ticket(&session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap());
        session.dispatch(Timer::DoorSettle(ticket).fire(1)).unwrap();
        session.dispatch(Action::Dismiss).unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn go_to_final_blocked_while_resolving() {
        let mut session = playing("");
        session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap();
        assert_eq!(session.dispatch(Action::GoToFinal), Err(Rejection::Resolving));
        assert_eq!(session.phase(), Phase::Play);
    }

    #[test]
    fn early_final_plays_click_only() {
        let mut session = playing("");
        let effects = session.dispatch(Action::GoToFinal).unwrap();
        assert_eq!(effects, vec![Effect::Cue(SoundCue::Click)]);
        assert_eq!(session.phase(), Phase::Final);
        assert!(matches!(
            session.dispatch(Action::ChooseDoor(Choice::Treat)),
            Err(Rejection::WrongPhase { .. })
        ));
    }

    #[test]
    fn reset_keeps_form_inputs() {
        let mut session = playing("mèo, trà");
        session.dispatch(Action::GoToFinal).unwrap();
        session.dispatch(Action::Reset).unwrap();
        assert_eq!(session.phase(), Phase::Intro);
        assert_eq!(session.name_input(), "Linh");
        assert_eq!(session.likes_input(), "mèo, trà");
        assert!(session.context().likes.is_empty());
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.epoch(), 2);
    }

    #[test]
    fn toggles_drive_music() {
        let mut session = Session::new();
        assert_eq!(
            session.dispatch(Action::ToggleMusic).unwrap(),
            vec![Effect::Music(MusicCommand::Stop)]
        );
        assert!(session.dispatch(Action::ToggleSound).unwrap().is_empty());
        assert!(session.dispatch(Action::ToggleMusic).unwrap().is_empty());
        assert_eq!(
            session.dispatch(Action::ToggleSound).unwrap(),
            vec![Effect::Music(MusicCommand::Start)]
        );
    }

    #[test]
    fn muted_sessions_emit_no_cues() {
        let mut session = Session::new();
        session.dispatch(Action::ToggleSound).unwrap();
        let effects = session.dispatch(Action::Start { now_ms: 9 }).unwrap();
        assert!(effects.is_empty());
        let effects = session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Schedule { .. }));
    }
}
