//! Data shown on the final screen.
use serde::Serialize;

use crate::constants::{MAX_TURNS, OWNER_FALLBACK, SUMMARY_HIGHLIGHTS};
use crate::outcome::{Outcome, OutcomeKind};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub kind: OutcomeKind,
    pub label: String,
    pub message: String,
}

impl From<&Outcome> for Highlight {
    fn from(outcome: &Outcome) -> Self {
        Self {
            kind: outcome.kind,
            label: outcome.label.clone(),
            message: outcome.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalSummary {
    pub owner: String,
    pub turns_played: u8,
    pub max_turns: u8,
    pub treats: usize,
    pub tricks: usize,
    pub mini_games_played: u8,
    pub mini_games_won: u8,
    pub seed: u32,
    /// Newest first.
    pub highlights: Vec<Highlight>,
}

impl FinalSummary {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let history = session.history();
        Self {
            owner: session
                .context()
                .name
                .clone()
                .unwrap_or_else(|| OWNER_FALLBACK.to_string()),
            turns_played: session.turn_count(),
            max_turns: MAX_TURNS,
            treats: usize::from(session.treats()),
            tricks: usize::from(session.tricks()),
            mini_games_played: session.mini_games_played(),
            mini_games_won: session.mini_games_won(),
            seed: session.seed(),
            highlights: history
                .iter()
                .take(SUMMARY_HIGHLIGHTS)
                .map(Highlight::from)
                .collect(),
        }
    }

    /// Played every door rather than leaving early.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.turns_played >= self.max_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Choice;
    use crate::session::{Action, Effect, Timer};

    fn play_turns(session: &mut Session, turns: usize) {
        for n in 0..turns {
            let effects = session.dispatch(Action::ChooseDoor(Choice::Treat)).unwrap();
            let Some(Effect::Schedule { timer, .. }) = effects.last().copied() else {
                panic!("door press must schedule a timer");
            };
            session.dispatch(timer.fire(10_000 + n as u64)).unwrap();
        }
    }

    #[test]
    fn summary_lists_five_newest() {
        let mut session = Session::new();
        session.dispatch(Action::EditName("  Hà ".into())).unwrap();
        session.dispatch(Action::Start { now_ms: 77 }).unwrap();
        play_turns(&mut session, 7);
        session.dispatch(Action::GoToFinal).unwrap();

        let summary = FinalSummary::from_session(&session);
        assert_eq!(summary.owner, "Hà");
        assert_eq!(summary.turns_played, 7);
        assert!(!summary.completed());
        assert_eq!(summary.highlights.len(), 5);
        assert_eq!(summary.treats, 7);
        assert_eq!(summary.tricks, 0);
        assert_eq!(session.history().len(), 6);
        assert_eq!(summary.seed, 77);
        let newest = session.history().iter().next().unwrap();
        assert_eq!(summary.highlights[0].message, newest.message);
    }

    #[test]
    fn empty_session_uses_fallback_owner() {
        let session = Session::new();
        let summary = FinalSummary::from_session(&session);
        assert_eq!(summary.owner, "Bạn");
        assert!(summary.highlights.is_empty());
    }
}
