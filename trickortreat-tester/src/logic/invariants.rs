use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;
use trickortreat_game::OutcomeKind;
use trickortreat_game::constants::{HISTORY_CAPACITY, MAX_TURNS};

use super::simulation::SessionRun;

/// A rule a finished session broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{played} turns played, cap is 8")]
    TooManyTurns { played: usize },
    #[error("summary reports {reported} turns, {played} were played")]
    TurnCountMismatch { reported: u8, played: usize },
    #[error("history held {len} entries after turn {turn}")]
    HistoryOverflow { turn: u8, len: usize },
    #[error("turn {turn} left a placeholder in {field}")]
    Placeholder { turn: u8, field: &'static str },
    #[error("turn {turn} id `{id}` is malformed")]
    MalformedId { turn: u8, id: String },
    #[error("turn {turn} reused id `{id}`")]
    DuplicateId { turn: u8, id: String },
    #[error("final turn {turn} carried a mini-game")]
    MiniGameOnLastTurn { turn: u8 },
    #[error("turn {turn} mini-game was never settled")]
    UnsettledMiniGame { turn: u8 },
    #[error("turn {turn} mini-game accepted a second result")]
    DoubleReport { turn: u8 },
    #[error("treat turn {turn} carried a mini-game")]
    MiniGameOnTreat { turn: u8 },
    #[error("mini-game tally {won}/{played} does not match the turns")]
    MiniGameTally { played: u8, won: u8 },
    #[error("summary counts {counted} {kind}, turns show {seen}")]
    SummaryCount {
        kind: OutcomeKind,
        counted: usize,
        seen: usize,
    },
    #[error("a knock after the last turn was accepted")]
    OverflowAccepted,
    #[error("a timer from a previous session was accepted")]
    StaleTimerAccepted,
    #[error("{cues} success cue(s) for a session that {ending}")]
    SuccessCue { cues: usize, ending: &'static str },
    #[error("voucher filename `{0}` is malformed")]
    VoucherFilename(String),
}

/// Text patterns a finished session is checked against.
#[derive(Debug, Clone)]
pub struct InvariantChecker {
    placeholder: Regex,
    voucher_file: Regex,
    turn_id: Regex,
}

impl InvariantChecker {
    /// # Errors
    /// Fails only if a built-in pattern does not compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            placeholder: Regex::new(r"\[(Tên|LIKE)\]")?,
            voucher_file: Regex::new(r"^voucher-om-\S+\.png$")?,
            turn_id: Regex::new(r"^turn-[0-9a-z]+-[0-9a-f]{10}$")?,
        })
    }

    /// Check one session against the engine's rules.
    pub fn check_run(&self, run: &SessionRun) -> Vec<Violation> {
        collect_violations(self, run)
    }
}

fn collect_violations(rules: &InvariantChecker, run: &SessionRun) -> Vec<Violation> {
    let mut violations = Vec::new();
    let played = run.turns.len();

    if played > usize::from(MAX_TURNS) {
        violations.push(Violation::TooManyTurns { played });
    }
    if usize::from(run.summary.turns_played) != played {
        violations.push(Violation::TurnCountMismatch {
            reported: run.summary.turns_played,
            played,
        });
    }

    let mut ids = HashSet::new();
    let mut settled = 0_u8;
    let mut won = 0_u8;
    for record in &run.turns {
        let turn = record.turn;
        let outcome = &record.outcome;

        if record.history_len > HISTORY_CAPACITY {
            violations.push(Violation::HistoryOverflow {
                turn,
                len: record.history_len,
            });
        }

        let mut fields = vec![("label", &outcome.label), ("message", &outcome.message)];
        if let Some(prompt) = &outcome.prompt {
            fields.push(("prompt", prompt));
        }
        for (field, text) in fields {
            if rules.placeholder.is_match(text) {
                violations.push(Violation::Placeholder { turn, field });
            }
        }

        let id = outcome.id.as_str();
        if !rules.turn_id.is_match(id) {
            violations.push(Violation::MalformedId {
                turn,
                id: id.to_string(),
            });
        }
        if !ids.insert(id) {
            violations.push(Violation::DuplicateId {
                turn,
                id: id.to_string(),
            });
        }

        if let Some(slot) = outcome.mini_game {
            if turn >= MAX_TURNS {
                violations.push(Violation::MiniGameOnLastTurn { turn });
            }
            if outcome.kind == OutcomeKind::Treat {
                violations.push(Violation::MiniGameOnTreat { turn });
            }
            if slot.complete {
                settled += 1;
                won += u8::from(slot.success);
            } else {
                violations.push(Violation::UnsettledMiniGame { turn });
            }
        }
        if record.duplicate_result_rejected == Some(false) {
            violations.push(Violation::DoubleReport { turn });
        }
    }

    if run.summary.mini_games_played != settled || run.summary.mini_games_won != won {
        violations.push(Violation::MiniGameTally {
            played: run.summary.mini_games_played,
            won: run.summary.mini_games_won,
        });
    }

    let seen_treats = run
        .turns
        .iter()
        .filter(|record| record.outcome.kind == OutcomeKind::Treat)
        .count();
    for (kind, counted, seen) in [
        (OutcomeKind::Treat, run.summary.treats, seen_treats),
        (OutcomeKind::Trick, run.summary.tricks, played - seen_treats),
    ] {
        if counted != seen {
            violations.push(Violation::SummaryCount {
                kind,
                counted,
                seen,
            });
        }
    }

    if run.overflow_rejected == Some(false) {
        violations.push(Violation::OverflowAccepted);
    }
    if !run.stale_timer_rejected {
        violations.push(Violation::StaleTimerAccepted);
    }

    match (run.summary.completed(), run.success_cues) {
        (true, 1) | (false, 0) => {}
        (true, cues) => violations.push(Violation::SuccessCue {
            cues,
            ending: "used every turn",
        }),
        (false, cues) => violations.push(Violation::SuccessCue {
            cues,
            ending: "stopped early",
        }),
    }

    if !rules.voucher_file.is_match(&run.voucher_filename) {
        violations.push(Violation::VoucherFilename(run.voucher_filename.clone()));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::policy::{CatchPolicy, DoorPolicy, Policy};
    use crate::logic::simulation::{SimulationPlan, Simulator};

    fn sample_run() -> SessionRun {
        let plan = SimulationPlan {
            name: "Bảo Ngọc".to_string(),
            likes: "mèo, cà phê".to_string(),
            policy: Policy {
                door: DoorPolicy::Random,
                catch: CatchPolicy::Random,
                stop_after: None,
            },
        };
        Simulator::new(false).run(&plan, 2_024).unwrap()
    }

    fn check(run: &SessionRun) -> Vec<Violation> {
        InvariantChecker::new().unwrap().check_run(run)
    }

    #[test]
    fn engine_sessions_are_clean() {
        let run = sample_run();
        assert_eq!(check(&run), Vec::new());
    }

    #[test]
    fn leftover_placeholder_is_flagged() {
        let mut run = sample_run();
        run.turns[0].outcome.message = "Chúc [Tên] vui".to_string();
        assert!(
            check(&run).contains(&Violation::Placeholder {
                turn: 1,
                field: "message"
            })
        );
    }

    #[test]
    fn tampered_summary_is_flagged() {
        let mut run = sample_run();
        run.summary.turns_played = 3;
        run.success_cues = 2;
        let violations = check(&run);
        assert!(violations.iter().any(|v| matches!(v, Violation::TurnCountMismatch { .. })));
        assert!(violations.iter().any(|v| matches!(v, Violation::SuccessCue { .. })));
    }

    #[test]
    fn summary_counts_every_turn_not_just_history() {
        let run = sample_run();
        assert!(run.turns.len() > HISTORY_CAPACITY);
        assert_eq!(run.summary.treats + run.summary.tricks, run.turns.len());

        let mut trimmed = run.clone();
        trimmed.summary.tricks = trimmed.summary.tricks.saturating_sub(1);
        trimmed.summary.treats = HISTORY_CAPACITY - trimmed.summary.tricks;
        assert!(
            check(&trimmed)
                .iter()
                .any(|v| matches!(v, Violation::SummaryCount { .. }))
        );
    }

    #[test]
    fn repeated_id_is_flagged() {
        let mut run = sample_run();
        run.turns[1].outcome.id = run.turns[0].outcome.id.clone();
        assert!(
            check(&run)
                .iter()
                .any(|v| matches!(v, Violation::DuplicateId { turn: 2, .. }))
        );
    }

    #[test]
    fn violation_messages_read_plainly() {
        assert_eq!(
            Violation::HistoryOverflow { turn: 7, len: 7 }.to_string(),
            "history held 7 entries after turn 7"
        );
        assert_eq!(
            Violation::TooManyTurns { played: 9 }.to_string(),
            "9 turns played, cap is 8"
        );
    }
}
