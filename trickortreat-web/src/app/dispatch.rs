//! Bridge between Yew callbacks and the engine reducer.
use std::cell::RefCell;
use std::rc::Rc;

use trickortreat_game::{Action, Effect, Session, SoundBoard, Timer};
use yew::Callback;

use crate::dom::{js_error_message, set_timeout};

/// Owns the session handle, runs effects and asks the view to refresh.
#[derive(Clone)]
pub struct Dispatcher {
    session: Rc<RefCell<Session>>,
    board: Rc<dyn SoundBoard>,
    refresh: Callback<()>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        session: Rc<RefCell<Session>>,
        board: Rc<dyn SoundBoard>,
        refresh: Callback<()>,
    ) -> Self {
        Self {
            session,
            board,
            refresh,
        }
    }

    /// Apply `action`; rejected actions are logged and leave the page as is.
    pub fn dispatch(&self, action: Action) {
        // The borrow ends before effects run; a timer may re-enter later.
        let outcome = self.session.borrow_mut().dispatch(action);
        match outcome {
            Ok(effects) => {
                for effect in effects {
                    self.run(effect);
                }
                self.refresh.emit(());
            }
            Err(rejection) => log::debug!("ignored: {rejection}"),
        }
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::Cue(cue) => self.board.play(cue),
            Effect::Music(command) => self.board.music(command),
            Effect::Schedule { delay_ms, timer } => self.schedule(delay_ms, timer),
        }
    }

    fn schedule(&self, delay_ms: u32, timer: Timer) {
        let this = self.clone();
        let scheduled = set_timeout(delay_ms, move || {
            this.dispatch(timer.fire(now_ms()));
        });
        if let Err(err) = scheduled {
            log::error!("timer {timer:?} not scheduled: {}", js_error_message(&err));
        }
    }

    #[must_use]
    pub fn callback(&self) -> Callback<Action> {
        let this = self.clone();
        Callback::from(move |action| this.dispatch(action))
    }
}

/// Wall clock in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let now = js_sys::Date::now() as u64;
    now
}
